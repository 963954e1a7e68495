//! # oba-kit
//!
//! Wires the transit models to a concrete region provider and a REST
//! service. Callers bring the transport ([`DataFetcher`]) and, optionally,
//! somewhere to remember the selected region ([`RegionStore`]).

pub mod config;
pub mod logging;
pub mod service;

use std::sync::Arc;

use oba_transit::prelude::{
    DataFetcher, Region, RegionProvider, RegionStore, SelectionError, StaticRegionProvider,
};

pub use config::{ConfigError, KitConfig};
pub use logging::setup_logging;
pub use oba_transit as transit;
pub use service::{ModelService, ServiceError};

pub struct ObaKit {
    config: KitConfig,
    regions: Arc<StaticRegionProvider>,
    service: ModelService,
}

impl ObaKit {
    pub fn new(
        config: KitConfig,
        fetcher: Arc<dyn DataFetcher>,
        store: Option<Arc<dyn RegionStore>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        setup_logging(config.log_level.as_deref());

        let mut provider = StaticRegionProvider::new(config.regions.clone(), fetcher.clone());
        if let Some(store) = store {
            provider = provider.with_store(store);
        }
        let regions = Arc::new(provider);
        let service = ModelService::new(&config, regions.clone(), fetcher);

        Ok(Self {
            config,
            regions,
            service,
        })
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    pub fn regions(&self) -> &Arc<StaticRegionProvider> {
        &self.regions
    }

    pub fn service(&self) -> &ModelService {
        &self.service
    }

    /// Load the region list and re-apply the stored selection.
    ///
    /// A stored region that is no longer listed, or no longer active, is not
    /// an error; the kit simply starts without a current region.
    pub async fn bootstrap(&self) -> Result<Option<Arc<Region>>, ServiceError> {
        self.regions.refresh_regions().await?;

        match self.regions.restore_current_region().await {
            Ok(region) => Ok(region),
            Err(
                error @ (SelectionError::UnknownRegion(_) | SelectionError::Inactive(_)),
            ) => {
                tracing::warn!(%error, "ignoring stored region");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }
}
