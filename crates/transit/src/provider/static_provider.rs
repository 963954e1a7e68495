//! In-memory region provider fed by a [`DataFetcher`].
//!
//! Regions are held in memory together with a spatial index over their
//! bounds. Selection is optionally committed through a [`RegionStore`]
//! before the in-memory state changes.

use std::sync::{Arc, PoisonError, RwLock};

use geo::Point;
use serde::Deserialize;
use tracing::{info, warn};

use crate::decode::decode_models_from_slice;
use crate::identifiers::RegionIdentifier;
use crate::models::region::Region;
use crate::network::traits::{DataFetcher, RegionStore};
use crate::provider::region_provider::*;
use crate::spatial::index::RegionIndex;

pub const DEFAULT_REGIONS_URL: &str = "https://regions.onebusaway.org/regions-v3.json";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionProviderConfig {
    pub regions_url: String,

    /// Keep regions the directory marks as inactive.
    pub include_inactive: bool,

    /// Keep regions flagged as experimental.
    pub include_experimental: bool,
}

impl Default for RegionProviderConfig {
    fn default() -> Self {
        Self {
            regions_url: DEFAULT_REGIONS_URL.to_owned(),
            include_inactive: false,
            include_experimental: false,
        }
    }
}

#[derive(Default)]
struct RegionState {
    regions: Vec<Arc<Region>>,
    index: RegionIndex,
    current: Option<Arc<Region>>,
}

pub struct StaticRegionProvider {
    config: RegionProviderConfig,
    fetcher: Arc<dyn DataFetcher>,
    store: Option<Arc<dyn RegionStore>>,
    state: RwLock<RegionState>,
}

impl StaticRegionProvider {
    /// Create a provider with no regions; call `refresh_regions` to load them.
    pub fn new(config: RegionProviderConfig, fetcher: Arc<dyn DataFetcher>) -> Self {
        Self {
            config,
            fetcher,
            store: None,
            state: RwLock::new(RegionState::default()),
        }
    }

    /// Commit selections through `store`.
    pub fn with_store(mut self, store: Arc<dyn RegionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Seed the provider with already-decoded regions.
    pub fn with_regions(self, regions: Vec<Region>) -> Self {
        self.replace_regions(regions.into_iter().map(Arc::new).collect());
        self
    }

    pub fn config(&self) -> &RegionProviderConfig {
        &self.config
    }

    /// A region whose bounds cover `point`.
    pub fn region_for_location(&self, point: Point) -> Option<Arc<Region>> {
        self.read().index.regions_at(point).into_iter().next()
    }

    /// Closest region to `point` and its distance in meters.
    pub fn nearest_region(&self, point: Point) -> Option<(Arc<Region>, f64)> {
        self.read().index.nearest(point)
    }

    /// Select the region covering `point`. Returns `Ok(None)` when no
    /// region covers it; the current region is then left unchanged.
    pub async fn select_region_for_location(
        &self,
        point: Point,
    ) -> Result<Option<Arc<Region>>, SelectionError> {
        let Some(region) = self.region_for_location(point) else {
            return Ok(None);
        };
        self.set_current_region(region.clone()).await?;
        Ok(Some(region))
    }

    /// Re-apply the selection saved in the store, if any.
    pub async fn restore_current_region(&self) -> Result<Option<Arc<Region>>, SelectionError> {
        let Some(store) = &self.store else {
            return Ok(None);
        };

        let Some(id) = store
            .load_current_region()
            .await
            .map_err(SelectionError::Persist)?
        else {
            return Ok(None);
        };

        let region = self.selectable(id)?;
        let region = self.commit_current(region)?;
        info!(region = %region.region_name, "restored current region");
        Ok(Some(region))
    }

    fn find(&self, id: RegionIdentifier) -> Option<Arc<Region>> {
        self.read().regions.iter().find(|r| r.id == id).cloned()
    }

    /// The listed region with `id`, provided it may become current.
    fn selectable(&self, id: RegionIdentifier) -> Result<Arc<Region>, SelectionError> {
        let region = self.find(id).ok_or(SelectionError::UnknownRegion(id))?;
        if !region.active {
            return Err(SelectionError::Inactive(id));
        }
        Ok(region)
    }

    // A refresh may have replaced the list since `region` was looked up.
    fn commit_current(&self, region: Arc<Region>) -> Result<Arc<Region>, SelectionError> {
        let mut state = self.write();
        let listed = state
            .regions
            .iter()
            .find(|r| r.id == region.id)
            .cloned()
            .ok_or(SelectionError::UnknownRegion(region.id))?;
        state.current = Some(listed.clone());
        Ok(listed)
    }

    fn keep(&self, region: &Region) -> bool {
        (self.config.include_inactive || region.active)
            && (self.config.include_experimental || !region.experimental)
    }

    fn replace_regions(&self, regions: Vec<Arc<Region>>) {
        let index = RegionIndex::build(&regions);
        let mut state = self.write();

        // Keep the selection only if the region survived the refresh.
        let current = state
            .current
            .as_ref()
            .and_then(|c| regions.iter().find(|r| r.id == c.id).cloned());
        if let (Some(old), None) = (&state.current, &current) {
            warn!(region = %old.region_name, "current region no longer available");
        }

        *state = RegionState {
            regions,
            index,
            current,
        };
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RegionProvider for StaticRegionProvider {
    fn regions(&self) -> Vec<Arc<Region>> {
        self.read().regions.clone()
    }

    fn current_region(&self) -> Option<Arc<Region>> {
        self.read().current.clone()
    }

    fn refresh_regions(&self) -> BoxFuture<'_, Result<(), RefreshError>> {
        Box::pin(async move {
            let bytes = self
                .fetcher
                .fetch(&self.config.regions_url)
                .await
                .map_err(RefreshError::Fetch)?;

            let list = decode_models_from_slice::<Region>(&bytes)?;
            let total = list.models.len();
            let regions: Vec<Arc<Region>> = list
                .models
                .into_iter()
                .filter(|r| self.keep(r))
                .map(Arc::new)
                .collect();

            info!(total, kept = regions.len(), "refreshed regions");
            self.replace_regions(regions);
            Ok(())
        })
    }

    fn set_current_region(&self, region: Arc<Region>) -> BoxFuture<'_, Result<(), SelectionError>> {
        Box::pin(async move {
            let known = self.selectable(region.id)?;

            if let Some(store) = &self.store {
                store
                    .save_current_region(known.id)
                    .await
                    .map_err(SelectionError::Persist)?;
            }

            let current = self.commit_current(known).inspect_err(|_| {
                warn!(region = %region.region_name, "region was dropped by a refresh during selection");
            })?;
            info!(region = %current.region_name, "current region changed");
            Ok(())
        })
    }
}
