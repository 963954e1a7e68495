//! Region providers.

pub mod region_provider;
pub mod static_provider;

pub use region_provider::{BoxFuture, RefreshError, RegionProvider, SelectionError};
pub use static_provider::{RegionProviderConfig, StaticRegionProvider, DEFAULT_REGIONS_URL};
