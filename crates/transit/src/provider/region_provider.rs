//! The region provider contract.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::decode::DecodeError;
use crate::identifiers::RegionIdentifier;
use crate::models::region::Region;
use crate::models::types::TransitError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("failed to fetch regions: {0}")]
    Fetch(#[source] TransitError),

    #[error("failed to decode regions: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("region {0} is not in the current region list")]
    UnknownRegion(RegionIdentifier),

    #[error("region {0} is not active")]
    Inactive(RegionIdentifier),

    #[error("failed to persist region selection: {0}")]
    Persist(#[source] TransitError),
}

/// Source of the known regions and the user's current one.
///
/// Reads are synchronous snapshots of cached state. The mutating calls are
/// single-shot: nothing is retried, and dropping the returned future
/// abandons the request.
pub trait RegionProvider: Send + Sync {
    fn regions(&self) -> Vec<Arc<Region>>;

    fn current_region(&self) -> Option<Arc<Region>>;

    /// Repopulate [`regions`](Self::regions) from the upstream source.
    fn refresh_regions(&self) -> BoxFuture<'_, Result<(), RefreshError>>;

    /// Validate and commit a new current region.
    fn set_current_region(&self, region: Arc<Region>) -> BoxFuture<'_, Result<(), SelectionError>>;
}
