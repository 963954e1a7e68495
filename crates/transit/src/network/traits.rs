//! Pluggable networking and persistence traits.
//!
//! External crates implement these to provide data fetching and storage;
//! nothing in this crate performs I/O on its own.

use std::future::Future;
use std::pin::Pin;

use crate::identifiers::RegionIdentifier;
use crate::models::types::Result;

/// Fetch raw bytes from a URL
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// Remembers which region the user picked.
pub trait RegionStore: Send + Sync {
    fn load_current_region<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<RegionIdentifier>>> + Send + 'a>>;

    fn save_current_region<'a>(
        &'a self,
        region: RegionIdentifier,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
