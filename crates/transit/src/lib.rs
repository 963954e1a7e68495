//! # oba-transit
//!
//! Typed models for the OneBusAway REST API and the machinery to decode them.
//!
//! ## Features
//!
//! - **Resilient references**: every entity list in a `references` block is
//!   decoded on its own, and failures name the list that broke
//! - **Model operations**: cancellable decode units with a set-once result
//! - **Operation queue**: bounded-concurrency executor on tokio
//! - **Region provider**: async contract plus an in-memory implementation
//!   with a spatial index over region bounds
//! - **Pluggable networking**: implement your own data fetching and storage
//!
//! ## Example
//!
//! ```
//! use oba_transit::prelude::*;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "code": 200,
//!     "data": {
//!         "list": [{"agencyId": "1", "lat": 47.53, "latSpan": 0.7, "lon": -122.11, "lonSpan": 0.8}],
//!         "references": {
//!             "agencies": [{"id": "1", "name": "Metro Transit", "url": "https://kingcounty.gov/metro", "timezone": "America/Los_Angeles"}],
//!             "routes": [], "situations": [], "stops": [], "trips": []
//!         }
//!     }
//! });
//!
//! let operation = AgenciesWithCoverageModelOperation::new(payload);
//! assert!(operation.agencies_with_coverage().is_empty());
//!
//! operation.execute();
//! let coverage = &operation.agencies_with_coverage()[0];
//! let agency = coverage.agency(operation.references().unwrap()).unwrap();
//! assert_eq!(&*agency.name, "Metro Transit");
//! ```

pub mod decode;
pub mod identifiers;
pub mod models;
pub mod network;
pub mod operation;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::decode::{
        decode_models, decode_models_from_slice, DecodeError, EntityKind, ModelList,
    };
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::network::traits::*;
    pub use crate::operation::{
        AgenciesWithCoverageModelOperation, AgencyModelOperation, ModelOperation, OperationError,
        OperationQueue, OperationState, QueueConfig, RegionsModelOperation, RoutesModelOperation,
        StopsModelOperation, TripModelOperation,
    };
    pub use crate::provider::*;
}

pub use prelude::*;
