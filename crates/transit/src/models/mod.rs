//! REST models, their shared types, and the references block.

pub mod agency;
pub mod coverage;
pub mod references;
pub mod region;
pub mod route;
pub mod serde_helpers;
pub mod situation;
pub mod stop;
pub mod traits;
pub mod trip;
pub mod types;

// Re-exports for convenience
pub use agency::Agency;
pub use coverage::AgencyWithCoverage;
pub use references::{PartialReferences, References};
pub use region::{Region, RegionBound};
pub use route::Route;
pub use situation::{AffectedEntity, Consequence, Situation, TimeWindow, TranslatedString};
pub use stop::{Stop, WheelchairBoarding};
pub use traits::RestModel;
pub use trip::Trip;
pub use types::{DirectionId, Result, RouteType, Severity, TransitError};
