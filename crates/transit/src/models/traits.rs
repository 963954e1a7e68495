//! Traits shared by every decodable REST model.

use serde::de::DeserializeOwned;

use crate::models::{
    agency::Agency, coverage::AgencyWithCoverage, region::Region, route::Route,
    situation::Situation, stop::Stop, trip::Trip,
};

/// A type that can appear as an element of a response's `list` or as its
/// `entry`.
pub trait RestModel: DeserializeOwned + Send + Sync + 'static {
    /// Name used in diagnostics.
    const NAME: &'static str;
}

impl RestModel for Agency {
    const NAME: &'static str = "agency";
}

impl RestModel for Route {
    const NAME: &'static str = "route";
}

impl RestModel for Situation {
    const NAME: &'static str = "situation";
}

impl RestModel for Stop {
    const NAME: &'static str = "stop";
}

impl RestModel for Trip {
    const NAME: &'static str = "trip";
}

impl RestModel for AgencyWithCoverage {
    const NAME: &'static str = "agencyWithCoverage";
}

impl RestModel for Region {
    const NAME: &'static str = "region";
}
