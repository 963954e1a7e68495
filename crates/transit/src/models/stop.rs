use std::sync::Arc;

use geo::Point;
use serde::Deserialize;

use crate::identifiers::{RouteIdentifier, StopIdentifier};
use crate::models::serde_helpers::empty_string_as_none;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WheelchairBoarding {
    #[default]
    Unknown,
    Accessible,
    NotAccessible,
    #[serde(other)]
    Unrecognized,
}

/// A physical boarding location.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    pub lat: f64,
    pub lon: f64,

    /// Rider-facing stop number, often painted on the sign.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub code: Option<Arc<str>>,

    /// Compass heading of travel, e.g. "N", "SW".
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub direction: Option<Arc<str>>,

    /// GTFS location type: 0 = stop/platform, 1 = station.
    #[serde(default)]
    pub location_type: u8,

    #[serde(default)]
    pub route_ids: Vec<RouteIdentifier>,

    #[serde(default)]
    pub wheelchair_boarding: WheelchairBoarding,
}

impl Stop {
    pub fn location(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    pub fn is_station(&self) -> bool {
        self.location_type == 1
    }
}
