use std::sync::Arc;

use serde::Deserialize;

use crate::identifiers::*;
use crate::models::serde_helpers::{empty_id_as_none, empty_string_as_none};
use crate::models::types::DirectionId;

/// A single scheduled vehicle run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripIdentifier,
    pub route_id: RouteIdentifier,
    pub service_id: ServiceIdentifier,

    /// Display name (e.g., "Downtown Seattle")
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trip_headsign: Option<Arc<str>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trip_short_name: Option<Arc<str>>,

    #[serde(default, deserialize_with = "optional_direction")]
    pub direction_id: Option<DirectionId>,

    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub block_id: Option<BlockIdentifier>,

    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub shape_id: Option<ShapeIdentifier>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub route_short_name: Option<Arc<str>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub time_zone: Option<Arc<str>>,
}

// "" is the API's way of saying the feed has no direction for this trip.
fn optional_direction<'de, D>(deserializer: D) -> Result<Option<DirectionId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(v) => DirectionId::deserialize(v).map(Some).map_err(serde::de::Error::custom),
    }
}
