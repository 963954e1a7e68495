//! Core data types and enums shared by the REST models.

use serde::{de, Deserialize, Deserializer, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// GTFS route types, including the extended (hierarchical) codes some
/// agencies publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteType {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableTram,
    AerialLift,
    Funicular,
    Trolleybus,
    Monorail,
    /// A code this library does not know; preserved verbatim.
    Other(u16),
}

impl RouteType {
    pub fn from_gtfs(value: u16) -> Option<Self> {
        match value {
            0 | 900..=999 => Some(Self::Tram),
            1 | 400..=499 => Some(Self::Subway),
            2 | 100..=199 => Some(Self::Rail),
            3 | 200..=299 | 700..=799 => Some(Self::Bus),
            4 | 1000..=1099 | 1200 => Some(Self::Ferry),
            5 => Some(Self::CableTram),
            6 | 1300..=1399 => Some(Self::AerialLift),
            7 | 1400..=1499 => Some(Self::Funicular),
            11 | 800 => Some(Self::Trolleybus),
            12 => Some(Self::Monorail),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u16::deserialize(deserializer)?;
        Ok(Self::from_gtfs(value).unwrap_or(Self::Other(value)))
    }
}

/// Trip direction (0 = outbound, 1 = inbound per GTFS)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum DirectionId {
    Outbound = 0,
    Inbound = 1,
}

impl DirectionId {
    pub fn from_gtfs(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Outbound),
            1 => Some(Self::Inbound),
            _ => None,
        }
    }
}

// The REST API sends the direction as a string ("0"/"1"), but some
// deployments emit a bare integer.
impl<'de> Deserialize<'de> for DirectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n,
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid direction id {s:?}")))?,
        };

        Self::from_gtfs(value)
            .ok_or_else(|| de::Error::custom(format!("invalid direction id {value}")))
    }
}

/// Severity of a service alert, as reported by the situation feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    #[default]
    Unknown,
    NoImpact,
    Undefined,
    VerySlight,
    Slight,
    Normal,
    Severe,
    VerySevere,
    #[serde(other)]
    Unrecognized,
}

// ============================================================================
// Errors
// ============================================================================

/// Failures reported by collaborators (fetchers, stores).
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
