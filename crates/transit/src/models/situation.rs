//! Service alerts.
//!
//! A situation carries translated text blocks, the windows during which it
//! applies, and selectors describing which agencies, routes, stops, or trips
//! it affects. Selectors are kept as identifiers; matching them against
//! decoded entities is left to the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::identifiers::*;
use crate::models::serde_helpers::{empty_id_as_none, empty_string_as_none, millis, optional_millis};
use crate::models::types::Severity;

/// A text block with its language tag.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TranslatedString {
    pub value: Arc<str>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lang: Option<Arc<str>>,
}

/// `to == None` means the window is open-ended.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeWindow {
    #[serde(deserialize_with = "millis")]
    pub from: DateTime<Utc>,
    #[serde(default, deserialize_with = "optional_millis")]
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && self.to.map_or(true, |to| at <= to)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedEntity {
    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub agency_id: Option<AgencyIdentifier>,
    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub route_id: Option<RouteIdentifier>,
    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub stop_id: Option<StopIdentifier>,
    #[serde(default, deserialize_with = "empty_id_as_none")]
    pub trip_id: Option<TripIdentifier>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub direction_id: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub application_id: Option<Arc<str>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequence {
    pub condition: Arc<str>,
    #[serde(default)]
    pub condition_details: Option<ConditionDetails>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDetails {
    #[serde(default)]
    pub diversion_path: Option<EncodedPolyline>,
    #[serde(default)]
    pub diversion_stop_ids: Vec<StopIdentifier>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EncodedPolyline {
    pub points: Arc<str>,
    #[serde(default)]
    pub length: u32,
}

/// A service alert or advisory.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    pub id: SituationIdentifier,

    #[serde(deserialize_with = "millis")]
    pub creation_time: DateTime<Utc>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub reason: Option<Arc<str>>,

    #[serde(default)]
    pub summary: Option<TranslatedString>,
    #[serde(default)]
    pub description: Option<TranslatedString>,
    #[serde(default)]
    pub advice: Option<TranslatedString>,
    #[serde(default)]
    pub url: Option<TranslatedString>,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub active_windows: Vec<TimeWindow>,
    #[serde(default)]
    pub publication_windows: Vec<TimeWindow>,

    #[serde(default)]
    pub all_affects: Vec<AffectedEntity>,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
}

impl Situation {
    /// A situation without active windows is considered always active.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.active_windows.is_empty() || self.active_windows.iter().any(|w| w.contains(at))
    }

    pub fn affects_route(&self, route_id: &RouteIdentifier) -> bool {
        self.all_affects
            .iter()
            .any(|a| a.route_id.as_ref() == Some(route_id))
    }

    pub fn affects_stop(&self, stop_id: &StopIdentifier) -> bool {
        self.all_affects
            .iter()
            .any(|a| a.stop_id.as_ref() == Some(stop_id))
    }
}
