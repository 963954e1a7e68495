use std::sync::Arc;

use serde::Deserialize;

use crate::identifiers::{AgencyIdentifier, RouteIdentifier};
use crate::models::serde_helpers::empty_string_as_none;
use crate::models::types::RouteType;

/// A transit route (e.g., "Route 44", "Link 1 Line")
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteIdentifier,
    pub agency_id: AgencyIdentifier,

    #[serde(rename = "type")]
    pub route_type: RouteType,

    /// Short name (e.g., "1", "A", "Red")
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub short_name: Option<Arc<str>>,

    /// Long name (e.g., "Ballard - University District")
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub long_name: Option<Arc<str>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<Arc<str>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub url: Option<Arc<str>>,

    /// Hex RGB without the leading '#', e.g. "FF0000"
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub color: Option<Arc<str>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub text_color: Option<Arc<str>>,
}

impl Route {
    /// The name a rider would recognise: short name, falling back to the
    /// long name and finally the identifier.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(self.id.as_str())
    }
}
