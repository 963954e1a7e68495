use std::sync::Arc;

use serde::Deserialize;

use crate::identifiers::AgencyIdentifier;
use crate::models::serde_helpers::empty_string_as_none;

/// A transit operator.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: AgencyIdentifier,
    pub name: Arc<str>,
    pub url: Arc<str>,
    pub timezone: Arc<str>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lang: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub fare_url: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub disclaimer: Option<Arc<str>>,

    #[serde(default)]
    pub private_service: bool,
}
