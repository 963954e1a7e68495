//! Field adapters for the quirks of the OBA JSON encoding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};

/// The REST API emits `""` for absent optional strings.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Arc<str>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(Arc::from))
}

/// Same as [`empty_string_as_none`], for optional identifiers.
pub fn empty_id_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(T::from))
}

/// Timestamps are milliseconds since the Unix epoch.
pub fn millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}")))
}

/// Optional millisecond timestamp where `0` means "unset".
pub fn optional_millis<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(ms) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}
