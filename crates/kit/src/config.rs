//! Application-level configuration.

use oba_transit::operation::QueueConfig;
use oba_transit::provider::RegionProviderConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("an API key is required")]
    MissingApiKey,
}

/// Everything the kit needs to talk to an OBA deployment.
///
/// Every field has a default, so a JSON document only has to name what it
/// overrides:
///
/// ```json
/// {"api_key": "TEST", "queue": {"max_concurrent_operations": 2}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Sent as the `key` query parameter on every REST call.
    pub api_key: String,

    pub regions: RegionProviderConfig,

    pub queue: QueueConfig,

    /// Minimum log level for `oba_*` modules ("trace" through "error").
    pub log_level: Option<String>,
}

impl KitConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oba_transit::provider::DEFAULT_REGIONS_URL;

    #[test]
    fn test_partial_config() {
        let config = KitConfig::from_json_str(
            r#"{"api_key": "TEST", "queue": {"max_concurrent_operations": 2}}"#,
        )
        .unwrap();

        assert_eq!(config.api_key, "TEST");
        assert_eq!(config.queue.max_concurrent_operations, 2);
        assert_eq!(config.regions.regions_url, DEFAULT_REGIONS_URL);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            KitConfig::from_json_str("{}"),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            KitConfig::from_json_str("{\"api_key\": 7}"),
            Err(ConfigError::Parse(_))
        ));
    }
}
