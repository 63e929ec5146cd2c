//! Service-area configuration
//!
//! The dialog serves one bounded geography at a time. Everything that names
//! the city lives here so the core logic stays city-agnostic: the suffix for
//! free-text geocoding queries, the timezone used to stamp "now", and the
//! boundary messages spoken when a location falls outside the service area.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Configuration for the service area the dialog operates in
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// City name appended to free-text geocoding queries and spliced into
    /// boundary messages
    pub city: String,
    /// IANA timezone the "now" date/time stamp is taken in
    pub timezone: Tz,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            city: "Toronto".to_string(),
            timezone: chrono_tz::America::Toronto,
        }
    }
}

impl ServiceConfig {
    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Soft-terminal message for a location the geocoder could not place
    pub fn unknown_location_message(&self) -> String {
        format!(
            "I am sorry, I do not know where that is. Is it in {}?",
            self.city
        )
    }

    /// Hard-terminal message for a location outside the service area
    pub fn outside_service_area_message(&self) -> String {
        format!("Sorry, we are only serving {} at the moment.", self.city)
    }
}

/// Errors from configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_area() {
        let config = ServiceConfig::default();

        assert_eq!(config.city, "Toronto");
        assert_eq!(config.timezone, chrono_tz::America::Toronto);
    }

    #[test]
    fn test_from_toml() {
        let config = ServiceConfig::from_toml_str(
            "city = \"Hamilton\"\ntimezone = \"America/New_York\"\n",
        )
        .unwrap();

        assert_eq!(config.city, "Hamilton");
        assert_eq!(config.timezone, chrono_tz::America::New_York);
    }

    #[test]
    fn test_from_toml_partial_falls_back() {
        let config = ServiceConfig::from_toml_str("city = \"Ottawa\"\n").unwrap();

        assert_eq!(config.city, "Ottawa");
        assert_eq!(config.timezone, chrono_tz::America::Toronto);
    }

    #[test]
    fn test_boundary_messages_name_the_city() {
        let config = ServiceConfig::default();

        assert_eq!(
            config.unknown_location_message(),
            "I am sorry, I do not know where that is. Is it in Toronto?"
        );
        assert_eq!(
            config.outside_service_area_message(),
            "Sorry, we are only serving Toronto at the moment."
        );
    }
}
