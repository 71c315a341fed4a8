/// Extension settings persisted in chrome.storage.local

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SettingsError;
use crate::prediction::DEFAULT_ENDPOINT;

/// chrome.storage.local key holding the serialized settings
pub const SETTINGS_KEY: &str = "phishblock_settings";

pub const DEFAULT_TIMEOUT_MS: u32 = 5_000;
pub const MIN_TIMEOUT_MS: u32 = 500;
pub const MAX_TIMEOUT_MS: u32 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_ms: u32,
    /// Analyze the active tab as soon as the popup opens
    pub auto_analyze: bool,
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auto_analyze: true,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }

    /// Check the settings before they are saved
    pub fn validate(&self) -> Result<(), SettingsError> {
        let endpoint = url::Url::parse(self.endpoint.trim())
            .map_err(|e| SettingsError::InvalidEndpoint(format!("{} ({})", self.endpoint, e)))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedEndpointScheme(endpoint.scheme().to_string()));
        }

        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(SettingsError::TimeoutOutOfRange {
                value: self.timeout_ms,
                min: MIN_TIMEOUT_MS,
                max: MAX_TIMEOUT_MS,
            });
        }

        Ok(())
    }

    /// Build settings from the raw values of the options form
    pub fn from_form(endpoint: &str, timeout: &str, auto_analyze: bool) -> Result<Self, SettingsError> {
        let timeout_ms = timeout
            .trim()
            .parse::<u32>()
            .map_err(|_| SettingsError::InvalidTimeout(timeout.trim().to_string()))?;

        let settings = Settings {
            endpoint: endpoint.trim().to_string(),
            timeout_ms,
            auto_analyze,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Settings read back from storage. Anything unreadable or invalid
    /// falls back to the defaults.
    pub fn from_stored(stored: Option<serde_json::Value>) -> Self {
        let Some(value) = stored else {
            return Settings::new();
        };

        match serde_json::from_value::<Settings>(value) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Ignoring stored settings: {}", e);
                    Settings::new()
                }
            },
            Err(e) => {
                log::warn!("Failed to parse stored settings: {}", e);
                Settings::new()
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();

        assert_eq!(settings.endpoint, "http://127.0.0.1:5000/predict");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert!(settings.auto_analyze);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_from_stored_missing() {
        assert_eq!(Settings::from_stored(None), Settings::new());
    }

    #[test]
    fn test_from_stored_partial() {
        let settings = Settings::from_stored(Some(json!({ "timeout_ms": 2500 })));

        assert_eq!(settings.timeout_ms, 2500);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert!(settings.auto_analyze);
    }

    #[test]
    fn test_from_stored_invalid_falls_back() {
        let settings = Settings::from_stored(Some(json!({ "timeout_ms": 10 })));
        assert_eq!(settings, Settings::new());

        let settings = Settings::from_stored(Some(json!("garbage")));
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_validate_endpoint() {
        let mut settings = Settings::new();

        settings.endpoint = "http://localhost:8000/predict".to_string();
        assert_eq!(settings.validate(), Ok(()));

        settings.endpoint = "localhost:8000".to_string();
        assert!(settings.validate().is_err());

        settings.endpoint = "not a url".to_string();
        assert!(matches!(settings.validate(), Err(SettingsError::InvalidEndpoint(_))));

        settings.endpoint = "ftp://127.0.0.1/predict".to_string();
        assert_eq!(
            settings.validate(),
            Err(SettingsError::UnsupportedEndpointScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_validate_timeout() {
        let mut settings = Settings::new();

        settings.timeout_ms = MIN_TIMEOUT_MS;
        assert_eq!(settings.validate(), Ok(()));

        settings.timeout_ms = MAX_TIMEOUT_MS + 1;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::TimeoutOutOfRange {
                value: MAX_TIMEOUT_MS + 1,
                min: MIN_TIMEOUT_MS,
                max: MAX_TIMEOUT_MS,
            })
        );
    }

    #[test]
    fn test_from_form() {
        let settings = Settings::from_form(" http://127.0.0.1:8080/predict ", " 3000 ", false).unwrap();

        assert_eq!(settings.endpoint, "http://127.0.0.1:8080/predict");
        assert_eq!(settings.timeout_ms, 3000);
        assert!(!settings.auto_analyze);
    }

    #[test]
    fn test_from_form_rejects_bad_input() {
        assert_eq!(
            Settings::from_form(DEFAULT_ENDPOINT, "5s", true),
            Err(SettingsError::InvalidTimeout("5s".to_string()))
        );
        assert_eq!(
            Settings::from_form(DEFAULT_ENDPOINT, "-1", true),
            Err(SettingsError::InvalidTimeout("-1".to_string()))
        );
        assert!(matches!(
            Settings::from_form(DEFAULT_ENDPOINT, "100", true),
            Err(SettingsError::TimeoutOutOfRange { value: 100, .. })
        ));
        assert!(Settings::from_form("", "5000", true).is_err());
    }

    #[test]
    fn test_serialization() {
        let settings = Settings {
            endpoint: "http://10.0.0.2:5000/predict".to_string(),
            timeout_ms: 8000,
            auto_analyze: false,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, settings);
    }
}
