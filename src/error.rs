/// Error types for URL analysis and settings
use thiserror::Error;

/// Everything that can stop an analysis from producing a verdict.
///
/// The popup only ever shows the collapsed [`ErrorCategory`]; the variants
/// are kept apart so logs and tests can tell the failures apart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("no active tab in the current window")]
    NoActiveTab,

    #[error("active tab has no URL")]
    MissingUrl,

    #[error("unsupported URL: {0}")]
    UnsupportedScheme(String),

    #[error("tab query failed: {0}")]
    TabQuery(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("prediction API answered with HTTP {0}")]
    Status(u16),

    #[error("malformed prediction response: {0}")]
    Parse(String),

    #[error("no response within {0} ms")]
    Timeout(u32),
}

impl AnalysisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::NoActiveTab
            | AnalysisError::MissingUrl
            | AnalysisError::UnsupportedScheme(_)
            | AnalysisError::TabQuery(_) => ErrorCategory::InvalidUrl,
            AnalysisError::Transport(_)
            | AnalysisError::Status(_)
            | AnalysisError::Parse(_)
            | AnalysisError::Timeout(_) => ErrorCategory::ApiOffline,
        }
    }
}

/// User-facing error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidUrl,
    ApiOffline,
}

impl ErrorCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidUrl => "Invalid URL",
            ErrorCategory::ApiOffline => "API Offline",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidUrl => "Cannot analyze local or browser-specific pages.",
            ErrorCategory::ApiOffline => {
                "The PhishBlock API is not responding. Make sure the backend server is running, then try again."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("endpoint is not a valid URL: {0}")]
    InvalidEndpoint(String),

    #[error("endpoint must use http or https, got {0}")]
    UnsupportedEndpointScheme(String),

    #[error("timeout is not a number: {0}")]
    InvalidTimeout(String),

    #[error("timeout must be between {min} and {max} ms, got {value}")]
    TimeoutOutOfRange { value: u32, min: u32, max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_failures_are_invalid_url() {
        assert_eq!(AnalysisError::NoActiveTab.category(), ErrorCategory::InvalidUrl);
        assert_eq!(AnalysisError::MissingUrl.category(), ErrorCategory::InvalidUrl);
        assert_eq!(
            AnalysisError::UnsupportedScheme("chrome://extensions".to_string()).category(),
            ErrorCategory::InvalidUrl
        );
        assert_eq!(
            AnalysisError::TabQuery("no permission".to_string()).category(),
            ErrorCategory::InvalidUrl
        );
    }

    #[test]
    fn test_request_failures_collapse_to_api_offline() {
        let failures = vec![
            AnalysisError::Transport("connection refused".to_string()),
            AnalysisError::Status(503),
            AnalysisError::Parse("expected value at line 1 column 1".to_string()),
            AnalysisError::Timeout(5000),
        ];

        for failure in failures {
            assert_eq!(failure.category(), ErrorCategory::ApiOffline, "{}", failure);
        }
    }

    #[test]
    fn test_category_text() {
        assert_eq!(ErrorCategory::InvalidUrl.title(), "Invalid URL");
        assert_eq!(
            ErrorCategory::InvalidUrl.user_message(),
            "Cannot analyze local or browser-specific pages."
        );
        assert_eq!(ErrorCategory::ApiOffline.title(), "API Offline");
        assert!(ErrorCategory::ApiOffline.user_message().contains("not responding"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            AnalysisError::Status(500).to_string(),
            "prediction API answered with HTTP 500"
        );
        assert_eq!(
            SettingsError::TimeoutOutOfRange { value: 10, min: 500, max: 60_000 }.to_string(),
            "timeout must be between 500 and 60000 ms, got 10"
        );
    }
}
