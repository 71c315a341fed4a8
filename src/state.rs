/// Popup UI state and its presentation

use crate::error::{AnalysisError, ErrorCategory};
use crate::prediction::Verdict;

/// What the popup is showing. Exactly one state is visible at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    /// `url` is the shortened tab URL once it has passed validation
    Loading { url: Option<String> },
    Result {
        verdict: Verdict,
        url: String,
        label: String,
    },
    Error {
        category: ErrorCategory,
        detail: String,
    },
}

impl UiState {
    pub fn from_error(error: &AnalysisError) -> Self {
        UiState::Error {
            category: error.category(),
            detail: error.to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading { .. })
    }

    /// Result and Error stay on screen until the next analysis
    pub fn is_terminal(&self) -> bool {
        matches!(self, UiState::Result { .. } | UiState::Error { .. })
    }

    /// A manual check needs the stored settings and no analysis in flight
    pub fn can_check(&self, settings_loaded: bool) -> bool {
        settings_loaded && !self.is_loading()
    }
}

impl Default for UiState {
    fn default() -> Self {
        UiState::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Safe,
    Danger,
    Warning,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Safe => "legitimate",
            Tone::Danger => "phishing",
            Tone::Warning => "warning",
        }
    }
}

/// Everything the popup view needs to draw a state
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub title: &'static str,
    pub message: &'static str,
    pub tone: Tone,
    pub icon: &'static str,
    pub url: Option<String>,
    pub label: Option<String>,
    pub show_spinner: bool,
    pub show_card: bool,
}

pub fn present(state: &UiState) -> Presentation {
    match state {
        UiState::Idle => Presentation {
            title: "",
            message: "",
            tone: Tone::Neutral,
            icon: "",
            url: None,
            label: None,
            show_spinner: false,
            show_card: false,
        },
        UiState::Loading { url } => Presentation {
            title: "Analyzing...",
            message: "Checking this page with the PhishBlock API.",
            tone: Tone::Neutral,
            icon: "🔍",
            url: url.clone(),
            label: None,
            show_spinner: true,
            show_card: false,
        },
        UiState::Result { verdict, url, label } => Presentation {
            title: verdict.title(),
            message: verdict.message(),
            tone: match verdict {
                Verdict::Phishing => Tone::Danger,
                Verdict::Legitimate => Tone::Safe,
            },
            icon: match verdict {
                Verdict::Phishing => "⚠️",
                Verdict::Legitimate => "✅",
            },
            url: Some(url.clone()),
            label: Some(format!("Result: {}", label)),
            show_spinner: false,
            show_card: true,
        },
        UiState::Error { category, .. } => Presentation {
            title: category.title(),
            message: category.user_message(),
            tone: match category {
                ErrorCategory::InvalidUrl => Tone::Warning,
                ErrorCategory::ApiOffline => Tone::Danger,
            },
            icon: match category {
                ErrorCategory::InvalidUrl => "🚫",
                ErrorCategory::ApiOffline => "🔌",
            },
            url: None,
            label: None,
            show_spinner: false,
            show_card: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_shows_nothing() {
        let view = present(&UiState::Idle);

        assert!(!view.show_spinner);
        assert!(!view.show_card);
    }

    #[test]
    fn test_loading_hides_card() {
        let view = present(&UiState::Loading {
            url: Some("https://example.com".to_string()),
        });

        assert!(view.show_spinner);
        assert!(!view.show_card);
        assert_eq!(view.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_phishing_result() {
        let view = present(&UiState::Result {
            verdict: Verdict::Phishing,
            url: "https://example.com/login".to_string(),
            label: "Phishing".to_string(),
        });

        assert_eq!(view.title, "PHISHING");
        assert_eq!(view.tone, Tone::Danger);
        assert_eq!(view.tone.css_class(), "phishing");
        assert_eq!(view.label.as_deref(), Some("Result: Phishing"));
        assert!(view.show_card);
        assert!(!view.show_spinner);
    }

    #[test]
    fn test_legitimate_result() {
        let view = present(&UiState::Result {
            verdict: Verdict::Legitimate,
            url: "https://example.com".to_string(),
            label: "Legitimate".to_string(),
        });

        assert_eq!(view.title, "LEGITIMATE");
        assert_eq!(view.tone.css_class(), "legitimate");
    }

    #[test]
    fn test_error_views() {
        let view = present(&UiState::from_error(&AnalysisError::UnsupportedScheme(
            "chrome://extensions".to_string(),
        )));
        assert_eq!(view.title, "Invalid URL");
        assert_eq!(view.message, "Cannot analyze local or browser-specific pages.");
        assert_eq!(view.tone, Tone::Warning);

        let view = present(&UiState::from_error(&AnalysisError::Status(503)));
        assert_eq!(view.title, "API Offline");
        assert_eq!(view.tone, Tone::Danger);
        assert!(view.show_card);
    }

    #[test]
    fn test_check_waits_for_settings() {
        assert!(!UiState::Idle.can_check(false));
        assert!(UiState::Idle.can_check(true));

        let loading = UiState::Loading { url: None };
        assert!(!loading.can_check(true));

        let failed = UiState::from_error(&AnalysisError::Status(503));
        assert!(failed.can_check(true));
        assert!(!failed.can_check(false));
    }

    #[test]
    fn test_error_keeps_detail() {
        let state = UiState::from_error(&AnalysisError::Timeout(5000));

        assert_eq!(
            state,
            UiState::Error {
                category: ErrorCategory::ApiOffline,
                detail: "no response within 5000 ms".to_string(),
            }
        );
        assert!(state.is_terminal());
        assert!(!state.is_loading());
    }
}
