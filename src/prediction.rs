/// Wire types for the prediction API and verdict interpretation
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Endpoint of the locally hosted prediction API
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// The only label the API uses for a phishing verdict
pub const PHISHING_LABEL: &str = "Phishing";

/// Body of `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub url: String,
}

impl PredictionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        PredictionRequest { url: url.into() }
    }
}

/// Successful answer from `POST /predict`
///
/// `prediction` is kept as raw JSON: the API normally sends "Phishing" or
/// "Legitimate", but any value that is not exactly "Phishing" counts as
/// legitimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: serde_json::Value,
    #[serde(default)]
    pub url: Option<String>,
}

impl PredictionResponse {
    pub fn verdict(&self) -> Verdict {
        match self.prediction.as_str() {
            Some(PHISHING_LABEL) => Verdict::Phishing,
            _ => Verdict::Legitimate,
        }
    }

    /// Label as sent by the API, for display
    pub fn label(&self) -> String {
        match &self.prediction {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "Unknown".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Phishing,
    Legitimate,
}

impl Verdict {
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Phishing => "PHISHING",
            Verdict::Legitimate => "LEGITIMATE",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Phishing => {
                "This site looks like a phishing attempt. Do not enter passwords or personal information."
            }
            Verdict::Legitimate => "This site appears to be legitimate. No phishing indicators were found.",
        }
    }
}

/// Parse the body of a 2xx answer. Only a JSON object is accepted; serde
/// would otherwise fill the struct positionally from an array.
pub fn parse_prediction(body: &str) -> Result<PredictionResponse, AnalysisError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AnalysisError::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(AnalysisError::Parse(format!("expected a JSON object, got {}", value)));
    }

    serde_json::from_value(value).map_err(|e| AnalysisError::Parse(e.to_string()))
}
