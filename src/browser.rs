/// Browser-backed implementations of the controller services

use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};
use yew::functional::UseStateHandle;

use crate::controller::{PredictionClient, Sleeper, StateSink, TabSource};
use crate::error::AnalysisError;
use crate::prediction::{parse_prediction, PredictionRequest, PredictionResponse};
use crate::settings::{Settings, SETTINGS_KEY};
use crate::state::UiState;
use crate::tab_data::TabInfo;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openOptionsPage() -> Result<(), JsValue>;
}

/// Active tab via chrome.tabs.query
pub struct ChromeTabs;

impl TabSource for ChromeTabs {
    async fn active_tab(&self) -> Result<Option<TabInfo>, AnalysisError> {
        let tab_js = getActiveTab()
            .await
            .map_err(|e| AnalysisError::TabQuery(format!("{:?}", e)))?;

        if tab_js.is_null() || tab_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(tab_js)
            .map(Some)
            .map_err(|e| AnalysisError::TabQuery(format!("Failed to parse tab: {:?}", e)))
    }
}

/// Prediction client over the Fetch API
pub struct FetchClient {
    endpoint: String,
}

impl FetchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        FetchClient {
            endpoint: endpoint.into(),
        }
    }
}

fn transport(e: JsValue) -> AnalysisError {
    AnalysisError::Transport(format!("{:?}", e))
}

/// `POST <endpoint>` with a JSON `{"url": ...}` body
pub fn build_request(endpoint: &str, request: &PredictionRequest) -> Result<Request, AnalysisError> {
    let body = serde_json::to_string(request)
        .map_err(|e| AnalysisError::Transport(format!("Failed to serialize request: {}", e)))?;

    let headers = Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    Request::new_with_str_and_init(endpoint, &init).map_err(transport)
}

/// Map a fetch response to a prediction: non-2xx is `Status`, anything
/// but a JSON object is `Parse`
pub async fn read_response(response: Response) -> Result<PredictionResponse, AnalysisError> {
    if !response.ok() {
        return Err(AnalysisError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(|e| AnalysisError::Parse(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| AnalysisError::Parse("response body is not text".to_string()))?;

    parse_prediction(&text)
}

impl PredictionClient for FetchClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, AnalysisError> {
        let fetch_request = build_request(&self.endpoint, request)?;
        let window = web_sys::window()
            .ok_or_else(|| AnalysisError::Transport("no window available".to_string()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;

        read_response(response).await
    }
}

/// Deadline timer on the browser event loop
pub struct PlatformSleeper;

impl Sleeper for PlatformSleeper {
    async fn sleep(&self, duration: Duration) {
        yew::platform::time::sleep(duration).await;
    }
}

impl StateSink for UseStateHandle<UiState> {
    fn publish(&self, state: UiState) {
        log::debug!("UI state -> {:?}", state);
        self.set(state);
    }
}

pub async fn load_settings() -> Result<Settings, String> {
    let stored = getStorage(SETTINGS_KEY)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    if stored.is_null() || stored.is_undefined() {
        return Ok(Settings::new());
    }

    let value: serde_json::Value = serde_wasm_bindgen::from_value(stored)
        .map_err(|e| format!("Failed to parse storage: {:?}", e))?;

    Ok(Settings::from_stored(Some(value)))
}

pub async fn save_settings(settings: &Settings) -> Result<(), String> {
    let settings_js = serde_wasm_bindgen::to_value(settings)
        .map_err(|e| format!("Failed to serialize settings: {:?}", e))?;

    setStorage(SETTINGS_KEY, settings_js)
        .await
        .map_err(|e| format!("Failed to save storage: {:?}", e))
}

pub async fn open_options_page() -> Result<(), String> {
    openOptionsPage()
        .await
        .map_err(|e| format!("Failed to open options: {:?}", e))
}
