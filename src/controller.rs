/// Popup controller: active tab -> prediction API -> UI state
///
/// The browser services the controller talks to sit behind the traits in
/// this module, so the whole analysis cycle runs the same way against
/// chrome.* bridges in the popup and against mocks in tests.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either};

use crate::error::AnalysisError;
use crate::prediction::{PredictionRequest, PredictionResponse};
use crate::state::UiState;
use crate::tab_data::{display_url, is_analyzable_url, TabInfo};

/// Source of the active tab in the current window
#[allow(async_fn_in_trait)]
pub trait TabSource {
    async fn active_tab(&self) -> Result<Option<TabInfo>, AnalysisError>;
}

/// Client for `POST /predict`
#[allow(async_fn_in_trait)]
pub trait PredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, AnalysisError>;
}

/// Timer used to bound how long a prediction may take
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Receiver of UI state transitions
pub trait StateSink {
    fn publish(&self, state: UiState);
}

/// Hands out one ticket per analysis. Only the newest ticket may publish, so
/// a slow response from an earlier run can never overwrite a later one.
#[derive(Debug, Clone, Default)]
pub struct AnalysisTracker {
    generation: Rc<Cell<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.get() == ticket.0
    }
}

pub struct PopupController<T, C, S> {
    tabs: T,
    client: C,
    sleeper: S,
    timeout: Duration,
    tracker: AnalysisTracker,
}

impl<T, C, S> PopupController<T, C, S>
where
    T: TabSource,
    C: PredictionClient,
    S: Sleeper,
{
    pub fn new(tabs: T, client: C, sleeper: S, timeout: Duration, tracker: AnalysisTracker) -> Self {
        PopupController {
            tabs,
            client,
            sleeper,
            timeout,
            tracker,
        }
    }

    /// Run one full analysis of the active tab.
    ///
    /// Publishes `Loading` first and then exactly one terminal state. Returns
    /// that terminal state, or `None` when a newer analysis started in the
    /// meantime and this one's outcome was dropped.
    pub async fn analyze_current_url(&self, sink: &impl StateSink) -> Option<UiState> {
        let ticket = self.tracker.begin();
        sink.publish(UiState::Loading { url: None });

        let outcome = match self.run(ticket, sink).await {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Analysis failed: {}", e);
                UiState::from_error(&e)
            }
        };

        if !self.tracker.is_current(ticket) {
            log::debug!("Dropping outcome of superseded analysis: {:?}", outcome);
            return None;
        }

        sink.publish(outcome.clone());
        Some(outcome)
    }

    async fn run(&self, ticket: Ticket, sink: &impl StateSink) -> Result<UiState, AnalysisError> {
        let tab = self
            .with_deadline(self.tabs.active_tab())
            .await
            .ok_or_else(|| AnalysisError::TabQuery(format!("no answer within {} ms", self.timeout_ms())))??
            .ok_or(AnalysisError::NoActiveTab)?;
        let host = tab.host();
        let url = tab
            .url
            .filter(|url| !url.is_empty())
            .ok_or(AnalysisError::MissingUrl)?;

        if !is_analyzable_url(&url) {
            return Err(AnalysisError::UnsupportedScheme(url));
        }

        let shown = display_url(&url);
        if self.tracker.is_current(ticket) {
            sink.publish(UiState::Loading {
                url: Some(shown.clone()),
            });
        }

        let request = PredictionRequest::new(url);
        let response = self
            .with_deadline(self.client.predict(&request))
            .await
            .ok_or(AnalysisError::Timeout(self.timeout_ms()))??;
        let verdict = response.verdict();
        log::info!("Verdict for {}: {:?}", host.as_deref().unwrap_or(&shown), verdict);

        Ok(UiState::Result {
            verdict,
            url: shown,
            label: response.label(),
        })
    }

    /// Run `work` against the configured timeout; `None` when it expires first
    async fn with_deadline<F: Future>(&self, work: F) -> Option<F::Output> {
        let deadline = self.sleeper.sleep(self.timeout);
        futures::pin_mut!(work, deadline);

        match future::select(work, deadline).await {
            Either::Left((output, _)) => Some(output),
            Either::Right(((), _)) => None,
        }
    }

    fn timeout_ms(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}
