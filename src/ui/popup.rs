/// Popup UI: analyzes the active tab and shows the verdict

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;

use crate::browser::{load_settings, open_options_page, ChromeTabs, FetchClient, PlatformSleeper};
use crate::controller::{AnalysisTracker, PopupController};
use crate::settings::Settings;
use crate::state::{present, UiState};
use crate::ui::components::{StatusCard, UrlLine};

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(UiState::default);
    let settings = use_state(|| None::<Settings>);
    let tracker = use_memo((), |_| AnalysisTracker::new());

    // Load settings on mount, then analyze right away unless disabled
    {
        let state = state.clone();
        let settings = settings.clone();
        let tracker = (*tracker).clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded = match load_settings().await {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        log::warn!("Using default settings: {}", e);
                        Settings::new()
                    }
                };

                settings.set(Some(loaded.clone()));
                if loaded.auto_analyze {
                    analyze(&state, &loaded, tracker).await;
                }
            });
            || ()
        });
    }

    // Manual re-check
    let on_check = {
        let state = state.clone();
        let settings = settings.clone();
        let tracker = (*tracker).clone();

        Callback::from(move |_| {
            let state = state.clone();
            let Some(settings) = (*settings).clone() else {
                return;
            };
            let tracker = tracker.clone();

            spawn_local(async move {
                analyze(&state, &settings, tracker).await;
            });
        })
    };

    let on_options = Callback::from(move |_| {
        spawn_local(async move {
            if let Err(e) = open_options_page().await {
                log::warn!("{}", e);
            }
        });
    });

    let view = present(&state);
    let can_check = state.can_check(settings.is_some());
    let check_label = if state.is_terminal() {
        "🔄 Check Again"
    } else {
        "🔍 Check This Page"
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"🎣 PhishBlock"}</h1>

            if let Some(url) = view.url.clone() {
                <UrlLine url={url} />
            }

            if view.show_spinner {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{view.title}</p>
                </div>
            }

            if view.show_card {
                <StatusCard view={view.clone()} />
            }

            if *state == UiState::Idle && settings.is_some() {
                <p class="message-text">{"Automatic analysis is off. Check this page manually."}</p>
            }

            <div class="flex-column-gap">
                <Button onclick={on_check} disabled={!can_check} variant={ButtonVariant::Primary} block={true}>
                    {check_label}
                </Button>
                <Button onclick={on_options} variant={ButtonVariant::Secondary} block={true}>
                    {"⚙️ Settings"}
                </Button>
            </div>

            <p class="footer-popup">
                {"PhishBlock v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn analyze(state: &UseStateHandle<UiState>, settings: &Settings, tracker: AnalysisTracker) {
    let controller = PopupController::new(
        ChromeTabs,
        FetchClient::new(settings.endpoint.clone()),
        PlatformSleeper,
        settings.timeout(),
        tracker,
    );

    let started = js_sys::Date::now();
    match controller.analyze_current_url(state).await {
        Some(outcome) => {
            log::info!(
                "Analysis settled in {:.0} ms: {:?}",
                js_sys::Date::now() - started,
                outcome
            );
        }
        None => log::debug!("Analysis superseded by a newer run"),
    }
}
