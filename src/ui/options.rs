/// Options page for the prediction API settings

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;

use crate::browser::{load_settings, save_settings};
use crate::settings::Settings;

#[derive(Clone, PartialEq)]
enum OptionsState {
    Loading,
    Idle,
    Saving,
    Saved,
    Error(String),
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| OptionsState::Loading);
    let endpoint = use_state(String::new);
    let timeout = use_state(String::new);
    let auto_analyze = use_state(|| true);

    let fill_form = {
        let endpoint = endpoint.clone();
        let timeout = timeout.clone();
        let auto_analyze = auto_analyze.clone();

        move |settings: &Settings| {
            endpoint.set(settings.endpoint.clone());
            timeout.set(settings.timeout_ms.to_string());
            auto_analyze.set(settings.auto_analyze);
        }
    };

    // Load stored settings on mount
    {
        let state = state.clone();
        let fill_form = fill_form.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_settings().await {
                    Ok(settings) => {
                        fill_form(&settings);
                        state.set(OptionsState::Idle);
                    }
                    Err(e) => {
                        fill_form(&Settings::new());
                        state.set(OptionsState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_endpoint_input = {
        let endpoint = endpoint.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                endpoint.set(input.value());
            }
        })
    };

    let on_timeout_input = {
        let timeout = timeout.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                timeout.set(input.value());
            }
        })
    };

    let on_auto_change = {
        let auto_analyze = auto_analyze.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                auto_analyze.set(input.checked());
            }
        })
    };

    let on_save = {
        let state = state.clone();
        let endpoint = endpoint.clone();
        let timeout = timeout.clone();
        let auto_analyze = auto_analyze.clone();

        Callback::from(move |_| {
            let settings = match Settings::from_form(&endpoint, &timeout, *auto_analyze) {
                Ok(settings) => settings,
                Err(e) => {
                    state.set(OptionsState::Error(e.to_string()));
                    return;
                }
            };

            let state = state.clone();
            state.set(OptionsState::Saving);
            spawn_local(async move {
                match save_settings(&settings).await {
                    Ok(()) => {
                        log::info!("Settings saved: {:?}", settings);
                        state.set(OptionsState::Saved);
                    }
                    Err(e) => state.set(OptionsState::Error(e)),
                }
            });
        })
    };

    let on_reset = {
        let state = state.clone();
        Callback::from(move |_| {
            fill_form(&Settings::new());
            state.set(OptionsState::Idle);
        })
    };

    let is_busy = matches!(*state, OptionsState::Loading | OptionsState::Saving);

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"PhishBlock Settings"}</h1>
            </div>

            {match &*state {
                OptionsState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading settings..."}</p>
                    </div>
                },
                OptionsState::Saved => html! {
                    <Alert r#type={AlertType::Success} title={"Settings saved"} inline={true}>
                        {"New settings apply the next time the popup opens."}
                    </Alert>
                },
                OptionsState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                OptionsState::Idle | OptionsState::Saving => html! {}
            }}

            <div class="flex-column-gap">
                <label class="field-label">{"Prediction API endpoint"}</label>
                <input
                    id="endpoint"
                    type="text"
                    class="search-input"
                    value={(*endpoint).clone()}
                    oninput={on_endpoint_input}
                    disabled={is_busy}
                />

                <label class="field-label">{"Request timeout (ms)"}</label>
                <input
                    id="timeout"
                    type="number"
                    class="search-input"
                    value={(*timeout).clone()}
                    oninput={on_timeout_input}
                    disabled={is_busy}
                />

                <label class="field-label">
                    <input
                        type="checkbox"
                        checked={*auto_analyze}
                        onchange={on_auto_change}
                        disabled={is_busy}
                    />
                    {" Analyze the current page when the popup opens"}
                </label>

                <div class="button-row">
                    <Button onclick={on_save} disabled={is_busy} variant={ButtonVariant::Primary}>
                        {"💾 Save"}
                    </Button>
                    <Button onclick={on_reset} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"↩️ Reset to Defaults"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
