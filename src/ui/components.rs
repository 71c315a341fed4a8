/// Reusable UI components

use yew::prelude::*;

use crate::state::Presentation;

#[derive(Properties, PartialEq)]
pub struct UrlLineProps {
    pub url: String,
}

/// The (shortened) URL under analysis
#[function_component(UrlLine)]
pub fn url_line(props: &UrlLineProps) -> Html {
    html! {
        <div class="url-container">
            <span class="url-label">{"Current page"}</span>
            <code class="url-display" title={props.url.clone()}>{&props.url}</code>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusCardProps {
    pub view: Presentation,
}

/// Verdict or error card; the tone picks the colour scheme
#[function_component(StatusCard)]
pub fn status_card(props: &StatusCardProps) -> Html {
    let view = &props.view;

    html! {
        <div class={classes!("result-card", view.tone.css_class())}>
            <div class="result-header">
                <span class="result-icon">{view.icon}</span>
                <h2 class="result-title">{view.title}</h2>
            </div>
            <p class="message-paragraph">{view.message}</p>
            if let Some(label) = &view.label {
                <p class="result-label">{label}</p>
            }
        </div>
    }
}
