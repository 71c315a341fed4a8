/// PhishBlock - Chrome Extension for Phishing Detection
/// Built with Rust + WASM + Yew

pub mod browser;
pub mod controller;
pub mod error;
pub mod prediction;
pub mod settings;
pub mod state;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the URL check for JavaScript access
#[wasm_bindgen]
pub fn is_analyzable_url(url: &str) -> bool {
    tab_data::is_analyzable_url(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
