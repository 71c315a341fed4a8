/// UI module exports

pub mod components;
pub mod options;
pub mod popup;
