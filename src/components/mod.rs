//! UI Components
//!
//! Leptos components mounted into the server-rendered page.

mod batch_controls;

pub use batch_controls::{BatchControls, TOGGLE_BUTTON_ID};
