//! Server Endpoint Wrappers
//!
//! Frontend bindings to the server's HTML-fragment endpoints.

mod attendance;
mod csrf;

pub use attendance::QuickUpdateClient;
pub use csrf::page_csrf_token;
