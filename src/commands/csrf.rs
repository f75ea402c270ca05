//! CSRF Token Lookup
//!
//! Collects every place the server may have put the token.

use attendance_grid::CsrfSources;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlInputElement};

use crate::dom;

/// Current page's CSRF token, if any source provides one.
pub fn page_csrf_token(cookie_name: &str) -> Option<String> {
    let sources = CsrfSources {
        meta: dom::query(r#"meta[name="csrf-token"]"#).and_then(|el| el.get_attribute("content")),
        form_field: dom::query("[name=csrfmiddlewaretoken]")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value()),
        data_attr: dom::query("[data-csrf-token]")
            .and_then(|el| el.get_attribute("data-csrf-token")),
        cookies: dom::document()
            .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
            .and_then(|doc| doc.cookie().ok()),
    };
    let token = sources.resolve(cookie_name);
    if token.is_none() {
        log::warn!("no CSRF token on page; update requests will be rejected");
    }
    token
}
