//! Attendance Quick-Update
//!
//! `POST {endpoint}/{student}/{date}/` with `status=CODE`; the response is the
//! refreshed cell badge as an HTML fragment.

use async_trait::async_trait;
use attendance_grid::{CellKey, CellUpdater, GridConfig, Status, UpdateError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::page_csrf_token;

pub struct QuickUpdateClient {
    config: GridConfig,
}

impl QuickUpdateClient {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    fn request(&self, key: &CellKey, status: Status) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        headers.set("Content-Type", "application/x-www-form-urlencoded")?;
        if let Some(token) = page_csrf_token(&self.config.csrf_cookie_name) {
            headers.set("X-CSRFToken", &token)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&format!("status={}", status.code())));

        Request::new_with_str_and_init(&self.config.update_url(key), &init)
    }
}

#[async_trait(?Send)]
impl CellUpdater for QuickUpdateClient {
    async fn update(&self, key: &CellKey, status: Status) -> Result<String, UpdateError> {
        let request = self.request(key, status).map_err(network)?;
        let window = web_sys::window().ok_or_else(|| UpdateError::Network("no window".into()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;
        if !response.ok() {
            return Err(UpdateError::Http(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(body)?).await.map_err(body)?;
        text.as_string()
            .ok_or_else(|| UpdateError::Body("response body is not text".into()))
    }
}

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

fn network(e: JsValue) -> UpdateError {
    UpdateError::Network(describe(e))
}

fn body(e: JsValue) -> UpdateError {
    UpdateError::Body(describe(e))
}
