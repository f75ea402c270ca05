//! CSRF Token Resolution

use percent_encoding::percent_decode_str;

/// Candidate token values read from the page, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct CsrfSources {
    /// `<meta name="csrf-token" content="...">`
    pub meta: Option<String>,
    /// Hidden `csrfmiddlewaretoken` form field.
    pub form_field: Option<String>,
    /// `data-csrf-token` attribute.
    pub data_attr: Option<String>,
    /// Raw `document.cookie` string.
    pub cookies: Option<String>,
}

impl CsrfSources {
    /// First non-empty token, falling back to the named cookie.
    pub fn resolve(&self, cookie_name: &str) -> Option<String> {
        [&self.meta, &self.form_field, &self.data_attr]
            .into_iter()
            .flatten()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| cookie_value(self.cookies.as_deref()?, cookie_name))
    }
}

/// Look up one cookie in a `document.cookie` string and percent-decode it.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then(|| percent_decode_str(v).decode_utf8_lossy().into_owned())
    })
}
