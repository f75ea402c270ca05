//! Contrast Text Colour
//!
//! Client-side fallback for dynamically rendered tag badges. Server
//! templates use their own filter for everything they render.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

const DARK: &str = "#000";
const LIGHT: &str = "#fff";

/// Black or white text for a `#rrggbb` background.
pub fn contrast_color(hex: &str) -> &'static str {
    let hex = hex.trim().trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) else {
        return LIGHT;
    };
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 {
        DARK
    } else {
        LIGHT
    }
}

/// Publish `window.getContrastColor(hex)` for inline page scripts.
pub fn expose_on_window() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let f = Closure::<dyn Fn(JsValue) -> JsValue>::new(|hex: JsValue| {
        JsValue::from_str(contrast_color(&hex.as_string().unwrap_or_default()))
    });
    if js_sys::Reflect::set(&window, &JsValue::from_str("getContrastColor"), f.as_ref()).is_err() {
        log::warn!("could not expose getContrastColor");
    }
    f.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color("#ffffff"), "#000");
        assert_eq!(contrast_color("#000000"), "#fff");
        assert_eq!(contrast_color("ffeb3b"), "#000");
        assert_eq!(contrast_color("#1565c0"), "#fff");
    }

    #[test]
    fn test_contrast_color_bad_input() {
        assert_eq!(contrast_color(""), "#fff");
        assert_eq!(contrast_color("#abc"), "#fff");
        assert_eq!(contrast_color("#zzzzzz"), "#fff");
    }
}
