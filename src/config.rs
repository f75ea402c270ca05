//! Page Configuration
//!
//! The server may override grid defaults with a JSON `data-grid-config`
//! attribute on `<body>`.

use attendance_grid::GridConfig;

use crate::dom;

const CONFIG_ATTR: &str = "data-grid-config";

pub fn page_config() -> GridConfig {
    let Some(raw) = dom::body().and_then(|body| body.get_attribute(CONFIG_ATTR)) else {
        return GridConfig::default();
    };
    GridConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}; using defaults");
        GridConfig::default()
    })
}
