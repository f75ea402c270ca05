//! Grid Configuration
//!
//! Page-level settings, optionally supplied by the server as JSON in a
//! `data-grid-config` attribute. Every field has a default matching the
//! attendance calendar template.

use serde::{Deserialize, Serialize};

use crate::cell::CellKey;
use crate::error::ConfigError;

/// What happens to batch mode once a batch update has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterBatch {
    /// Clear the selection and stay in batch mode.
    #[default]
    ClearSelection,
    /// Clear the selection and leave batch mode.
    ExitBatchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Per-cell update endpoint; student id and date are appended.
    pub update_endpoint: String,
    /// Id prefix marking the swappable element inside a cell.
    pub fragment_id_prefix: String,
    pub cell_selector: String,
    pub grid_selector: String,
    /// Element that receives the injected batch controls.
    pub controls_container_selector: String,
    pub status_selector_container_id: String,
    pub notes_modal_container_id: String,
    pub csrf_cookie_name: String,
    pub after_batch: AfterBatch,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            update_endpoint: "/academics/attendance/quick-update".to_string(),
            fragment_id_prefix: "cell-".to_string(),
            cell_selector: ".attendance-cell".to_string(),
            grid_selector: ".table-bordered".to_string(),
            controls_container_selector: ".card.mb-4 .card-body .row".to_string(),
            status_selector_container_id: "status-selector-container".to_string(),
            notes_modal_container_id: "course-notes-modal-container".to_string(),
            csrf_cookie_name: "csrftoken".to_string(),
            after_batch: AfterBatch::default(),
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Update URL for one cell, e.g. `/academics/attendance/quick-update/3/2025-11-27/`.
    pub fn update_url(&self, key: &CellKey) -> String {
        format!(
            "{}/{}/{}/",
            self.update_endpoint.trim_end_matches('/'),
            key.student_id,
            key.date_str()
        )
    }

    /// Containers emptied by Escape.
    pub fn transient_container_ids(&self) -> [&str; 2] {
        [self.status_selector_container_id.as_str(), self.notes_modal_container_id.as_str()]
    }
}
