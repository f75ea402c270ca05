//! Batch Controls State Store
//!
//! Uses Leptos reactive_stores so the injected controls re-render from the
//! grid controller's updates.

use reactive_stores::Store;

/// View state mirrored from `GridState` after every change
#[derive(Clone, Debug, Default, Store)]
pub struct GridUiState {
    /// Whether multi-select batch mode is on
    pub batch_mode: bool,
    /// Size of the selection set
    pub selected_count: usize,
}

/// Type alias for the store
pub type GridUiStore = Store<GridUiState>;
