//! Attendance Grid Model
//!
//! DOM-free state for the attendance calendar: cell keys, statuses,
//! multi-select, keyboard navigation over rows/columns, and the
//! per-cell quick-update dispatcher.

mod cell;
mod config;
mod csrf;
mod dispatch;
mod error;
mod grid;
mod keys;
mod layout;
mod selection;

pub use cell::{CellKey, Status};
pub use config::{AfterBatch, GridConfig};
pub use csrf::{cookie_value, CsrfSources};
pub use dispatch::{
    confirm_message, dispatch_batch, quick_update, BatchReport, CellUpdater, FragmentSink,
};
pub use error::{BatchError, CellKeyError, ConfigError, UpdateError};
pub use grid::{BatchPlan, ClickModifiers, GridState, KeyOutcome};
pub use keys::{Direction, KeyCommand, KeyContext};
pub use layout::{GridLayout, GridLayoutBuilder};
pub use selection::Selection;
