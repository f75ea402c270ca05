//! Grid Interaction State
//!
//! Everything one page view of the attendance grid needs to remember:
//! batch mode, the selection and the keyboard focus. The DOM layer feeds
//! clicks and key commands in and renders whatever comes back out.

use crate::cell::{CellKey, Status};
use crate::config::AfterBatch;
use crate::dispatch::confirm_message;
use crate::error::BatchError;
use crate::keys::KeyCommand;
use crate::layout::GridLayout;
use crate::selection::Selection;

/// Modifier keys held during a cell click.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickModifiers {
    pub shift: bool,
    /// Ctrl, or Cmd on macOS.
    pub toggle: bool,
}

/// Effect of a key command that the DOM layer has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing to do (edge press, no focus, shortcut disabled).
    None,
    FocusMoved { from: Option<CellKey>, to: CellKey },
    QuickUpdate { key: CellKey, status: Status },
    ToggleBatchMode,
    ClearTransient,
}

/// Cells and prompt for a batch update the user still has to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub keys: Vec<CellKey>,
    pub status: Status,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct GridState {
    selection: Selection,
    focus: Option<CellKey>,
    batch_mode: bool,
    after_batch: AfterBatch,
}

impl GridState {
    pub fn new(after_batch: AfterBatch) -> Self {
        Self {
            selection: Selection::new(),
            focus: None,
            batch_mode: false,
            after_batch,
        }
    }

    pub fn batch_mode(&self) -> bool {
        self.batch_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn focus(&self) -> Option<&CellKey> {
        self.focus.as_ref()
    }

    /// Move focus to `key`, returning the previously focused cell.
    pub fn set_focus(&mut self, key: CellKey) -> Option<CellKey> {
        self.focus.replace(key)
    }

    /// Flip batch mode. Leaving batch mode drops the selection.
    pub fn toggle_batch_mode(&mut self) -> bool {
        self.batch_mode = !self.batch_mode;
        if !self.batch_mode {
            self.selection.clear();
        }
        log::debug!("batch mode {}", if self.batch_mode { "on" } else { "off" });
        self.batch_mode
    }

    /// Apply a click on a cell. Returns `false` outside batch mode, where
    /// clicks belong to the page.
    ///
    /// A shift-click whose range cannot be resolved on `layout` still adds
    /// the clicked cell, so the new anchor is always selected.
    pub fn click(
        &mut self,
        layout: &GridLayout,
        key: &CellKey,
        modifiers: ClickModifiers,
    ) -> bool {
        if !self.batch_mode {
            return false;
        }
        match self.selection.anchor().cloned() {
            Some(anchor) if modifiers.shift => {
                if self.selection.select_range(layout, &anchor, key).is_none() {
                    self.selection.insert(key);
                }
            }
            _ if modifiers.toggle => {
                self.selection.toggle(key);
            }
            _ => self.selection.select_only(key),
        }
        self.selection.set_anchor(key.clone());
        true
    }

    pub fn handle_key(&mut self, layout: &GridLayout, command: KeyCommand) -> KeyOutcome {
        match command {
            KeyCommand::Navigate(direction) => {
                let target = match &self.focus {
                    None => layout.first(),
                    Some(current) => layout.neighbor(current, direction),
                };
                match target {
                    Some(to) => {
                        let to = to.clone();
                        let from = self.set_focus(to.clone());
                        KeyOutcome::FocusMoved { from, to }
                    }
                    None => KeyOutcome::None,
                }
            }
            KeyCommand::QuickStatus(status) => match (&self.focus, self.batch_mode) {
                (Some(key), false) => KeyOutcome::QuickUpdate { key: key.clone(), status },
                _ => KeyOutcome::None,
            },
            KeyCommand::ToggleBatchMode => KeyOutcome::ToggleBatchMode,
            KeyCommand::ClearTransient => KeyOutcome::ClearTransient,
        }
    }

    /// Check a batch update to `status` can go ahead and build its prompt.
    /// Fails before anything is sent when nothing is selected.
    pub fn begin_batch(&self, status: Status) -> Result<BatchPlan, BatchError> {
        if self.selection.is_empty() {
            return Err(BatchError::Empty);
        }
        let keys = self.selection.keys();
        let prompt = confirm_message(keys.len(), status);
        Ok(BatchPlan { keys, status, prompt })
    }

    /// Settle state after a batch update has completed.
    pub fn finish_batch(&mut self) {
        self.selection.clear();
        if self.after_batch == AfterBatch::ExitBatchMode && self.batch_mode {
            self.toggle_batch_mode();
        }
    }
}
