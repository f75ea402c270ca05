//! Selection Model
//!
//! Set of selected cells plus the anchor used as the fixed end of a
//! shift-click range.

use std::collections::BTreeSet;

use crate::cell::CellKey;
use crate::layout::GridLayout;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    cells: BTreeSet<CellKey>,
    anchor: Option<CellKey>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellKey> {
        self.cells.iter()
    }

    pub fn keys(&self) -> Vec<CellKey> {
        self.cells.iter().cloned().collect()
    }

    pub fn anchor(&self) -> Option<&CellKey> {
        self.anchor.as_ref()
    }

    pub fn set_anchor(&mut self, key: CellKey) {
        self.anchor = Some(key);
    }

    /// Flip membership of `key`. Returns whether it is now selected.
    pub fn toggle(&mut self, key: &CellKey) -> bool {
        if self.cells.remove(key) {
            false
        } else {
            self.cells.insert(key.clone());
            true
        }
    }

    /// Add `key` if not already selected. Returns whether it was added.
    pub fn insert(&mut self, key: &CellKey) -> bool {
        self.cells.insert(key.clone())
    }

    /// Replace the selection with just `key`.
    pub fn select_only(&mut self, key: &CellKey) {
        self.clear();
        self.cells.insert(key.clone());
    }

    /// Add every cell between `anchor` and `target` inclusive and return
    /// how many were newly added. `None` when either end is not on the grid,
    /// in which case nothing changes.
    pub fn select_range(
        &mut self,
        layout: &GridLayout,
        anchor: &CellKey,
        target: &CellKey,
    ) -> Option<usize> {
        let Some(span) = layout.span(anchor, target) else {
            log::warn!("range {anchor}..{target} is not on the grid");
            return None;
        };
        let before = self.cells.len();
        self.cells.extend(span.iter().cloned());
        Some(self.cells.len() - before)
    }

    /// Deselect everything and forget the anchor.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.anchor = None;
    }
}
