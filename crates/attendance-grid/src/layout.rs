//! Grid Layout
//!
//! Explicit ordering of the grid's cells. The flat sequence is the page's
//! top-to-bottom, left-to-right order and is the only notion of "position"
//! used by range selection and left/right movement. Rows carry the column
//! structure used by up/down movement.

use std::collections::HashMap;

use crate::cell::CellKey;
use crate::keys::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
enum GridRow {
    /// Flat indices of the cells in this row, in column order.
    Cells(Vec<usize>),
    /// Full-width merged row (e.g. a week separator) holding no cells.
    Divider,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    flat: usize,
    row: usize,
    col: usize,
}

/// Ordered cells of one rendered grid.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    cells: Vec<CellKey>,
    rows: Vec<GridRow>,
    slots: HashMap<CellKey, Slot>,
}

/// Row-by-row builder, fed from the DOM scan or from tests.
#[derive(Debug, Default)]
pub struct GridLayoutBuilder {
    layout: GridLayout,
}

impl GridLayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of cells. Empty rows are ignored; a key already placed
    /// earlier in the grid is skipped.
    pub fn row(mut self, keys: impl IntoIterator<Item = CellKey>) -> Self {
        let layout = &mut self.layout;
        let row = layout.rows.len();
        let mut indices = Vec::new();
        for key in keys {
            if layout.slots.contains_key(&key) {
                log::warn!("duplicate grid cell {key}, keeping first occurrence");
                continue;
            }
            let flat = layout.cells.len();
            layout.slots.insert(key.clone(), Slot { flat, row, col: indices.len() });
            layout.cells.push(key);
            indices.push(flat);
        }
        if !indices.is_empty() {
            layout.rows.push(GridRow::Cells(indices));
        }
        self
    }

    pub fn divider(mut self) -> Self {
        self.layout.rows.push(GridRow::Divider);
        self
    }

    pub fn build(self) -> GridLayout {
        self.layout
    }
}

impl GridLayout {
    /// Single-row layout, for callers that only care about flat order.
    pub fn from_sequence(keys: impl IntoIterator<Item = CellKey>) -> Self {
        GridLayoutBuilder::new().row(keys).build()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellKey] {
        &self.cells
    }

    pub fn first(&self) -> Option<&CellKey> {
        self.cells.first()
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Flat position of a cell.
    pub fn position(&self, key: &CellKey) -> Option<usize> {
        self.slots.get(key).map(|slot| slot.flat)
    }

    /// Cells between `a` and `b` inclusive, independent of argument order.
    pub fn span(&self, a: &CellKey, b: &CellKey) -> Option<&[CellKey]> {
        let (pa, pb) = (self.position(a)?, self.position(b)?);
        Some(&self.cells[pa.min(pb)..=pa.max(pb)])
    }

    /// Cell reached by moving one step from `from`. `None` at the grid edge
    /// or when the adjacent row has no cell in this column.
    pub fn neighbor(&self, from: &CellKey, direction: Direction) -> Option<&CellKey> {
        let slot = *self.slots.get(from)?;
        let target = match direction {
            Direction::Left => slot.flat.checked_sub(1)?,
            Direction::Right => slot.flat + 1,
            Direction::Up => self.vertical(slot, (0..slot.row).rev())?,
            Direction::Down => self.vertical(slot, slot.row + 1..self.rows.len())?,
        };
        self.cells.get(target)
    }

    fn vertical(&self, slot: Slot, mut rows: impl Iterator<Item = usize>) -> Option<usize> {
        rows.find_map(|r| match &self.rows[r] {
            GridRow::Cells(cells) => Some(cells),
            GridRow::Divider => None,
        })?
        .get(slot.col)
        .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(student: u32, day: u32) -> CellKey {
        CellKey::new(student, NaiveDate::from_ymd_opt(2025, 11, day).unwrap())
    }

    /// Two students per week block, three days per row, divider between weeks.
    fn two_week_grid() -> GridLayout {
        GridLayoutBuilder::new()
            .row([key(1, 3), key(1, 4), key(1, 5)])
            .row([key(2, 3), key(2, 4), key(2, 5)])
            .divider()
            .row([key(1, 10), key(1, 11)])
            .row([key(2, 10), key(2, 11)])
            .build()
    }

    #[test]
    fn test_flat_order_and_positions() {
        let grid = two_week_grid();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.first(), Some(&key(1, 3)));
        assert_eq!(grid.position(&key(2, 3)), Some(3));
        assert_eq!(grid.position(&key(2, 11)), Some(9));
        assert_eq!(grid.position(&key(9, 1)), None);
    }

    #[test]
    fn test_span_is_order_independent() {
        let grid = two_week_grid();
        let forward = grid.span(&key(1, 4), &key(2, 4)).unwrap();
        let backward = grid.span(&key(2, 4), &key(1, 4)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, &[key(1, 4), key(1, 5), key(2, 3), key(2, 4)]);
        assert!(grid.span(&key(1, 4), &key(9, 9)).is_none());
    }

    #[test]
    fn test_left_right_cross_rows_without_wrapping() {
        let grid = two_week_grid();
        assert_eq!(grid.neighbor(&key(1, 5), Direction::Right), Some(&key(2, 3)));
        assert_eq!(grid.neighbor(&key(2, 3), Direction::Left), Some(&key(1, 5)));
        assert_eq!(grid.neighbor(&key(1, 3), Direction::Left), None);
        assert_eq!(grid.neighbor(&key(2, 11), Direction::Right), None);
    }

    #[test]
    fn test_up_down_keep_column_and_skip_dividers() {
        let grid = two_week_grid();
        assert_eq!(grid.neighbor(&key(1, 4), Direction::Down), Some(&key(2, 4)));
        assert_eq!(grid.neighbor(&key(2, 4), Direction::Down), Some(&key(1, 11)));
        assert_eq!(grid.neighbor(&key(1, 10), Direction::Up), Some(&key(2, 3)));
        assert_eq!(grid.neighbor(&key(1, 4), Direction::Up), None);
        assert_eq!(grid.neighbor(&key(2, 10), Direction::Down), None);
    }

    #[test]
    fn test_down_into_shorter_row_stays_put() {
        let grid = two_week_grid();
        assert_eq!(grid.neighbor(&key(2, 5), Direction::Down), None);
    }

    #[test]
    fn test_duplicate_keys_are_ignored() {
        let grid = GridLayoutBuilder::new()
            .row([key(1, 3), key(1, 4)])
            .row([key(1, 3), key(2, 3)])
            .build();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.position(&key(2, 3)), Some(2));
        assert_eq!(grid.neighbor(&key(1, 3), Direction::Down), Some(&key(2, 3)));
    }
}
