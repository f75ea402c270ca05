//! Batch Dispatcher
//!
//! Fires one quick-update request per selected cell, all concurrently,
//! and collects every outcome. A failed cell never fails the batch.

use async_trait::async_trait;
use futures::future::join_all;

use crate::cell::{CellKey, Status};
use crate::error::UpdateError;

/// Per-cell update endpoint. Returns the refreshed cell's HTML fragment.
#[async_trait(?Send)]
pub trait CellUpdater {
    async fn update(&self, key: &CellKey, status: Status) -> Result<String, UpdateError>;
}

/// Receives fragments to splice into the page.
pub trait FragmentSink {
    fn swap(&mut self, key: &CellKey, html: &str) -> Result<(), UpdateError>;
}

/// Settled outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<(CellKey, String)>,
    pub failed: Vec<(CellKey, UpdateError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Swap every successful fragment into `sink`. Failed cells are left
    /// alone. Returns how many cells were actually replaced.
    pub fn apply(&self, sink: &mut impl FragmentSink) -> usize {
        let mut swapped = 0;
        for (key, html) in &self.succeeded {
            match sink.swap(key, html) {
                Ok(()) => swapped += 1,
                Err(e) => log::warn!("could not swap fragment for {key}: {e}"),
            }
        }
        swapped
    }
}

/// Confirmation prompt shown before a batch is sent.
pub fn confirm_message(count: usize, status: Status) -> String {
    format!("Mark {} cell(s) as {}?", count, status.code().replace('_', " "))
}

/// Send one update, logging a failure.
pub async fn quick_update<U>(
    updater: &U,
    key: &CellKey,
    status: Status,
) -> Result<String, UpdateError>
where
    U: CellUpdater + ?Sized,
{
    let result = updater.update(key, status).await;
    if let Err(e) = &result {
        log::error!("Error updating {key}: {e}");
    }
    result
}

/// Update every key to `status` concurrently and wait for all of them.
pub async fn dispatch_batch<U>(updater: &U, keys: &[CellKey], status: Status) -> BatchReport
where
    U: CellUpdater + ?Sized,
{
    log::debug!("dispatching {} update(s) to {status}", keys.len());
    let results = join_all(keys.iter().map(|key| async move {
        (key.clone(), quick_update(updater, key, status).await)
    }))
    .await;

    let mut report = BatchReport::default();
    for (key, result) in results {
        match result {
            Ok(html) => report.succeeded.push((key, html)),
            Err(e) => report.failed.push((key, e)),
        }
    }
    log::debug!(
        "batch finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AfterBatch;
    use crate::grid::GridState;
    use crate::layout::GridLayout;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    fn key(student: u32, day: u32) -> CellKey {
        CellKey::new(student, NaiveDate::from_ymd_opt(2025, 11, day).unwrap())
    }

    /// Records every call; keys in `failing` get a network error.
    #[derive(Default)]
    struct FakeServer {
        calls: RefCell<Vec<(CellKey, Status)>>,
        failing: HashSet<CellKey>,
    }

    #[async_trait(?Send)]
    impl CellUpdater for FakeServer {
        async fn update(&self, key: &CellKey, status: Status) -> Result<String, UpdateError> {
            self.calls.borrow_mut().push((key.clone(), status));
            if self.failing.contains(key) {
                return Err(UpdateError::Network("connection reset".into()));
            }
            Ok(format!(r#"<span id="cell-{key}">{}</span>"#, status.code()))
        }
    }

    /// Rendered badge text per cell.
    struct FakePage(HashMap<CellKey, String>);

    impl FragmentSink for FakePage {
        fn swap(&mut self, key: &CellKey, html: &str) -> Result<(), UpdateError> {
            let badge = self
                .0
                .get_mut(key)
                .ok_or_else(|| UpdateError::MissingFragment("cell-".into()))?;
            *badge = html.to_string();
            Ok(())
        }
    }

    #[test]
    fn test_confirm_message() {
        assert_eq!(confirm_message(2, Status::Absent), "Mark 2 cell(s) as ABSENT?");
        assert_eq!(confirm_message(5, Status::FieldTrip), "Mark 5 cell(s) as FIELD TRIP?");
    }

    #[test]
    fn test_dispatch_sends_one_request_per_cell() {
        let server = FakeServer::default();
        let keys = vec![key(1, 3), key(1, 4), key(2, 3)];
        let report = block_on(dispatch_batch(&server, &keys, Status::Holiday));

        assert_eq!(report.total(), 3);
        assert!(report.failed.is_empty());
        let calls = server.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, status)| *status == Status::Holiday));
    }

    #[test]
    fn test_partial_failure_updates_only_succeeded_cells() {
        let (ok, bad) = (key(3, 27), key(3, 28));
        let server = FakeServer { failing: HashSet::from([bad.clone()]), ..Default::default() };
        let mut page = FakePage(HashMap::from([
            (ok.clone(), "PRESENT".to_string()),
            (bad.clone(), "PRESENT".to_string()),
        ]));
        let layout = GridLayout::from_sequence([ok.clone(), bad.clone()]);
        let mut grid = GridState::new(AfterBatch::ClearSelection);
        grid.toggle_batch_mode();
        grid.selection_mut().select_range(&layout, &ok, &bad);

        let keys = grid.selection().keys();
        let report = block_on(dispatch_batch(&server, &keys, Status::Absent));
        assert_eq!(report.apply(&mut page), 1);
        grid.finish_batch();

        assert!(grid.selection().is_empty());
        assert!(grid.batch_mode());
        assert!(page.0[&ok].contains("ABSENT"));
        assert_eq!(page.0[&bad], "PRESENT");
        assert_eq!(report.failed, vec![(bad, UpdateError::Network("connection reset".into()))]);
    }

    #[test]
    fn test_missing_cell_on_page_is_not_counted() {
        let server = FakeServer::default();
        let mut page = FakePage(HashMap::new());
        let report = block_on(dispatch_batch(&server, &[key(4, 1)], Status::Sick));
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.apply(&mut page), 0);
    }

    #[test]
    fn test_digit_two_on_focused_cell_sends_one_absent_update() {
        use crate::grid::KeyOutcome;
        use crate::keys::{KeyCommand, KeyContext};

        let server = FakeServer::default();
        let layout = GridLayout::from_sequence([key(3, 27), key(3, 28)]);
        let mut grid = GridState::new(AfterBatch::ClearSelection);
        grid.set_focus(key(3, 28));

        let ctx = KeyContext { grid_present: true, ..Default::default() };
        let command = KeyCommand::classify("2", ctx).unwrap();
        let outcome = grid.handle_key(&layout, command);
        let KeyOutcome::QuickUpdate { key: target, status } = outcome else {
            panic!("expected a quick update");
        };
        block_on(quick_update(&server, &target, status)).unwrap();

        assert_eq!(server.calls.borrow().as_slice(), &[(key(3, 28), Status::Absent)]);
    }

    #[test]
    fn test_quick_update_single_call() {
        let server = FakeServer::default();
        let html = block_on(quick_update(&server, &key(3, 27), Status::Absent)).unwrap();
        assert!(html.contains("cell-3-2025-11-27"));
        assert_eq!(server.calls.borrow().as_slice(), &[(key(3, 27), Status::Absent)]);
    }
}
