//! Keyed row reconciliation for live snapshot tables.
//!
//! Every frame from a live socket carries the full current set of
//! keys, not a delta. [`RowTable::reconcile`] maps such a snapshot
//! onto bound row state: rows are inserted for new keys, refreshed in
//! place for known keys, and dropped for keys that disappeared, so the
//! bound row set always equals the key set of the latest snapshot.

use std::collections::HashMap;

/// Binding between a snapshot record and the row state rendered for it.
pub trait TableRow {
    type Record;

    /// Build a fresh row for a key appearing for the first time.
    fn build(key: &str, record: &Self::Record) -> Self;

    /// Refresh the measurement cells in place. Interactive cell state
    /// (pickers, in-progress edits) must be left untouched.
    fn refresh(&mut self, record: &Self::Record);
}

/// A table of rows bound 1:1 to the keys of the latest snapshot.
///
/// Keys are kept in an explicit insertion-order sequence, newest
/// first, so the most recently discovered sensors sit directly under
/// the header. Updates and removals never reorder surviving rows.
#[derive(Debug)]
pub struct RowTable<R> {
    order: Vec<String>,
    rows: HashMap<String, R>,
}

impl<R> Default for RowTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowTable<R> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
        self.rows.get_mut(key)
    }

    /// Rows in display order (newest first).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key).map(|row| (key.as_str(), row)))
    }

    /// Drop every bound row.
    pub fn clear(&mut self) {
        self.order.clear();
        self.rows.clear();
    }
}

impl<R: TableRow> RowTable<R> {
    /// Apply a full snapshot.
    ///
    /// New keys get a fresh row inserted at the top of the order;
    /// bound keys are refreshed in place, preserving row identity;
    /// keys absent from the snapshot lose their row and binding. A key
    /// that disappears and later returns is treated as brand new.
    pub fn reconcile(&mut self, snapshot: &HashMap<String, R::Record>) {
        for (key, record) in snapshot {
            match self.rows.get_mut(key) {
                Some(row) => row.refresh(record),
                None => {
                    self.order.insert(0, key.clone());
                    self.rows.insert(key.clone(), R::build(key, record));
                }
            }
        }

        let rows = &mut self.rows;
        self.order.retain(|key| {
            let keep = snapshot.contains_key(key);
            if !keep {
                rows.remove(key);
            }
            keep
        });
    }
}
