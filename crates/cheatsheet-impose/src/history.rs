//! Undo/redo over option snapshots
//!
//! Every edit stores a complete [`CheatSheetOptions`] value. Undo and redo
//! only move a cursor over the stored snapshots; nothing is mutated in
//! place.

use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::options::CheatSheetOptions;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct OptionsHistory {
    snapshots: VecDeque<CheatSheetOptions>,
    cursor: usize,
    capacity: usize,
}

impl Default for OptionsHistory {
    fn default() -> Self {
        Self::new(CheatSheetOptions::default())
    }
}

impl OptionsHistory {
    pub fn new(initial: CheatSheetOptions) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// History keeping at most `capacity` snapshots (at least one)
    pub fn with_capacity(initial: CheatSheetOptions, capacity: usize) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// The snapshot in effect
    pub fn current(&self) -> &CheatSheetOptions {
        &self.snapshots[self.cursor]
    }

    /// Record a new snapshot and make it current.
    ///
    /// Discards any redo states. Returns `false` when `options` equals the
    /// current snapshot and nothing was recorded.
    pub fn apply(&mut self, options: CheatSheetOptions) -> bool {
        if *self.current() == options {
            return false;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(options);

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
        true
    }

    /// Derive a new snapshot from the current one and record it
    pub fn update(&mut self, edit: impl FnOnce(&mut CheatSheetOptions)) -> bool {
        let mut next = self.current().clone();
        edit(&mut next);
        self.apply(next)
    }

    pub fn undo(&mut self) -> Option<&CheatSheetOptions> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&CheatSheetOptions> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
