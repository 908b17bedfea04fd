// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor History: snapshot undo/redo stacks.
//!
//! A [`History`] is the classic three-part linear history over owned
//! snapshots: a `past` stack, the current `present`, and a `future` stack
//! of states available for redo. Recording a new state pushes the old
//! present into the past (evicting the oldest entry beyond the capacity
//! bound) and clears the future; undo and redo rotate states between the
//! stacks and are no-ops at the ends.
//!
//! Recording is decoupled from mutation call sites. A [`Recorder`] pairs
//! a history with the revision counter of whatever produced the
//! snapshots: the host calls
//! [`record_if_changed`](Recorder::record_if_changed) after every
//! operation settles, and a revision that matches the last recorded one
//! is skipped, so an unchanged document is never recorded twice and no-op
//! operations never create history entries.
//!
//! The snapshot type is generic: these stacks never look inside `T`, they
//! only own it. Arbor records whole `Document` clones, which are deep and
//! share nothing with the live document.
//!
//! ## Example
//!
//! ```rust
//! use arbor_history::History;
//!
//! let mut history = History::new();
//! history.record("one");
//! history.record("two");
//!
//! assert_eq!(history.undo(), Some(&"one"));
//! assert_eq!(history.redo(), Some(&"two"));
//! assert_eq!(history.redo(), None, "redo past the end is a no-op");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;

/// Default number of past states retained.
pub const DEFAULT_CAPACITY: usize = 50;

/// A capacity-bounded linear undo/redo history of owned snapshots.
#[derive(Clone, Debug)]
pub struct History<T> {
    past: VecDeque<T>,
    present: Option<T>,
    future: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty history retaining at most `capacity` past states.
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: None,
            future: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// The maximum number of past states retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The current state, if any has been recorded.
    pub fn present(&self) -> Option<&T> {
        self.present.as_ref()
    }

    /// Number of states available to undo into.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of states available to redo into.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Whether [`undo`](Self::undo) would change the present.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether [`redo`](Self::redo) would change the present.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Records a new present state.
    ///
    /// The previous present (if any) moves onto the past stack, dropping
    /// the oldest entry beyond the capacity bound. Any redoable future is
    /// discarded: history is linear.
    pub fn record(&mut self, state: T) {
        if let Some(previous) = self.present.take() {
            self.past.push_back(previous);
            while self.past.len() > self.capacity {
                self.past.pop_front();
            }
        }
        self.present = Some(state);
        self.future.clear();
    }

    /// Steps back one state, returning the new present. No-op at the
    /// beginning of history.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop_back()?;
        if let Some(current) = self.present.take() {
            self.future.push_front(current);
        }
        self.present = Some(previous);
        self.present.as_ref()
    }

    /// Steps forward one state, returning the new present. No-op at the
    /// end of history.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop_front()?;
        if let Some(current) = self.present.take() {
            self.past.push_back(current);
        }
        self.present = Some(next);
        self.present.as_ref()
    }

    /// Discards everything, including the present.
    pub fn clear(&mut self) {
        self.past.clear();
        self.present = None;
        self.future.clear();
    }
}

/// A history plus revision-based change deduplication.
///
/// The recorder remembers the revision of the last recorded snapshot and
/// of every snapshot it restores, so hosts can call
/// [`record_if_changed`](Self::record_if_changed) unconditionally after
/// each operation: only revisions that actually differ create entries.
#[derive(Clone, Debug)]
pub struct Recorder<T> {
    history: History<(u64, T)>,
    last: Option<u64>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Recorder<T> {
    /// Creates an empty recorder with the default history capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            last: None,
        }
    }

    /// Creates an empty recorder retaining at most `capacity` past states.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: History::with_capacity(capacity),
            last: None,
        }
    }

    /// Records the snapshot produced by `make` unless `revision` matches
    /// the last recorded one. Returns whether a snapshot was recorded;
    /// `make` is not called for skipped revisions.
    pub fn record_if_changed(&mut self, revision: u64, make: impl FnOnce() -> T) -> bool {
        if self.last == Some(revision) {
            return false;
        }
        self.history.record((revision, make()));
        self.last = Some(revision);
        true
    }

    /// Steps back one snapshot, returning it for the host to re-enter.
    ///
    /// The restored snapshot's revision becomes the deduplication mark,
    /// so re-recording the just-restored state is skipped.
    pub fn undo(&mut self) -> Option<&T> {
        let (revision, state) = self.history.undo()?;
        self.last = Some(*revision);
        Some(state)
    }

    /// Steps forward one snapshot, returning it for the host to re-enter.
    pub fn redo(&mut self) -> Option<&T> {
        let (revision, state) = self.history.redo()?;
        self.last = Some(*revision);
        Some(state)
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The current snapshot, if any has been recorded.
    pub fn present(&self) -> Option<&T> {
        self.history.present().map(|(_, state)| state)
    }

    /// Discards all snapshots and the deduplication mark.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_inert() {
        let mut history: History<u32> = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.present(), None);
    }

    #[test]
    fn undo_and_redo_walk_recorded_states() {
        let mut history = History::new();
        history.record(1);
        history.record(2);

        assert_eq!(history.present(), Some(&2));
        assert_eq!(history.undo(), Some(&1));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(&2));
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_clears_the_future() {
        let mut history = History::new();
        history.record(1);
        history.record(2);
        history.record(3);
        let _ = history.undo();
        let _ = history.undo();
        assert_eq!(history.future_len(), 2);

        history.record(9);
        assert_eq!(history.future_len(), 0, "history is linear");
        assert_eq!(history.undo(), Some(&1));
    }

    #[test]
    fn capacity_evicts_the_oldest() {
        let mut history = History::with_capacity(2);
        for i in 0..5 {
            history.record(i);
        }
        assert_eq!(history.past_len(), 2);
        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.undo(), Some(&2));
        assert_eq!(history.undo(), None, "older states were evicted");
    }

    #[test]
    fn round_trip_returns_to_the_final_state() {
        let mut history = History::new();
        for i in 0..6 {
            history.record(i);
        }
        for _ in 0..5 {
            let _ = history.undo();
        }
        assert_eq!(history.present(), Some(&0));
        for _ in 0..5 {
            let _ = history.redo();
        }
        assert_eq!(history.present(), Some(&5));
    }

    #[test]
    fn zero_capacity_still_keeps_one_state() {
        let mut history = History::with_capacity(0);
        history.record(1);
        history.record(2);
        assert_eq!(history.undo(), Some(&1));
    }

    #[test]
    fn recorder_dedupes_by_revision() {
        let mut recorder: Recorder<&str> = Recorder::new();
        assert!(recorder.record_if_changed(0, || "initial"));
        assert!(!recorder.record_if_changed(0, || unreachable!("skipped revisions are not built")));
        assert!(recorder.record_if_changed(1, || "edited"));
        assert_eq!(recorder.present(), Some(&"edited"));
    }

    #[test]
    fn recorder_undo_marks_the_restored_revision() {
        let mut recorder: Recorder<&str> = Recorder::new();
        recorder.record_if_changed(0, || "initial");
        recorder.record_if_changed(1, || "edited");

        assert_eq!(recorder.undo(), Some(&"initial"));
        // The host re-enters revision 0; a follow-up record call with the
        // same revision must not create a duplicate entry.
        assert!(!recorder.record_if_changed(0, || "initial"));
        assert_eq!(recorder.redo(), Some(&"edited"));
        assert!(!recorder.record_if_changed(1, || "edited"));
    }

    #[test]
    fn recorder_supports_branching_after_undo() {
        let mut recorder: Recorder<&str> = Recorder::new();
        recorder.record_if_changed(0, || "a");
        recorder.record_if_changed(1, || "b");
        let _ = recorder.undo();

        // A new edit after undo starts a fresh branch; redo is gone.
        assert!(recorder.record_if_changed(1, || "c"));
        assert!(!recorder.can_redo());
        assert_eq!(recorder.undo(), Some(&"a"));
        assert_eq!(recorder.redo(), Some(&"c"));
    }
}
