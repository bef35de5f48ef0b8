//! Snapshot-based undo/redo history.
//!
//! Stores a full copy of the displayed buffer at each history point. No
//! diffing: each entry costs `width * height * 4` bytes.
//!
//! Both stacks are bounded; on overflow the oldest entry is evicted.
//! Recording a new user action clears the redo stack.
//!
//! # Example
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//! use pixl_edit::History;
//!
//! let mut history = History::default();
//! let before = PixelBuffer::filled(1, 1, [1, 1, 1, 255]);
//! let after = PixelBuffer::filled(1, 1, [9, 9, 9, 255]);
//!
//! history.record(before.clone());
//! let restored = history.undo(after.clone()).unwrap();
//! assert_eq!(restored, before);
//! assert_eq!(history.redo(restored).unwrap(), after);
//! ```

use std::collections::VecDeque;

use pixl_core::PixelBuffer;
use tracing::trace;

/// Default bound for each stack.
pub const MAX_HISTORY: usize = 20;

/// Bounded undo/redo stacks of buffer snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<PixelBuffer>,
    redo: VecDeque<PixelBuffer>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    /// Creates empty history. A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo: VecDeque::with_capacity(limit),
            redo: VecDeque::with_capacity(limit),
            limit,
        }
    }

    fn push_bounded(stack: &mut VecDeque<PixelBuffer>, entry: PixelBuffer, limit: usize) {
        stack.push_back(entry);
        while stack.len() > limit {
            stack.pop_front();
        }
    }

    /// Records the state before a user action and clears redo.
    pub fn record(&mut self, snapshot: PixelBuffer) {
        Self::push_bounded(&mut self.undo, snapshot, self.limit);
        self.redo.clear();
        trace!(undo = self.undo.len(), "history record");
    }

    /// Steps back. `current` goes onto the redo stack and the previous
    /// snapshot is returned. Returns `None` (and drops nothing) if there is
    /// nothing to undo.
    pub fn undo(&mut self, current: PixelBuffer) -> Option<PixelBuffer> {
        let prev = self.undo.pop_back()?;
        Self::push_bounded(&mut self.redo, current, self.limit);
        Some(prev)
    }

    /// Steps forward; mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, current: PixelBuffer) -> Option<PixelBuffer> {
        let next = self.redo.pop_back()?;
        Self::push_bounded(&mut self.undo, current, self.limit);
        Some(next)
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Entries on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Entries on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// True if [`undo`](Self::undo) would do something.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True if [`redo`](Self::redo) would do something.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Per-stack bound.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Oldest snapshot still on the undo stack.
    pub fn oldest_undo(&self) -> Option<&PixelBuffer> {
        self.undo.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(v: u8) -> PixelBuffer {
        PixelBuffer::filled(1, 1, [v, v, v, 255])
    }

    #[test]
    fn test_record_up_to_limit() {
        let mut h = History::default();
        for i in 0..20 {
            h.record(snap(i));
            assert_eq!(h.undo_len(), i as usize + 1);
        }
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut h = History::default();
        for i in 0..21 {
            h.record(snap(i));
        }
        assert_eq!(h.undo_len(), 20);
        assert_eq!(h.oldest_undo(), Some(&snap(1)));
    }

    #[test]
    fn test_record_clears_redo() {
        let mut h = History::default();
        h.record(snap(1));
        h.undo(snap(2)).unwrap();
        assert_eq!(h.redo_len(), 1);
        h.record(snap(3));
        assert_eq!(h.redo_len(), 0);
        assert!(!h.can_redo());
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut h = History::default();
        assert_eq!(h.undo(snap(5)), None);
        assert_eq!(h.redo(snap(5)), None);
        assert_eq!(h.undo_len(), 0);
        assert_eq!(h.redo_len(), 0);
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut h = History::default();
        h.record(snap(10));
        let current = snap(20);
        let restored = h.undo(current.clone()).unwrap();
        assert_eq!(restored, snap(10));
        assert_eq!(h.redo(restored).unwrap(), current);
        assert_eq!(h.undo_len(), 1);
        assert_eq!(h.redo_len(), 0);
    }

    #[test]
    fn test_redo_stack_bounded() {
        let mut h = History::new(3);
        for i in 0..3 {
            h.record(snap(i));
        }
        let mut current = snap(100);
        while let Some(prev) = h.undo(current.clone()) {
            current = prev;
        }
        assert_eq!(h.redo_len(), 3);
        assert_eq!(current, snap(0));
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut h = History::new(0);
        h.record(snap(1));
        h.record(snap(2));
        assert_eq!(h.limit(), 1);
        assert_eq!(h.undo_len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut h = History::default();
        h.record(snap(1));
        h.record(snap(2));
        h.undo(snap(3));
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
