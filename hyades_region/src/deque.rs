// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FIFO queue with an advancing front index and periodic compaction.

use alloc::vec::Vec;

/// Default number of pops after which the consumed prefix is dropped.
pub const DEFAULT_COMPACT_THRESHOLD: usize = 3000;

/// First-in first-out queue.
///
/// Pops only advance a front index; once it passes the compaction threshold the
/// consumed prefix is dropped in one pass. Ordering is unaffected.
#[derive(Clone, Debug)]
pub struct Deque<T> {
    items: Vec<Option<T>>,
    front: usize,
    compact_threshold: usize,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Create an empty queue with [`DEFAULT_COMPACT_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_compact_threshold(DEFAULT_COMPACT_THRESHOLD)
    }

    /// Create an empty queue that compacts after `threshold` pops.
    pub fn with_compact_threshold(threshold: usize) -> Self {
        Self {
            items: Vec::new(),
            front: 0,
            compact_threshold: threshold,
        }
    }

    /// Append to the back.
    pub fn push(&mut self, item: T) {
        self.items.push(Some(item));
    }

    /// Take from the front. Returns `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.get_mut(self.front)?.take();
        self.front += 1;
        if self.front > self.compact_threshold {
            self.compact();
        }
        item
    }

    /// Front item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.front).and_then(Option::as_ref)
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len() - self.front
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.front == self.items.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.items.clear();
        self.front = 0;
    }

    /// Queued items, front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items[self.front..].iter().filter_map(Option::as_ref)
    }

    fn compact(&mut self) {
        self.items.drain(..self.front);
        self.front = 0;
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Some));
    }
}
