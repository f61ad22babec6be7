use std::collections::VecDeque;

use crate::engine::progression::LearningStats;
use crate::engine::queue::LearningQueue;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Full engine state captured before a review action. Owns its data, so
/// later mutation of the live queue never reaches a stored snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub queue: LearningQueue,
    pub stats: LearningStats,
}

/// Bounded undo stack. Once full, pushing drops the oldest entry.
#[derive(Clone, Debug)]
pub struct HistoryLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryLog<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_HISTORY_CAPACITY
        } else {
            capacity
        };
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for HistoryLog<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
