//! Bounded collection utilities for the request log and alert history

use std::collections::VecDeque;

/// Helper trait for bounded VecDeque operations
pub(crate) trait BoundedPush<T> {
    /// Append `value`, then drop the oldest entries until at most `max_size` remain
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        self.push_back(value);
        while self.len() > max_size {
            self.pop_front();
        }
    }
}
