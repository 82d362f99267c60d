//! Bounded FIFO pool
//!
//! Ring buffer over a `VecDeque`: pushing past capacity evicts the oldest
//! items first. Backs both the particle pool and the per-line vertex lists.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct BoundedPool<T> {
    items: VecDeque<T>,
    capacity: usize,
    /// Monotonic counter: total items ever pushed
    total_pushed: u64,
}

impl<T> Default for BoundedPool<T> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<T> BoundedPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            total_pushed: 0,
        }
    }

    /// Append an item, then evict the oldest until back under capacity.
    /// Returns the number of evicted items.
    #[inline]
    pub fn push(&mut self, item: T) -> usize {
        self.items.push_back(item);
        self.total_pushed += 1;
        self.evict_excess()
    }

    /// Change capacity, evicting oldest items if the pool is now over it.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        self.evict_excess()
    }

    fn evict_excess(&mut self) -> usize {
        let excess = self.items.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.items.drain(..excess);
        }
        excess
    }

    /// Keep only items matching the predicate; returns how many were removed.
    pub fn retain<F>(&mut self, f: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(f);
        before - self.items.len()
    }

    /// Oldest-first traversal
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::collections::vec_deque::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a BoundedPool<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut pool = BoundedPool::new(3);
        assert_eq!(pool.push(1), 0);
        assert_eq!(pool.push(2), 0);
        assert_eq!(pool.push(3), 0);
        assert_eq!(pool.push(4), 1);
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(pool.total_pushed(), 4);
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut pool = BoundedPool::new(0);
        assert_eq!(pool.push('a'), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_shrink_capacity() {
        let mut pool = BoundedPool::new(10);
        for i in 0..6 {
            pool.push(i);
        }
        assert_eq!(pool.set_capacity(4), 2);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.front(), Some(&2));
        assert_eq!(pool.back(), Some(&5));
    }

    #[test]
    fn test_retain_counts_removed() {
        let mut pool = BoundedPool::new(10);
        for i in 0..10 {
            pool.push(i);
        }
        assert_eq!(pool.retain(|&i| i % 2 == 0), 5);
        assert_eq!(pool.len(), 5);
        // Order survives retain
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    }
}
