//! A binary min-heap over key-value entries.

use core::fmt;

use crate::CircularArray;

/// A binary min-heap of key-value entries, ordered by key.
///
/// Entries are stored in heap order inside a [`CircularArray`], parent before
/// children, with the smallest key at the front. Push and pop are O(log n);
/// peeking at the minimum is O(1). Duplicate keys are allowed.
///
/// # Examples
///
/// ```
/// use osrb_tree::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.push(3, "c");
/// heap.push(1, "a");
/// heap.push(2, "b");
///
/// assert_eq!(heap.peek(), Some((&1, &"a")));
/// assert_eq!(heap.pop(), Some((1, "a")));
/// assert_eq!(heap.pop(), Some((2, "b")));
/// ```
pub struct MinHeap<K, V> {
    entries: CircularArray<(K, V)>,
}

impl<K, V> MinHeap<K, V> {
    /// Makes a new, empty `MinHeap`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: CircularArray::new(),
        }
    }

    /// Returns the number of entries in the heap.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the heap contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry with the smallest key, or `None` if empty.
    #[must_use]
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.entries.front().map(|(k, v)| (k, v))
    }

    /// Clears the heap, dropping all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Ord, V> MinHeap<K, V> {
    /// Pushes an entry onto the heap.
    ///
    /// O(log n).
    pub fn push(&mut self, key: K, value: V) {
        self.entries.push_back((key, value));
        self.sift_up(self.len() - 1);
    }

    /// Removes and returns the entry with the smallest key, or `None` if
    /// empty.
    ///
    /// O(log n).
    pub fn pop(&mut self) -> Option<(K, V)> {
        if self.is_empty() {
            return None;
        }
        let last = self.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop_back();
        if !self.is_empty() {
            self.sift_down(0);
        }
        entry
    }

    /// Moves the entry at `index` up until its parent's key is no larger.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.key_at(parent) <= self.key_at(index) {
                break;
            }
            self.entries.swap(parent, index);
            index = parent;
        }
    }

    /// Moves the entry at `index` down until no child's key is smaller.
    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut smallest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < self.len() && self.key_at(child) < self.key_at(smallest) {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    #[inline]
    fn key_at(&self, index: usize) -> &K {
        &self.entries[index].0
    }
}

impl<K: Ord + Clone, V: Clone> MinHeap<K, V> {
    /// Builds a heap from parallel key and value slices in O(n) by bottom-up
    /// heapification.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::MinHeap;
    ///
    /// let heap = MinHeap::from_slices(&[3, 1, 2], &["c", "a", "b"]);
    /// assert_eq!(heap.peek(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn from_slices(keys: &[K], values: &[V]) -> Self {
        assert_eq!(keys.len(), values.len(), "key and value slices must have equal lengths");
        let entries: CircularArray<(K, V)> =
            keys.iter().cloned().zip(values.iter().cloned()).collect();
        let mut heap = Self { entries };
        for index in (0..heap.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }
}

impl<K, V> Default for MinHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MinHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap").field("entries", &self.entries).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for MinHeap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord, V> Extend<(K, V)> for MinHeap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}
