//! A growable circular buffer with O(1) indexed access.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use alloc::vec::Vec;

/// A circular (ring-buffer) array.
///
/// Elements occupy a contiguous logical range `0..len` that may wrap around
/// the end of the backing storage; a front offset maps logical indices to
/// slots. Pushing or popping at either end is O(1) amortized, and indexed
/// access is O(1) always.
///
/// The backing storage doubles when it fills and is halved when occupancy
/// drops to a quarter, so the capacity stays within a constant factor of the
/// length in both directions.
///
/// # Examples
///
/// ```
/// use osrb_tree::CircularArray;
///
/// let mut buffer = CircularArray::new();
/// buffer.push_back(2);
/// buffer.push_back(3);
/// buffer.push_front(1);
///
/// assert_eq!(buffer.len(), 3);
/// assert_eq!(buffer[0], 1);
/// assert_eq!(buffer.pop_back(), Some(3));
/// ```
pub struct CircularArray<T> {
    slots: Vec<Option<T>>,
    front: usize,
    len: usize,
}

/// An iterator over the elements of a [`CircularArray`], front to back.
///
/// This `struct` is created by the [`iter`](CircularArray::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    buffer: &'a CircularArray<T>,
    index: usize,
}

/// An owning iterator over the elements of a [`CircularArray`], front to
/// back.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> CircularArray<T> {
    /// Makes a new, empty `CircularArray`.
    ///
    /// Does not allocate until the first push.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            front: 0,
            len: 0,
        }
    }

    /// Makes a new, empty `CircularArray` with room for at least `capacity`
    /// elements before the next grow.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        Self {
            slots,
            front: 0,
            len: 0,
        }
    }

    /// Returns the number of elements in the buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the backing storage can hold before
    /// the next grow.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maps a logical index to its slot in the backing storage.
    #[inline]
    const fn slot_of(&self, index: usize) -> usize {
        (self.front + index) % self.slots.len()
    }

    /// Returns a reference to the element at `index`, front being 0, or
    /// `None` if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::CircularArray;
    ///
    /// let buffer: CircularArray<_> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(buffer.get(1), Some(&20));
    /// assert_eq!(buffer.get(3), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[self.slot_of(index)].as_ref()
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of bounds.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot_of(index);
        self.slots[slot].as_mut()
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Swaps the elements at logical indices `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        assert!(a < self.len && b < self.len, "`CircularArray::swap()` - index out of bounds!");
        let (a, b) = (self.slot_of(a), self.slot_of(b));
        self.slots.swap(a, b);
    }

    /// Prepends an element; the indices of all existing elements shift up by
    /// one.
    ///
    /// Amortized O(1).
    pub fn push_front(&mut self, element: T) {
        self.grow_if_full();
        self.front = (self.front + self.slots.len() - 1) % self.slots.len();
        self.slots[self.front] = Some(element);
        self.len += 1;
    }

    /// Appends an element.
    ///
    /// Amortized O(1).
    pub fn push_back(&mut self, element: T) {
        self.grow_if_full();
        let slot = self.slot_of(self.len);
        self.slots[slot] = Some(element);
        self.len += 1;
    }

    /// Removes and returns the first element, or `None` if empty.
    ///
    /// Amortized O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let element = self.slots[self.front].take();
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        self.shrink_if_sparse();
        element
    }

    /// Removes and returns the last element, or `None` if empty.
    ///
    /// Amortized O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.slot_of(self.len - 1);
        let element = self.slots[slot].take();
        self.len -= 1;
        self.shrink_if_sparse();
        element
    }

    /// Clears the buffer, dropping all elements and the backing storage.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.front = 0;
        self.len = 0;
    }

    /// Gets an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            index: 0,
        }
    }

    /// Doubles the backing storage when it is full.
    fn grow_if_full(&mut self) {
        if self.len == self.slots.len() {
            let doubled = (self.slots.len() * 2).max(1);
            self.relocate(doubled);
        }
    }

    /// Halves the backing storage when occupancy drops to a quarter.
    fn shrink_if_sparse(&mut self) {
        if self.slots.len() > 1 && self.len <= self.slots.len() / 4 {
            let halved = (self.slots.len() / 2).max(1);
            self.relocate(halved);
        }
    }

    /// Moves the elements into fresh storage of `capacity` slots, unwrapping
    /// the ring so the front lands at slot 0.
    fn relocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut slots: Vec<Option<T>> = Vec::new();
        slots.resize_with(capacity, || None);
        let old_capacity = self.slots.len();
        for (index, slot) in slots.iter_mut().take(self.len).enumerate() {
            *slot = self.slots[(self.front + index) % old_capacity].take();
        }
        self.slots = slots;
        self.front = 0;
    }
}

impl<T: PartialEq> CircularArray<T> {
    /// Returns the logical index of the first element equal to `needle`, or
    /// `None` if no element matches.
    ///
    /// O(n) front-to-back scan.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::CircularArray;
    ///
    /// let buffer: CircularArray<_> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(buffer.position(&20), Some(1));
    /// assert_eq!(buffer.position(&40), None);
    /// ```
    #[must_use]
    pub fn position(&self, needle: &T) -> Option<usize> {
        self.iter().position(|element| element == needle)
    }

    /// Returns `true` if some element equals `needle`.
    #[must_use]
    pub fn contains(&self, needle: &T) -> bool {
        self.position(needle).is_some()
    }
}

impl<T: Ord + Clone> CircularArray<T> {
    /// Returns the `n`-th smallest element, one-based, or `None` if `n` is
    /// outside `1..=len`.
    ///
    /// The buffer itself is left untouched; the selection runs on a scratch
    /// copy in O(n) expected time.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::CircularArray;
    ///
    /// let buffer: CircularArray<_> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(buffer.nth_smallest(1), Some(10));
    /// assert_eq!(buffer.nth_smallest(3), Some(30));
    /// assert_eq!(buffer.nth_smallest(4), None);
    /// ```
    #[must_use]
    pub fn nth_smallest(&self, n: usize) -> Option<T> {
        if n == 0 || n > self.len {
            return None;
        }
        let mut scratch: Vec<T> = self.iter().cloned().collect();
        let (_, nth, _) = scratch.select_nth_unstable(n - 1);
        Some(nth.clone())
    }
}

impl<T: Clone> Clone for CircularArray<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for CircularArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for CircularArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for CircularArray<T> {}

impl<T> Index<usize> for CircularArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> IndexMut<usize> for CircularArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T> FromIterator<T> for CircularArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<T> Extend<T> for CircularArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a CircularArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for CircularArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut drained = Vec::with_capacity(self.len);
        while let Some(element) = self.pop_front() {
            drained.push(element);
        }
        IntoIter {
            inner: drained.into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.buffer.get(self.index)?;
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.buffer.len() - self.index
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            index: self.index,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}
