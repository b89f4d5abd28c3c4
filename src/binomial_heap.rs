//! A binomial min-heap with cheap melding.

use core::fmt;

use crate::raw::{Arena, Handle};

/// A binomial min-heap of key-value entries, ordered by key.
///
/// The heap is a forest of binomial trees whose nodes live in an
/// [arena](crate) and refer to each other by handle, like the red-black
/// tree's storage. Roots are kept on a list sorted by ascending degree with
/// at most one tree per degree, which bounds the list at O(log n) trees.
///
/// Push, pop and [`meld`](BinomialHeap::meld) are all O(log n); melding is
/// the operation binomial heaps exist for, combining two whole heaps without
/// touching their trees' interiors.
///
/// # Examples
///
/// ```
/// use osrb_tree::BinomialHeap;
///
/// let mut a = BinomialHeap::new();
/// a.push(3, "c");
/// a.push(1, "a");
///
/// let mut b = BinomialHeap::new();
/// b.push(2, "b");
///
/// a.meld(b);
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.pop(), Some((1, "a")));
/// assert_eq!(a.pop(), Some((2, "b")));
/// assert_eq!(a.pop(), Some((3, "c")));
/// ```
pub struct BinomialHeap<K, V> {
    nodes: Arena<BinNode<K, V>>,
    /// Head of the root list, sorted by ascending degree.
    roots: Option<Handle>,
    len: usize,
}

/// One node of the forest. A node's children form a sibling list in
/// descending degree order; roots use the same sibling link for the root
/// list, in ascending degree order.
#[derive(Clone)]
struct BinNode<K, V> {
    key: K,
    value: V,
    degree: u32,
    child: Option<Handle>,
    sibling: Option<Handle>,
}

impl<K, V> BinomialHeap<K, V> {
    /// Makes a new, empty `BinomialHeap`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            roots: None,
            len: 0,
        }
    }

    /// Returns the number of entries in the heap.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the heap, dropping all entries.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots = None;
        self.len = 0;
    }
}

impl<K: Ord, V> BinomialHeap<K, V> {
    /// Returns the entry with the smallest key, or `None` if empty.
    ///
    /// O(log n): the minimum is one of the roots.
    #[must_use]
    pub fn peek(&self) -> Option<(&K, &V)> {
        let min = self.min_root()?;
        let node = self.nodes.get(min);
        Some((&node.key, &node.value))
    }

    /// Pushes an entry onto the heap.
    ///
    /// O(log n) worst case, O(1) amortized.
    pub fn push(&mut self, key: K, value: V) {
        let singleton = self.nodes.alloc(BinNode {
            key,
            value,
            degree: 0,
            child: None,
            sibling: None,
        });
        let merged = self.merge_root_lists(self.roots, Some(singleton));
        self.roots = self.consolidate(merged);
        self.len += 1;
    }

    /// Removes and returns the entry with the smallest key, or `None` if
    /// empty.
    ///
    /// O(log n).
    pub fn pop(&mut self) -> Option<(K, V)> {
        let min = self.min_root()?;
        self.unlink_root(min);

        // The children sit in descending degree order; reversing the list
        // yields a valid ascending root list to merge back in.
        let mut reversed = None;
        let mut current = self.nodes.get(min).child;
        while let Some(handle) = current {
            let next = self.nodes.get(handle).sibling;
            self.nodes.get_mut(handle).sibling = reversed;
            reversed = Some(handle);
            current = next;
        }

        let merged = self.merge_root_lists(self.roots, reversed);
        self.roots = self.consolidate(merged);
        self.len -= 1;

        let node = self.nodes.take(min);
        Some((node.key, node.value))
    }

    /// Absorbs all entries of `other` into this heap.
    ///
    /// The trees of `other` are adopted whole; only the O(log n) root lists
    /// are reconciled, plus the per-node cost of moving `other`'s storage
    /// into this heap's arena.
    pub fn meld(&mut self, mut other: Self) {
        let adopted = match other.roots.take() {
            Some(roots) => self.adopt(&mut other.nodes, roots),
            None => return,
        };
        let merged = self.merge_root_lists(self.roots, Some(adopted));
        self.roots = self.consolidate(merged);
        self.len += other.len;
    }

    /// The root holding the smallest key.
    fn min_root(&self) -> Option<Handle> {
        let mut best = self.roots?;
        let mut current = self.nodes.get(best).sibling;
        while let Some(handle) = current {
            if self.nodes.get(handle).key < self.nodes.get(best).key {
                best = handle;
            }
            current = self.nodes.get(handle).sibling;
        }
        Some(best)
    }

    /// Removes `root` from the root list, leaving its subtree intact.
    fn unlink_root(&mut self, root: Handle) {
        let after = self.nodes.get(root).sibling;
        if self.roots == Some(root) {
            self.roots = after;
            return;
        }
        let mut current = self.roots.expect("`root` is on the root list");
        while self.nodes.get(current).sibling != Some(root) {
            current = self.nodes.get(current).sibling.expect("`root` is on the root list");
        }
        self.nodes.get_mut(current).sibling = after;
    }

    /// Merges two ascending-degree root lists into one, preserving the
    /// order. Equal degrees may appear adjacently; `consolidate` resolves
    /// them.
    fn merge_root_lists(&mut self, a: Option<Handle>, b: Option<Handle>) -> Option<Handle> {
        let mut a = a;
        let mut b = b;
        let mut head = None;
        let mut tail: Option<Handle> = None;

        while let (Some(x), Some(y)) = (a, b) {
            let take_a = self.nodes.get(x).degree <= self.nodes.get(y).degree;
            let picked = if take_a { x } else { y };
            if take_a {
                a = self.nodes.get(x).sibling;
            } else {
                b = self.nodes.get(y).sibling;
            }
            match tail {
                None => head = Some(picked),
                Some(t) => self.nodes.get_mut(t).sibling = Some(picked),
            }
            tail = Some(picked);
        }

        let rest = a.or(b);
        match tail {
            None => rest,
            Some(t) => {
                self.nodes.get_mut(t).sibling = rest;
                head
            }
        }
    }

    /// Walks a merged root list and links trees of equal degree until at
    /// most one tree per degree remains.
    fn consolidate(&mut self, head: Option<Handle>) -> Option<Handle> {
        let mut head = head?;
        let mut prev: Option<Handle> = None;
        let mut x = head;

        while let Some(next) = self.nodes.get(x).sibling {
            let same_degree = self.nodes.get(x).degree == self.nodes.get(next).degree;
            let next_next_same = self.nodes.get(next).sibling.is_some_and(|nn| {
                self.nodes.get(nn).degree == self.nodes.get(next).degree
            });

            if !same_degree || next_next_same {
                // Either the degrees differ, or three trees share a degree
                // and the latter two must be linked first.
                prev = Some(x);
                x = next;
            } else if self.nodes.get(x).key <= self.nodes.get(next).key {
                // x wins; next becomes its child.
                self.nodes.get_mut(x).sibling = self.nodes.get(next).sibling;
                self.link(next, x);
            } else {
                // next wins; x becomes its child, and the list is re-wired
                // around x.
                match prev {
                    None => head = next,
                    Some(p) => self.nodes.get_mut(p).sibling = Some(next),
                }
                self.link(x, next);
                x = next;
            }
        }
        Some(head)
    }

    /// Makes `loser` the first child of `winner`; both must have the same
    /// degree and `winner`'s key must not exceed `loser`'s.
    fn link(&mut self, loser: Handle, winner: Handle) {
        let first_child = self.nodes.get(winner).child;
        self.nodes.get_mut(loser).sibling = first_child;
        self.nodes.get_mut(winner).child = Some(loser);
        self.nodes.get_mut(winner).degree += 1;
    }

    /// Moves the tree (and sibling chain) rooted at `handle` out of `other`
    /// into this heap's arena, returning the re-homed handle.
    ///
    /// Recursion depth is bounded by the tree degree plus the sibling chain
    /// length, both O(log n).
    fn adopt(&mut self, other: &mut Arena<BinNode<K, V>>, handle: Handle) -> Handle {
        let mut node = other.take(handle);
        node.child = node.child.map(|c| self.adopt(other, c));
        node.sibling = node.sibling.map(|s| self.adopt(other, s));
        self.nodes.alloc(node)
    }
}

impl<K: Ord + Clone, V: Clone> BinomialHeap<K, V> {
    /// Builds a heap from parallel key and value slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::BinomialHeap;
    ///
    /// let heap = BinomialHeap::from_slices(&[3, 1, 2], &["c", "a", "b"]);
    /// assert_eq!(heap.peek(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn from_slices(keys: &[K], values: &[V]) -> Self {
        assert_eq!(keys.len(), values.len(), "key and value slices must have equal lengths");
        keys.iter().cloned().zip(values.iter().cloned()).collect()
    }
}

impl<K, V> Default for BinomialHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug + Ord, V> fmt::Debug for BinomialHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len)
            .field("min", &self.peek().map(|(k, _)| k))
            .finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BinomialHeap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord, V> Extend<(K, V)> for BinomialHeap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    impl<K: Ord, V> BinomialHeap<K, V> {
        /// Checks the forest shape: ascending distinct root degrees, heap
        /// order on every edge, and binomial subtree sizes summing to `len`.
        fn validate_forest(&self) {
            let mut total = 0usize;
            let mut last_degree = None;
            let mut current = self.roots;
            while let Some(root) = current {
                let degree = self.nodes.get(root).degree;
                assert!(
                    last_degree.is_none_or(|d| d < degree),
                    "root degrees must be strictly ascending"
                );
                last_degree = Some(degree);
                total += self.validate_tree(root);
                current = self.nodes.get(root).sibling;
            }
            assert_eq!(total, self.len, "forest node count must match len");
        }

        /// Returns the node count of the binomial tree at `handle`.
        fn validate_tree(&self, handle: Handle) -> usize {
            let node = self.nodes.get(handle);
            let mut count = 1usize;
            let mut expected_degree = node.degree;
            let mut current = node.child;
            while let Some(child) = current {
                expected_degree -= 1;
                let child_node = self.nodes.get(child);
                assert_eq!(child_node.degree, expected_degree, "children must descend in degree");
                assert!(child_node.key >= node.key, "heap order violated");
                count += self.validate_tree(child);
                current = child_node.sibling;
            }
            assert_eq!(expected_degree, 0, "a degree-k node must have k children");
            assert_eq!(count, 1usize << node.degree, "binomial tree size must be 2^degree");
            count
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut heap = BinomialHeap::new();
        for k in [5, 1, 4, 2, 3] {
            heap.push(k, ());
            heap.validate_forest();
        }

        let mut drained = Vec::new();
        while let Some((k, ())) = heap.pop() {
            heap.validate_forest();
            drained.push(k);
        }
        assert_eq!(drained, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn meld_absorbs_the_other_heap() {
        let mut a: BinomialHeap<i32, ()> = [9, 3, 7].into_iter().map(|k| (k, ())).collect();
        let b: BinomialHeap<i32, ()> = [8, 2, 6, 4].into_iter().map(|k| (k, ())).collect();

        a.meld(b);
        a.validate_forest();
        assert_eq!(a.len(), 7);

        let mut drained = Vec::new();
        while let Some((k, ())) = a.pop() {
            drained.push(k);
        }
        assert_eq!(drained, [2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn from_slices_pairs_keys_with_values() {
        let mut heap = BinomialHeap::from_slices(&[9, 3, 7, 1], &["i", "c", "g", "a"]);
        heap.validate_forest();
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.pop(), Some((1, "a")));
        assert_eq!(heap.pop(), Some((3, "c")));
    }

    #[test]
    fn meld_with_empty_heaps() {
        let mut heap: BinomialHeap<i32, ()> = BinomialHeap::new();
        heap.meld(BinomialHeap::new());
        assert!(heap.is_empty());

        heap.push(1, ());
        heap.meld(BinomialHeap::new());
        assert_eq!(heap.len(), 1);

        let mut empty: BinomialHeap<i32, ()> = BinomialHeap::new();
        empty.meld(heap);
        empty.validate_forest();
        assert_eq!(empty.pop(), Some((1, ())));
    }

    proptest! {
        /// Pushing arbitrary keys and draining yields them in sorted order,
        /// with a valid forest at every step.
        #[test]
        fn drains_sorted(keys in prop::collection::vec(any::<i32>(), 0..128)) {
            let mut heap: BinomialHeap<i32, ()> = BinomialHeap::new();
            for &k in &keys {
                heap.push(k, ());
            }
            heap.validate_forest();

            let mut drained = Vec::with_capacity(keys.len());
            while let Some((k, ())) = heap.pop() {
                heap.validate_forest();
                drained.push(k);
            }

            let mut sorted = keys;
            sorted.sort_unstable();
            prop_assert_eq!(drained, sorted);
        }

        /// Melding two heaps is equivalent to building one heap from the
        /// concatenated keys.
        #[test]
        fn meld_is_concatenation(
            left in prop::collection::vec(any::<i16>(), 0..64),
            right in prop::collection::vec(any::<i16>(), 0..64),
        ) {
            let mut a: BinomialHeap<i16, ()> = left.iter().map(|&k| (k, ())).collect();
            let b: BinomialHeap<i16, ()> = right.iter().map(|&k| (k, ())).collect();

            a.meld(b);
            a.validate_forest();

            let mut drained = Vec::new();
            while let Some((k, ())) = a.pop() {
                drained.push(k);
            }

            let mut expected = left;
            expected.extend(right);
            expected.sort_unstable();
            prop_assert_eq!(drained, expected);
        }
    }
}
