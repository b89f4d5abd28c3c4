use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::vec::Vec;

use crate::raw::{Direction, Handle, RawOSRBTree};

mod order_statistic;

pub use crate::Rank;

/// An ordered collection based on a [red-black tree] augmented with subtree
/// sizes.
///
/// Given a key type with a [total order], the tree stores its entries in key
/// order and keeps every subtree's entry count alongside the usual balancing
/// bookkeeping. The count turns the tree into an [order-statistic] structure:
/// besides the usual logarithmic insert, remove and lookup, it answers
/// *select* (the k-th smallest entry) and *rank* (an entry's one-based sorted
/// position) in O(log n), via [`select`](OSRBTree::select) and
/// [`rank`](OSRBTree::rank).
///
/// Duplicate keys are allowed and each occurrence is stored as its own entry;
/// the tree behaves as a multimap. [`get`](OSRBTree::get) and
/// [`remove`](OSRBTree::remove) operate on one occurrence at a time, and
/// ranks count every occurrence individually.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the tree. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior
/// resulting from such a logic error is not specified, but will be
/// encapsulated to the `OSRBTree` that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let mut scores = OSRBTree::new();
/// scores.insert(72, "Carol");
/// scores.insert(91, "Alice");
/// scores.insert(85, "Bob");
///
/// // Entries come back in key order.
/// let names: Vec<_> = scores.iter().map(|(_, &name)| name).collect();
/// assert_eq!(names, ["Carol", "Bob", "Alice"]);
///
/// // The median score, found in O(log n).
/// let (median, _) = scores.select(2).unwrap();
/// assert_eq!(*median, 85);
///
/// // How many scores are at or below 85?
/// assert_eq!(scores.rank(&85), Ok(2));
///
/// // Index by rank.
/// assert_eq!(scores[Rank(3)], "Alice");
/// ```
///
/// An `OSRBTree` with a known list of entries can be initialized from an
/// array:
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let solar_distance = OSRBTree::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.len(), 4);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [order-statistic]: https://en.wikipedia.org/wiki/Order_statistic_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct OSRBTree<K, V> {
    raw: RawOSRBTree<K, V>,
}

/// An in-order iterator over the entries of an `OSRBTree`.
///
/// This `struct` is created by the [`iter`] method on [`OSRBTree`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let tree = OSRBTree::from([(1, "a"), (2, "b")]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OSRBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawOSRBTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An iterator over the keys of an `OSRBTree`, in sorted order.
///
/// This `struct` is created by the [`keys`] method on [`OSRBTree`]. See its
/// documentation for more.
///
/// [`keys`]: OSRBTree::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `OSRBTree`, in key order.
///
/// This `struct` is created by the [`values`] method on [`OSRBTree`]. See its
/// documentation for more.
///
/// [`values`]: OSRBTree::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A pre-order (node before subtrees) iterator over the entries of an
/// `OSRBTree`.
///
/// The sequence depends on the tree's internal shape, which in turn depends
/// on the exact history of insertions and removals; only the in-order
/// traversal is history-independent. Pre-order is still useful because
/// re-inserting its output rebuilds a tree of the same shape.
///
/// This `struct` is created by the [`preorder`] method on [`OSRBTree`].
///
/// [`preorder`]: OSRBTree::preorder
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Preorder<'a, K, V> {
    tree: &'a RawOSRBTree<K, V>,
    stack: Vec<Handle>,
}

/// A post-order (subtrees before node) iterator over the entries of an
/// `OSRBTree`.
///
/// Like [`Preorder`], the sequence depends on the tree's internal shape.
///
/// This `struct` is created by the [`postorder`] method on [`OSRBTree`].
///
/// [`postorder`]: OSRBTree::postorder
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Postorder<'a, K, V> {
    tree: &'a RawOSRBTree<K, V>,
    stack: Vec<(Handle, bool)>,
}

/// An owning iterator over the entries of an `OSRBTree`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`OSRBTree`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> OSRBTree<K, V> {
    /// Makes a new, empty `OSRBTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawOSRBTree::new(),
        }
    }

    /// Returns the number of entries in the tree.
    ///
    /// Duplicate keys count once per occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1, "a");
    /// tree.insert(1, "b");
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1, "a");
    /// assert!(!tree.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the tree, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the entry with the smallest key, or `None` if the tree is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// assert_eq!(tree.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let first = self.raw.extremum(self.raw.root()?, Direction::Left);
        let node = self.raw.node(first);
        Some((node.key(), node.value()))
    }

    /// Returns the entry with the largest key, or `None` if the tree is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// assert_eq!(tree.last_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let last = self.raw.extremum(self.raw.root()?, Direction::Right);
        let node = self.raw.node(last);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the entry with the smallest key, or `None` if the
    /// tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// assert_eq!(tree.pop_first(), Some((1, "a")));
    /// assert_eq!(tree.pop_first(), Some((2, "b")));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.extremum(self.raw.root()?, Direction::Left);
        Some(self.raw.remove_node(first))
    }

    /// Removes and returns the entry with the largest key, or `None` if the
    /// tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// assert_eq!(tree.pop_last(), Some((2, "b")));
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.extremum(self.raw.root()?, Direction::Right);
        Some(self.raw.remove_node(last))
    }

    /// Gets an in-order iterator over the entries of the tree, sorted by
    /// key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let keys: Vec<_> = tree.iter().map(|(&k, _)| k).collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let front = self.raw.root().map(|r| self.raw.extremum(r, Direction::Left));
        let back = self.raw.root().map(|r| self.raw.extremum(r, Direction::Right));
        Iter {
            tree: &self.raw,
            front,
            back,
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = tree.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// let values: Vec<_> = tree.values().copied().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a pre-order iterator over the entries of the tree: each entry is
    /// yielded before anything in its subtrees.
    ///
    /// See [`Preorder`] for the caveat about shape dependence.
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder {
            tree: &self.raw,
            stack: self.raw.root().into_iter().collect(),
        }
    }

    /// Gets a post-order iterator over the entries of the tree: each entry is
    /// yielded after everything in its subtrees.
    ///
    /// See [`Postorder`] for the caveat about shape dependence.
    pub fn postorder(&self) -> Postorder<'_, K, V> {
        Postorder {
            tree: &self.raw,
            stack: self.raw.root().map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<K: Ord, V> OSRBTree<K, V> {
    /// Returns a reference to the value of one occurrence of `key`, or
    /// `None` if the key is not present.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair of one occurrence of `key`, or `None` if
    /// the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.get_key_value(&1), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key)?;
        let node = self.raw.node(handle);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value of one occurrence of `key`,
    /// or `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value = "b";
    /// }
    /// assert_eq!(tree.get(&1), Some(&"b"));
    /// ```
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the tree contains at least one occurrence of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert!(tree.contains_key(&1));
    /// assert!(!tree.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search_node(key).is_some()
    }

    /// Inserts a key-value pair into the tree.
    ///
    /// An existing occurrence of the key is never replaced; the new entry is
    /// stored alongside it and both are reachable through ranked access.
    ///
    /// # Panics
    ///
    /// Panics if the tree is already at its maximum capacity (an
    /// implementation limit of just under 2³² entries).
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(37, "a");
    /// tree.insert(37, "b");
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        self.raw.insert(key, value);
    }

    /// Removes one occurrence of `key` from the tree, returning its value,
    /// or `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.remove(&1), Some("a"));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(_, v)| v)
    }

    /// Removes one occurrence of `key` from the tree, returning the stored
    /// key-value pair, or `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.remove_entry(&1), Some((1, "a")));
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }
}

impl<K: Ord + Clone, V: Clone> OSRBTree<K, V> {
    /// Builds a tree from parallel key and value slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from_slices(&[2, 1, 3], &["b", "a", "c"]);
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[must_use]
    pub fn from_slices(keys: &[K], values: &[V]) -> Self {
        assert_eq!(keys.len(), values.len(), "key and value slices must have equal lengths");
        keys.iter().cloned().zip(values.iter().cloned()).collect()
    }
}

impl<K: Clone, V: Clone> Clone for OSRBTree<K, V> {
    /// Returns a structurally identical deep copy of the tree.
    ///
    /// Because the clone reproduces the node arrangement exactly, pre- and
    /// post-order traversals of the copy match the original, not just the
    /// sorted order.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Hash, V: Hash> Hash for OSRBTree<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OSRBTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for OSRBTree<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for OSRBTree<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for OSRBTree<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OSRBTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OSRBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OSRBTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for OSRBTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for OSRBTree<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OSRBTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for OSRBTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a")]);
    /// let mut iter = tree.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.into_pairs().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for OSRBTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSRBTree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front.expect("`remaining > 0` implies a front cursor");
        self.remaining -= 1;
        self.front = self.tree.neighbor(handle, Direction::Right);
        let node = self.tree.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back.expect("`remaining > 0` implies a back cursor");
        self.remaining -= 1;
        self.back = self.tree.neighbor(handle, Direction::Left);
        let node = self.tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<'a, K, V> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node = self.tree.node(handle);
        // Right is pushed first so Left is visited first.
        if let Some(right) = node.child(Direction::Right) {
            self.stack.push(right);
        }
        if let Some(left) = node.child(Direction::Left) {
            self.stack.push(left);
        }
        Some((node.key(), node.value()))
    }
}

impl<K, V> FusedIterator for Preorder<'_, K, V> {}

impl<'a, K, V> Iterator for Postorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((handle, expanded)) = self.stack.pop() {
            let node = self.tree.node(handle);
            if expanded {
                return Some((node.key(), node.value()));
            }
            self.stack.push((handle, true));
            if let Some(right) = node.child(Direction::Right) {
                self.stack.push((right, false));
            }
            if let Some(left) = node.child(Direction::Left) {
                self.stack.push((left, false));
            }
        }
        None
    }
}

impl<K, V> FusedIterator for Postorder<'_, K, V> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}
