use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OSRBTree;
use crate::Error;
use crate::Rank;
use crate::raw::Direction;

impl<K, V> OSRBTree<K, V> {
    /// Returns the entry at one-based position `pos` in sorted order.
    ///
    /// Position 1 is the smallest entry and position `len` the largest.
    /// Positions outside `1..=len` are reported as
    /// [`Error::OutOfRange`], which carries both the requested position and
    /// the tree's length at the time of the query.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is not in `1..=len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(30, "c"), (10, "a"), (20, "b")]);
    ///
    /// assert_eq!(tree.select(2), Ok((&20, &"b")));
    /// assert_eq!(tree.select(4), Err(Error::OutOfRange { pos: 4, len: 3 }));
    /// ```
    pub fn select(&self, pos: usize) -> Result<(&K, &V), Error> {
        let handle = self.raw.select(pos).ok_or(Error::OutOfRange { pos, len: self.len() })?;
        let node = self.raw.node(handle);
        Ok((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at one-based
    /// position `pos` in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the tree's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` is not in `1..=len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(10, "a"), (5, "b")]);
    ///
    /// if let Ok((key, value)) = tree.select_mut(1) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(tree.get(&5), Some(&"updated"));
    /// ```
    pub fn select_mut(&mut self, pos: usize) -> Result<(&K, &mut V), Error> {
        let handle = self.raw.select(pos).ok_or(Error::OutOfRange { pos, len: self.len() })?;
        let node = self.raw.node_mut(handle);
        let (key, value) = node.pair_mut();
        Ok((key, value))
    }
}

impl<K: Ord, V> OSRBTree<K, V> {
    /// Returns the one-based rank of `key` in sorted order: one plus the
    /// number of entries preceding it.
    ///
    /// With duplicate keys present, the rank reported is that of the
    /// occurrence a lookup of `key` finds; [`select`](OSRBTree::select) is
    /// its exact inverse for that position.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no occurrence in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(30, "c"), (10, "a"), (20, "b")]);
    ///
    /// assert_eq!(tree.rank(&10), Ok(1));
    /// assert_eq!(tree.rank(&30), Ok(3));
    /// assert_eq!(tree.rank(&15), Err(Error::NotFound));
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key).ok_or(Error::NotFound)
    }

    /// Returns the entry following `key` in sorted order.
    ///
    /// `Ok(None)` means the key holds the last position; a missing key is an
    /// error, not an empty answer. With duplicate keys, the neighbor is
    /// taken from the occurrence a lookup of `key` finds, so the successor
    /// of a duplicated key can be another occurrence of the same key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no occurrence in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(30, "c"), (10, "a"), (20, "b")]);
    ///
    /// assert_eq!(tree.successor(&10), Ok(Some((&20, &"b"))));
    /// assert_eq!(tree.successor(&30), Ok(None));
    /// assert_eq!(tree.successor(&15), Err(Error::NotFound));
    /// ```
    pub fn successor<Q>(&self, key: &Q) -> Result<Option<(&K, &V)>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.neighbor_of(key, Direction::Right)
    }

    /// Returns the entry preceding `key` in sorted order.
    ///
    /// `Ok(None)` means the key holds the first position; a missing key is
    /// an error, not an empty answer.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no occurrence in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(30, "c"), (10, "a"), (20, "b")]);
    ///
    /// assert_eq!(tree.predecessor(&20), Ok(Some((&10, &"a"))));
    /// assert_eq!(tree.predecessor(&10), Ok(None));
    /// ```
    pub fn predecessor<Q>(&self, key: &Q) -> Result<Option<(&K, &V)>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.neighbor_of(key, Direction::Left)
    }

    fn neighbor_of<Q>(&self, key: &Q, direction: Direction) -> Result<Option<(&K, &V)>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search_node(key).ok_or(Error::NotFound)?;
        Ok(self.raw.neighbor(handle, direction).map(|h| {
            let node = self.raw.node(h);
            (node.key(), node.value())
        }))
    }
}

/// Indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from([("a", 1), ("b", 2)]);
///
/// assert_eq!(tree[Rank(1)], 1);
/// ```
impl<K, V> Index<Rank> for OSRBTree<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

/// Mutably indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let mut tree = OSRBTree::from([("a", 1), ("b", 2)]);
/// tree[Rank(2)] = 5;
///
/// assert_eq!(tree.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for OSRBTree<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.select_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
