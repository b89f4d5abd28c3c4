use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Direction, RbNode};
use super::size::Size;

/// The core red-black tree backing `OSRBTree`.
///
/// Nodes live in an [`Arena`] and refer to each other by [`Handle`]. The
/// classical shared nil sentinel is replaced by `Option<Handle>`: `None`
/// stands in for every absent child and for the parent of the root, and the
/// total helpers [`color_of`](Self::color_of) and [`size_of`](Self::size_of)
/// give it the sentinel's fixed reading (Black, size zero) so no link lookup
/// ever needs a special case.
///
/// Two invariant systems are maintained together across every mutation:
///
/// - red-black: the root is Black, a Red node never has a Red child, and
///   every path from a node down to nil crosses the same number of Black
///   nodes;
/// - augmentation: every node's `size` equals the entry count of the subtree
///   rooted at it.
///
/// Duplicate keys are allowed; an inserting descent sends strictly smaller
/// keys left and everything else right.
#[derive(Clone)]
pub(crate) struct RawOSRBTree<K, V> {
    nodes: Arena<RbNode<K, V>>,
    root: Option<Handle>,
    len: usize,
}

impl<K, V> RawOSRBTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &RbNode<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut RbNode<K, V> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Color of a possibly-nil subtree root; nil is always Black.
    #[inline]
    fn color_of(&self, handle: Option<Handle>) -> Color {
        match handle {
            Some(h) => self.node(h).color(),
            None => Color::Black,
        }
    }

    /// Entry count of a possibly-nil subtree; nil is empty.
    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> usize {
        match handle {
            Some(h) => self.node(h).size().to_usize(),
            None => 0,
        }
    }

    /// Which child slot of `parent` holds `child`.
    ///
    /// `child` may be `None` for the hole left by a splice; the other slot
    /// then holds the (never-nil) sibling, so the comparison still resolves.
    fn direction_of(&self, parent: Handle, child: Option<Handle>) -> Direction {
        if self.node(parent).child(Direction::Left) == child {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Walks to the last node in `direction` under `handle`; `Left` finds
    /// the subtree minimum, `Right` the maximum.
    pub(crate) fn extremum(&self, mut handle: Handle, direction: Direction) -> Handle {
        while let Some(next) = self.node(handle).child(direction) {
            handle = next;
        }
        handle
    }

    /// Recomputes a node's entry count from its children.
    fn recount(&mut self, handle: Handle) {
        let total = self.size_of(self.node(handle).child(Direction::Left))
            + self.size_of(self.node(handle).child(Direction::Right))
            + 1;
        self.node_mut(handle).set_size(Size::from_usize(total));
    }

    /// Rotates the subtree rooted at `x` toward `direction`, promoting the
    /// child on the opposite side. Returns the handle of the new sub-root.
    ///
    /// Every subtree other than the two reordered nodes keeps its membership,
    /// so only `x` and the promoted child have their sizes rewritten: the
    /// promoted child inherits `x`'s old count and `x` is recounted.
    fn rotate(&mut self, x: Handle, direction: Direction) -> Handle {
        let rising = direction.opposite();
        let y = self.node(x).child(rising).expect("`rotate()` requires a child on the rising side");

        // y's inner subtree crosses over to x.
        let inner = self.node(y).child(direction);
        self.node_mut(x).set_child(rising, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(x));
        }

        // y takes x's place under x's parent.
        let parent = self.node(x).parent();
        self.node_mut(y).set_parent(parent);
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let side = self.direction_of(p, Some(x));
                self.node_mut(p).set_child(side, Some(y));
            }
        }

        // x descends below y.
        self.node_mut(y).set_child(direction, Some(x));
        self.node_mut(x).set_parent(Some(y));

        let old_size = self.node(x).size();
        self.node_mut(y).set_size(old_size);
        self.recount(x);
        y
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`.
    /// `u`'s own links are left untouched; the caller re-wires or frees it.
    fn transplant(&mut self, u: Handle, v: Option<Handle>) {
        let parent = self.node(u).parent();
        match parent {
            None => self.root = v,
            Some(p) => {
                let side = self.direction_of(p, Some(u));
                self.node_mut(p).set_child(side, v);
            }
        }
        if let Some(v) = v {
            self.node_mut(v).set_parent(parent);
        }
    }

    /// Shrinks every subtree count on the path from `handle` up to the root
    /// by one. Called with the node that is structurally leaving the tree,
    /// before any fixup rotation can reshuffle the path above it.
    fn decrement_sizes(&mut self, handle: Handle) {
        let mut current = Some(handle);
        while let Some(h) = current {
            let shrunk = self.node(h).size().decrement();
            self.node_mut(h).set_size(shrunk);
            current = self.node(h).parent();
        }
    }

    /// One-based sorted position of the node at `handle`, every entry
    /// counted individually.
    ///
    /// The left subtree sits entirely before the node, so its count plus one
    /// seeds the rank; walking up, each step where the current node hangs to
    /// the right adds the entries on the parent's other side plus the parent
    /// itself.
    pub(crate) fn rank_of_node(&self, handle: Handle) -> usize {
        let mut rank = self.size_of(self.node(handle).child(Direction::Left)) + 1;
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            if self.direction_of(parent, Some(current)) == Direction::Right {
                rank += self.size_of(self.node(parent).child(Direction::Left)) + 1;
            }
            current = parent;
        }
        rank
    }

    /// The node at one-based sorted position `pos`, or `None` outside
    /// `1..=len`. Iterative order-statistic descent.
    pub(crate) fn select(&self, pos: usize) -> Option<Handle> {
        if pos == 0 || pos > self.len {
            return None;
        }
        let mut current = self.root.expect("`pos` is in `1..=len`, so the tree is non-empty");
        let mut pos = pos;
        loop {
            let left = self.node(current).child(Direction::Left);
            let here = self.size_of(left) + 1;
            match pos.cmp(&here) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = left.expect("`pos < here` implies a left subtree"),
                Ordering::Greater => {
                    pos -= here;
                    current = self.node(current).child(Direction::Right).expect("`pos > here` implies a right subtree");
                }
            }
        }
    }

    /// The in-order neighbor of `handle` toward `direction` (`Right` is the
    /// successor, `Left` the predecessor), or `None` at that end of the tree.
    ///
    /// A node with a child on that side answers with the extremum of that
    /// child's subtree - the predecessor comes from the node's own *left*
    /// subtree. Otherwise the walk climbs until it leaves a subtree on the
    /// side it is heading toward.
    pub(crate) fn neighbor(&self, handle: Handle, direction: Direction) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(direction) {
            return Some(self.extremum(child, direction.opposite()));
        }
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            if self.direction_of(parent, Some(current)) != direction {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Consumes the tree into its entries in sorted order. Handles are
    /// gathered first so the arena can then be drained without re-walking
    /// links through freed slots.
    pub(crate) fn into_pairs(mut self) -> alloc::vec::Vec<(K, V)> {
        let mut handles = alloc::vec::Vec::with_capacity(self.len);
        let mut next = self.root.map(|r| self.extremum(r, Direction::Left));
        while let Some(h) = next {
            handles.push(h);
            next = self.neighbor(h, Direction::Right);
        }
        handles.into_iter().map(|h| self.nodes.take(h).into_pair()).collect()
    }
}

impl<K: Ord, V> RawOSRBTree<K, V> {
    /// Iterative descent to the node holding `key`, or `None`.
    ///
    /// With duplicates present this lands on the topmost matching node,
    /// which is the occurrence whose rank the rank walk then reports.
    pub(crate) fn search_node<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            match key.cmp(self.node(h).key().borrow()) {
                Ordering::Equal => return Some(h),
                Ordering::Less => current = self.node(h).child(Direction::Left),
                Ordering::Greater => current = self.node(h).child(Direction::Right),
            }
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search_node(key).map(|h| self.node(h).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search_node(key)?;
        Some(self.node_mut(handle).value_mut())
    }

    /// Inserts an entry; duplicates are always admitted.
    ///
    /// The descent compares `key < node.key` (ties go right) and bumps the
    /// subtree count of every node it passes, since the new entry will live
    /// below all of them. The new node is attached Red and the fixup restores
    /// the red-black invariants.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        let mut parent = None;
        let mut side = Direction::Left;
        let mut current = self.root;
        while let Some(h) = current {
            let grown = self.node(h).size().increment();
            self.node_mut(h).set_size(grown);
            side = if key < *self.node(h).key() { Direction::Left } else { Direction::Right };
            parent = Some(h);
            current = self.node(h).child(side);
        }

        let z = self.nodes.alloc(RbNode::new_leaf(key, value, parent));
        match parent {
            None => self.root = Some(z),
            Some(p) => self.node_mut(p).set_child(side, Some(z)),
        }
        self.len += 1;
        self.insert_fixup(z);
    }

    /// Restores the red-black invariants after attaching the Red node `z`.
    ///
    /// While `z`'s parent is Red: a Red uncle means recolor and retry from
    /// the grandparent; a Black uncle means one or two rotations, after which
    /// the loop terminates because the new parent is Black.
    fn insert_fixup(&mut self, mut z: Handle) {
        while self.color_of(self.node(z).parent()) == Color::Red {
            let parent = self.node(z).parent().expect("`z`'s parent is Red, so it exists");
            let grandparent = self.node(parent).parent().expect("a Red node is never the root");
            let side = self.direction_of(grandparent, Some(parent));
            let uncle = self.node(grandparent).child(side.opposite());

            if self.color_of(uncle) == Color::Red {
                // Case 1: push the blackness down from the grandparent.
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle.expect("the uncle is Red, so it exists")).set_color(Color::Black);
                self.node_mut(grandparent).set_color(Color::Red);
                z = grandparent;
                continue;
            }

            if self.direction_of(parent, Some(z)) != side {
                // Case 2: z is the inner child; rotate the zig-zag straight.
                z = parent;
                self.rotate(z, side);
            }

            // Case 3: z is the outer child.
            let parent = self.node(z).parent().expect("case 2 leaves `z` below its old parent");
            let grandparent = self.node(parent).parent().expect("the straightened chain is three deep");
            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(grandparent).set_color(Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        let root = self.root.expect("fixup runs on a non-empty tree");
        self.node_mut(root).set_color(Color::Black);
    }

    /// Removes one occurrence of `key`, returning its entry; `None` leaves
    /// the tree untouched.
    ///
    /// Standard three-way splice: a node with at most one child is replaced
    /// by that child; otherwise the minimum of the right subtree (`y`) is
    /// spliced out of its own position, promoted into `z`'s, and inherits
    /// `z`'s color. Subtree counts shrink along the path from the position
    /// that actually empties - `y`'s original position when `y != z` - and
    /// the promoted node is recounted from its new children. If the spliced
    /// color was Black, the delete fixup runs on the occupant of the emptied
    /// position, which may be nil.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let z = self.search_node(key)?;
        Some(self.remove_node(z))
    }

    /// One-based rank of `key`, or `None` if absent.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search_node(key).map(|h| self.rank_of_node(h))
    }
}

impl<K, V> RawOSRBTree<K, V> {
    /// Splices the node at `z` out of the tree and returns its entry.
    pub(crate) fn remove_node(&mut self, z: Handle) -> (K, V) {
        let left = self.node(z).child(Direction::Left);
        let right = self.node(z).child(Direction::Right);

        let spliced_color;
        let x;
        let x_parent;
        if left.is_none() {
            spliced_color = self.node(z).color();
            x = right;
            x_parent = self.node(z).parent();
            self.transplant(z, right);
            self.decrement_sizes(z);
        } else if right.is_none() {
            spliced_color = self.node(z).color();
            x = left;
            x_parent = self.node(z).parent();
            self.transplant(z, left);
            self.decrement_sizes(z);
        } else {
            let y = self.extremum(right.expect("two-child case"), Direction::Left);
            // y's position is the one that empties; shrink that path first.
            self.decrement_sizes(y);
            spliced_color = self.node(y).color();
            x = self.node(y).child(Direction::Right);

            if self.node(y).parent() == Some(z) {
                x_parent = Some(y);
            } else {
                x_parent = self.node(y).parent();
                self.transplant(y, x);
                let z_right = self.node(z).child(Direction::Right);
                self.node_mut(y).set_child(Direction::Right, z_right);
                if let Some(r) = z_right {
                    self.node_mut(r).set_parent(Some(y));
                }
            }

            self.transplant(z, Some(y));
            let z_left = self.node(z).child(Direction::Left);
            self.node_mut(y).set_child(Direction::Left, z_left);
            if let Some(l) = z_left {
                self.node_mut(l).set_parent(Some(y));
            }
            self.recount(y);
            let z_color = self.node(z).color();
            self.node_mut(y).set_color(z_color);
        }

        if spliced_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }
        self.len -= 1;
        self.nodes.take(z).into_pair()
    }

    /// Restores the red-black invariants after a Black node was spliced out.
    ///
    /// `x` occupies the emptied position and carries the extra blackness; it
    /// may be nil, so its structural parent is tracked alongside it. The
    /// loop examines `x`'s sibling `w` (never nil while the extra blackness
    /// is below the root): a Red `w` is rotated up to expose a Black one;
    /// a `w` with two Black children absorbs the recolor and the problem
    /// moves up; otherwise one or two rotations transfer the extra blackness
    /// into `w`'s far child and the loop ends at the root.
    fn delete_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && self.color_of(x) == Color::Black {
            let p = parent.expect("`x` is not the root, so it has a parent");
            let side = self.direction_of(p, x);
            let mut w = self.node(p).child(side.opposite()).expect("the doubled black always has a sibling");

            if self.node(w).color() == Color::Red {
                // Case 1: rotate the Red sibling up; the new sibling is Black.
                self.node_mut(w).set_color(Color::Black);
                self.node_mut(p).set_color(Color::Red);
                self.rotate(p, side);
                w = self.node(p).child(side.opposite()).expect("case 1 leaves a sibling in place");
            }

            let near = self.node(w).child(side);
            let far = self.node(w).child(side.opposite());
            if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                // Case 2: pull the extra blackness up one level.
                self.node_mut(w).set_color(Color::Red);
                x = Some(p);
                parent = self.node(p).parent();
                continue;
            }

            if self.color_of(far) == Color::Black {
                // Case 3: fold the near-Red shape into the far-Red shape.
                self.node_mut(near.expect("the near child is Red, so it exists")).set_color(Color::Black);
                self.node_mut(w).set_color(Color::Red);
                self.rotate(w, side.opposite());
                w = self.node(p).child(side.opposite()).expect("case 3 leaves a sibling in place");
            }

            // Case 4: the far child is Red; one rotation settles the debt.
            let p_color = self.node(p).color();
            self.node_mut(w).set_color(p_color);
            self.node_mut(p).set_color(Color::Black);
            let far = self.node(w).child(side.opposite()).expect("the far child is Red, so it exists");
            self.node_mut(far).set_color(Color::Black);
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }
        if let Some(x) = x {
            self.node_mut(x).set_color(Color::Black);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<K: Ord + core::fmt::Debug, V> RawOSRBTree<K, V> {
        /// Validates every tree invariant, panicking with a description of
        /// each violation. Intended to run after every mutation in tests.
        pub(crate) fn validate_invariants(&self) {
            let Some(root) = self.root else {
                assert_eq!(self.len, 0, "empty tree should have len 0");
                return;
            };

            let mut errors: Vec<String> = Vec::new();
            if self.node(root).color() != Color::Black {
                errors.push(format!("root {root:?} is not Black"));
            }
            if self.node(root).parent().is_some() {
                errors.push(format!("root {root:?} has a parent"));
            }

            let (_, total) = self.validate_node(root, &mut errors);
            if total != self.len {
                errors.push(format!("len mismatch: self.len={}, counted={}", self.len, total));
            }

            assert!(errors.is_empty(), "tree invariant violations:\n{}", errors.join("\n"));
        }

        /// Returns (black-height, entry count) of the subtree at `handle`.
        fn validate_node(&self, handle: Handle, errors: &mut Vec<String>) -> (usize, usize) {
            let node = self.node(handle);
            let mut heights = [0usize; 2];
            let mut counted = 1usize;

            for direction in [Direction::Left, Direction::Right] {
                let child = node.child(direction);
                if let Some(c) = child {
                    if self.node(c).parent() != Some(handle) {
                        errors.push(format!("{direction:?} child of {handle:?} does not point back to it"));
                    }
                    if node.color() == Color::Red && self.node(c).color() == Color::Red {
                        errors.push(format!("Red node {handle:?} has Red {direction:?} child {c:?}"));
                    }
                    // BST order with right-routed duplicates: the whole left
                    // subtree is <= the key, the whole right subtree >=.
                    let extreme = self.node(self.extremum(c, direction)).key();
                    let ordered = match direction {
                        Direction::Left => extreme <= node.key(),
                        Direction::Right => extreme >= node.key(),
                    };
                    if !ordered {
                        errors.push(format!("BST order violated between {handle:?} and its {direction:?} subtree"));
                    }
                    let (height, count) = self.validate_node(c, errors);
                    heights[direction as usize] = height;
                    counted += count;
                }
            }

            if heights[0] != heights[1] {
                errors.push(format!(
                    "black-height mismatch under {handle:?}: left={}, right={}",
                    heights[0], heights[1]
                ));
            }
            if node.size().to_usize() != counted {
                errors.push(format!(
                    "size augmentation violated at {handle:?}: stored={}, counted={counted}",
                    node.size().to_usize()
                ));
            }

            let own = if node.color() == Color::Black { 1 } else { 0 };
            (heights[0] + own, counted)
        }

        /// In-order node handles, for tests that address occurrences.
        fn inorder_handles(&self) -> Vec<Handle> {
            let mut out = Vec::with_capacity(self.len);
            let mut next = self.root.map(|r| self.extremum(r, Direction::Left));
            while let Some(h) = next {
                out.push(h);
                next = self.neighbor(h, Direction::Right);
            }
            out
        }
    }

    fn tree_of(keys: &[i64]) -> RawOSRBTree<i64, i64> {
        let mut tree = RawOSRBTree::new();
        for &k in keys {
            tree.insert(k, k);
            tree.validate_invariants();
        }
        tree
    }

    #[test]
    fn insert_search_remove_round() {
        let mut tree = tree_of(&[10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(tree.len(), 7);

        let inorder: Vec<i64> = tree.inorder_handles().iter().map(|&h| *tree.node(h).key()).collect();
        assert_eq!(inorder, [10, 20, 30, 40, 50, 60, 70]);

        assert_eq!(tree.select(4).map(|h| *tree.node(h).key()), Some(40));
        assert_eq!(tree.rank_of(&40), Some(4));

        assert!(tree.remove(&20).is_some());
        tree.validate_invariants();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.get(&20), None);
        assert_eq!(tree.rank_of(&40), Some(3));
    }

    #[test]
    fn remove_absent_key_is_a_noop() {
        let mut tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.remove(&99), None);
        tree.validate_invariants();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn duplicates_occupy_distinct_positions() {
        let tree = tree_of(&[5, 5, 5]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.select(2).map(|h| *tree.node(h).key()), Some(5));

        // Each occurrence has its own positional rank.
        let ranks: Vec<usize> = tree.inorder_handles().iter().map(|&h| tree.rank_of_node(h)).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn rank_select_duality_per_node() {
        let tree = tree_of(&[7, 3, 7, 1, 9, 7, 5]);
        for pos in 1..=tree.len() {
            let handle = tree.select(pos).unwrap();
            assert_eq!(tree.rank_of_node(handle), pos);
        }
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.select(tree.len() + 1), None);
    }

    #[test]
    fn neighbors_follow_sorted_order() {
        let tree = tree_of(&[40, 10, 30, 20]);
        let key_of = |h: Option<Handle>| h.map(|h| *tree.node(h).key());

        let n10 = tree.search_node(&10).unwrap();
        let n40 = tree.search_node(&40).unwrap();
        assert_eq!(key_of(tree.neighbor(n10, Direction::Right)), Some(20));
        assert_eq!(key_of(tree.neighbor(n10, Direction::Left)), None);
        assert_eq!(key_of(tree.neighbor(n40, Direction::Right)), None);
        assert_eq!(key_of(tree.neighbor(n40, Direction::Left)), Some(30));
    }

    /// A node with both subtrees populated must answer predecessor queries
    /// from its *left* subtree's maximum; a wrong-side lookup would report
    /// 15 here.
    #[test]
    fn predecessor_uses_left_subtree() {
        let tree = tree_of(&[10, 5, 15]);
        let n10 = tree.search_node(&10).unwrap();
        let pred = tree.neighbor(n10, Direction::Left).unwrap();
        assert_eq!(*tree.node(pred).key(), 5);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i8),
        Remove(i8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // A narrow key range forces duplicates and removal hits.
        prop_oneof![
            3 => any::<i8>().prop_map(Op::Insert),
            2 => any::<i8>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Replays random insert/remove sequences against a sorted-vector
        /// multiset model, revalidating every invariant after each mutation.
        #[test]
        fn random_ops_preserve_all_invariants(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawOSRBTree<i8, ()> = RawOSRBTree::new();
            let mut model: Vec<i8> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(k) => {
                        tree.insert(k, ());
                        let at = model.partition_point(|&m| m <= k);
                        model.insert(at, k);
                    }
                    Op::Remove(k) => {
                        let removed = tree.remove(&k).is_some();
                        let position = model.iter().position(|&m| m == k);
                        prop_assert_eq!(removed, position.is_some());
                        if let Some(at) = position {
                            model.remove(at);
                        }
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let inorder: Vec<i8> = tree.inorder_handles().iter().map(|&h| *tree.node(h).key()).collect();
            prop_assert_eq!(inorder, model.clone());

            for (index, &key) in model.iter().enumerate() {
                let handle = tree.select(index + 1).unwrap();
                prop_assert_eq!(*tree.node(handle).key(), key);
                prop_assert_eq!(tree.rank_of_node(handle), index + 1);
            }
        }

        /// Inserting a key and removing it again restores the multiset.
        #[test]
        fn insert_then_remove_restores_multiset(keys in prop::collection::vec(any::<i8>(), 0..64), probe in any::<i8>()) {
            let mut tree: RawOSRBTree<i8, ()> = RawOSRBTree::new();
            for &k in &keys {
                tree.insert(k, ());
            }
            let before: Vec<i8> = tree.inorder_handles().iter().map(|&h| *tree.node(h).key()).collect();

            tree.insert(probe, ());
            tree.validate_invariants();
            prop_assert!(tree.remove(&probe).is_some());
            tree.validate_invariants();

            let after: Vec<i8> = tree.inorder_handles().iter().map(|&h| *tree.node(h).key()).collect();
            prop_assert_eq!(before, after);
        }
    }
}
