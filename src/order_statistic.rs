/// A one-based rank into the sorted order of the tree.
///
/// Rank 1 is the smallest entry and rank `len` the largest, matching the
/// usual statement of the order-statistic operations.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let mut tree = OSRBTree::new();
/// tree.insert("a", 10);
/// tree.insert("b", 20);
///
/// assert_eq!(tree[Rank(1)], 10);
/// assert_eq!(tree[Rank(2)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
