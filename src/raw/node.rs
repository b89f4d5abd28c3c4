use super::handle::Handle;
use super::size::Size;

/// Color tag of a red-black node.
///
/// Kept as an explicit two-variant enum rather than a boolean so the fixup
/// case analysis reads the way it is stated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A child slot of a node, and the side taken by a descent step.
///
/// The insert and delete fixups are exact mirror images of each other; with
/// the descent side carried as a value and [`opposite`](Direction::opposite)
/// available, each fixup is written once instead of twice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One entry of the tree: a key-value pair plus the red-black bookkeeping
/// (color, parent and child links) and the subtree element count used by the
/// order-statistic operations. `None` in a link slot is the nil sentinel and
/// uniformly reads as a Black subtree of size zero.
#[derive(Clone)]
pub(crate) struct RbNode<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Option<Handle>,
    children: [Option<Handle>; 2],
    size: Size,
}

impl<K, V> RbNode<K, V> {
    /// A freshly inserted entry: Red, nil children, subtree of one.
    pub(crate) const fn new_leaf(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            children: [None, None],
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    /// The key stays shared; mutating it would break the search order.
    #[inline]
    pub(crate) const fn pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    pub(crate) const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn child(&self, direction: Direction) -> Option<Handle> {
        self.children[direction as usize]
    }

    pub(crate) const fn set_child(&mut self, direction: Direction, child: Option<Handle>) {
        self.children[direction as usize] = child;
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) const fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
