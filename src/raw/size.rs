use super::handle::Handle;

/// A subtree element count.
///
/// Reuses [`Handle`]'s shifted representation so `Size` gets the same niche
/// and the same upper bound; an arena can never hold more elements than it
/// can hand out handles for, so the shared `MAX` is exact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    /// One more element in the subtree.
    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    /// One fewer element in the subtree.
    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        Self::from_usize(self.to_usize() - 1)
    }
}
