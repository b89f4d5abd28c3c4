/// Errors reported by the order-statistic queries.
///
/// Plain membership lookups answer with `Option`; the positional queries
/// return `Result` instead because their failures carry meaning a bare
/// `None` would flatten - a rank query on an absent key and a select past
/// the end of the tree are different mistakes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The queried key has no occurrence in the tree.
    ///
    /// [`rank`](crate::OSRBTree::rank) reports an absent key with this
    /// variant rather than [`OutOfRange`](Error::OutOfRange): the failure is
    /// about the key, and there is no position to put in an `OutOfRange`
    /// payload.
    #[error("key not found")]
    NotFound,
    /// The queried position is outside the valid range `1..=len`.
    #[error("position {pos} out of range 1..={len}")]
    OutOfRange {
        /// The requested one-based position.
        pos: usize,
        /// The number of entries at the time of the query.
        len: usize,
    },
}
