/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for MMR position arithmetic.
///
/// Only shape validation and encoding can fail; every other helper in this
/// crate is total over `u64`.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The element count does not decompose into a sequence of mountains.
    ///
    /// `remainder` is what was left over after greedily consuming every
    /// mountain that fit.
    #[error("invalid elements count {elements_count}: {remainder} elements left over")]
    InvalidElementsCount {
        /// The rejected element count.
        elements_count: u64,
        /// Elements not covered by any mountain.
        remainder: u64,
    },
    /// A 1-indexed position is zero or lies beyond the end of the MMR.
    #[error("position {position} out of range for MMR of {elements_count} elements")]
    PositionOutOfRange {
        /// The rejected position.
        position: u64,
        /// Size of the MMR the position was checked against.
        elements_count: u64,
    },
    /// Invalid serialized data.
    #[error("invalid MMR data: {0}")]
    InvalidData(String),
}
