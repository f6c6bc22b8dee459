//! A validated MMR size.

use std::fmt;

use bincode::{
    BorrowDecode, Decode, Encode,
    de::{BorrowDecoder, Decoder},
    error::DecodeError,
};

use crate::{
    Error, Result,
    position::checked_leaf_count_to_elements_count,
    shape::{
        elements_count_to_leaf_count, find_peaks, leaf_count_to_append_no_merges, peak_map_height,
    },
};

/// The element count of a well-formed MMR.
///
/// Unlike the free functions in [`crate::shape`], an `MmrSize` can only be
/// built from a count that decomposes into mountains, so every accessor is
/// infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u64", into = "u64")
)]
pub struct MmrSize(u64);

/// Positions written by appending one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Append {
    /// Position of the new leaf.
    pub leaf_position: u64,
    /// Positions of the merge nodes created after the leaf, in write order.
    pub merge_positions: Vec<u64>,
    /// Size of the MMR once the leaf and its merges are written.
    pub new_size: MmrSize,
}

impl Append {
    /// Total number of nodes written, leaf included.
    pub fn written_count(&self) -> u64 {
        1 + self.merge_positions.len() as u64
    }
}

impl MmrSize {
    /// An MMR with no elements.
    pub const EMPTY: MmrSize = MmrSize(0);

    /// Validate `elements_count` as an MMR size.
    ///
    /// Returns [`Error::InvalidElementsCount`] if it does not decompose into
    /// mountains.
    pub fn new(elements_count: u64) -> Result<Self> {
        elements_count_to_leaf_count(elements_count)?;
        Ok(MmrSize(elements_count))
    }

    /// Size of an MMR holding `leaf_count` leaves.
    ///
    /// Returns `None` when `leaf_count > 2^63`: the MMR would not fit in
    /// `u64` positions.
    pub fn from_leaf_count(leaf_count: u64) -> Option<Self> {
        checked_leaf_count_to_elements_count(leaf_count).map(MmrSize)
    }

    /// Total number of nodes (leaves and merge nodes).
    pub fn elements_count(&self) -> u64 {
        self.0
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> u64 {
        self.peak_map()
    }

    /// Peak bitmap: bit `h` is set when a mountain of height `h` exists.
    pub fn peak_map(&self) -> u64 {
        peak_map_height(self.0).0
    }

    /// 1-indexed peak positions, left to right.
    pub fn peaks(&self) -> Vec<u64> {
        find_peaks(self.0)
    }

    /// Returns `true` if the MMR has no elements.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of merge nodes the next append creates.
    pub fn append_no_merges(&self) -> u32 {
        leaf_count_to_append_no_merges(self.leaf_count())
    }

    /// Position the next leaf is written to, or `None` if it does not fit in
    /// `u64`.
    pub fn next_leaf_position(&self) -> Option<u64> {
        self.0.checked_add(1)
    }

    /// Predict the positions written by appending one leaf.
    ///
    /// Returns `None` if the grown MMR would not fit in `u64`.
    pub fn append(&self) -> Option<Append> {
        let leaf_position = self.next_leaf_position()?;
        let merges = u64::from(self.append_no_merges());
        let last = leaf_position.checked_add(merges)?;
        Some(Append {
            leaf_position,
            merge_positions: (leaf_position + 1..=last).collect(),
            new_size: MmrSize(last),
        })
    }

    /// Serialize to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard().with_big_endian();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidData(format!("failed to encode MmrSize: {}", e)))
    }

    /// Deserialize from bytes, re-validating the element count.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard().with_big_endian();
        let (size, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidData(format!("failed to decode MmrSize: {}", e)))?;
        Ok(size)
    }
}

impl TryFrom<u64> for MmrSize {
    type Error = Error;

    fn try_from(elements_count: u64) -> Result<Self> {
        MmrSize::new(elements_count)
    }
}

impl From<MmrSize> for u64 {
    fn from(size: MmrSize) -> Self {
        size.0
    }
}

impl fmt::Display for MmrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} elements ({} leaves)", self.0, self.leaf_count())
    }
}

impl<Context> Decode<Context> for MmrSize {
    fn decode<D: Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> core::result::Result<Self, DecodeError> {
        let elements_count = u64::decode(decoder)?;
        MmrSize::new(elements_count).map_err(|_| DecodeError::Other("invalid MMR elements count"))
    }
}

impl<'de, Context> BorrowDecode<'de, Context> for MmrSize {
    fn borrow_decode<D: BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> core::result::Result<Self, DecodeError> {
        let elements_count = u64::borrow_decode(decoder)?;
        MmrSize::new(elements_count).map_err(|_| DecodeError::Other("invalid MMR elements count"))
    }
}
