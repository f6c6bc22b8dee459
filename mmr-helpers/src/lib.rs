//! Merkle Mountain Range (MMR) position arithmetic.
//!
//! An MMR is an append-only forest of perfect binary trees ("mountains")
//! stored in a flat array. This crate answers the shape questions a storage
//! or hashing layer needs to ask about that array, using **1-indexed**
//! positions and `u64` counts throughout:
//!
//! - how many leaves an element count holds, and whether it is valid at all;
//! - where the peaks are;
//! - the height of a node and the offsets to its sibling and parent;
//! - which positions an append will write.
//!
//! Nothing here hashes, stores or proves anything.
//!
//! # Error policy
//!
//! [`elements_count_to_leaf_count`] fails on an element count that does not
//! decompose into mountains, while [`find_peaks`] returns an empty vector for
//! the same input (and for `0`). [`try_find_peaks`] and [`MmrSize`] apply the
//! failing policy uniformly.

#![warn(missing_docs)]

/// Bit primitives over `u64`.
pub mod bits;
mod error;
/// Node heights and parent/sibling offsets.
pub mod height;
/// Leaf/position conversion and node navigation.
pub mod position;
/// Leaf counts, peaks and peak bitmaps.
pub mod shape;
mod size;

pub use bits::{all_ones, bit_length, count_ones, count_trailing_ones, leading_zeros};
pub use error::{Error, Result};
pub use height::{get_height, parent_offset, sibling_offset};
pub use position::{
    Family, PeakPath, Side, checked_leaf_count_to_elements_count, family,
    leaf_count_to_elements_count, leaf_index_to_pos, path_to_peak, pos_to_leaf_index,
};
pub use shape::{
    elements_count_to_leaf_count, find_peaks, is_peak, leaf_count_to_append_no_merges,
    peak_map_height, try_find_peaks,
};
pub use size::{Append, MmrSize};
