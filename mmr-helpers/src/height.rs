//! Node heights and the offsets used to climb a mountain.
//!
//! Positions are 1-indexed. In a 1-indexed MMR the nodes on the leftmost
//! branch of the first mountain sit at all-ones positions (1, 3, 7, 15, ...),
//! and the height of a node equals the height of the leftmost-branch node it
//! maps onto after repeatedly moving left by `2^(bit_length - 1) - 1`.
//!
//! ```text
//!             15
//!        /          \
//!       7            14
//!     /   \        /    \
//!    3     6     10      13      18
//!   / \   / \   /  \    /  \    /  \
//!  1   2 4   5 8    9  11  12  16  17  19
//! ```

use crate::bits::{all_ones, bit_length};

/// Return the height of the node at 1-indexed position `pos`.
///
/// Leaves have height 0. Position 0 is not a node; it yields 0.
pub fn get_height(pos: u64) -> u32 {
    if pos == 0 {
        return 0;
    }

    let mut pos = pos;
    // at most bit_length(pos) iterations, pos stays >= 1
    while !all_ones(pos) {
        pos -= (1 << (bit_length(pos) - 1)) - 1;
    }
    bit_length(pos) - 1
}

/// Offset from a node to its parent at the given height, when the node is a
/// left child.
///
/// No bounds checking. Heights of 63 and above have no parent inside a
/// 64-bit position space; they yield 0.
pub fn parent_offset(height: u32) -> u64 {
    2u64.checked_shl(height).unwrap_or(0)
}

/// Offset from a node to its sibling at the given height.
///
/// Wraps to `u64::MAX` for heights of 63 and above.
pub fn sibling_offset(height: u32) -> u64 {
    parent_offset(height).wrapping_sub(1)
}
