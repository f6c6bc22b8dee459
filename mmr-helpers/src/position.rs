//! Moving between leaf indices and node positions, and from a node to its
//! family (sibling and parent) or up to its enclosing peak.
//!
//! Positions are 1-indexed; leaf indices are 0-based.

use crate::{
    Error, Result,
    bits::count_ones,
    height::{get_height, parent_offset, sibling_offset},
    shape::{elements_count_to_leaf_count, is_peak, try_find_peaks},
};

/// Compute the MMR size after inserting `leaf_count` leaves.
///
/// # Safety (arithmetic)
///
/// Overflows when `leaf_count > 2^63`; the resulting MMR would not fit in
/// `u64` positions.
pub fn leaf_count_to_elements_count(leaf_count: u64) -> u64 {
    // each peak saves one node relative to a full binary tree of 2L nodes
    leaf_count - count_ones(leaf_count) as u64 + leaf_count
}

/// Compute the MMR size after inserting `leaf_count` leaves, or `None` when
/// it does not fit in `u64` (`leaf_count > 2^63`).
pub fn checked_leaf_count_to_elements_count(leaf_count: u64) -> Option<u64> {
    (leaf_count - count_ones(leaf_count) as u64).checked_add(leaf_count)
}

/// Convert a 0-based leaf index to its 1-indexed MMR position.
///
/// # Safety (arithmetic)
///
/// Overflows when `index >= 2^63`.
pub fn leaf_index_to_pos(index: u64) -> u64 {
    leaf_count_to_elements_count(index) + 1
}

/// Convert a 1-indexed position back to its 0-based leaf index.
///
/// Returns `None` for position 0 and for internal nodes.
pub fn pos_to_leaf_index(pos: u64) -> Option<u64> {
    if pos == 0 || get_height(pos) != 0 {
        return None;
    }
    // the MMR right before a leaf is written is always complete
    elements_count_to_leaf_count(pos - 1).ok()
}

/// Which child of its parent a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The node's sibling follows it; the parent is `parent_offset` away.
    Left,
    /// The node's sibling precedes it; the parent is the next position.
    Right,
}

/// A node's height together with the positions of its sibling and parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Family {
    /// Height of the node.
    pub height: u32,
    /// Which child the node is.
    pub side: Side,
    /// Position of the sibling.
    pub sibling: u64,
    /// Position of the parent.
    pub parent: u64,
}

/// Return the family of the node at `pos`.
///
/// Whether the node has a parent inside a given MMR is up to the caller: a
/// peak's "parent" is the position it would merge into on a later append.
/// Returns `None` for position 0 or when the parent position does not fit in
/// `u64`.
pub fn family(pos: u64) -> Option<Family> {
    if pos == 0 {
        return None;
    }
    let height = get_height(pos);
    let next_height = get_height(pos.checked_add(1)?);
    if next_height > height {
        Some(Family {
            height,
            side: Side::Right,
            sibling: pos.checked_sub(sibling_offset(height))?,
            parent: pos + 1,
        })
    } else {
        Some(Family {
            height,
            side: Side::Left,
            sibling: pos.checked_add(sibling_offset(height))?,
            parent: pos.checked_add(parent_offset(height))?,
        })
    }
}

/// The climb from a node to the peak of its mountain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakPath {
    /// Sibling positions met on the way up, lowest first.
    pub siblings: Vec<u64>,
    /// Position of the peak reached.
    pub peak: u64,
}

impl PeakPath {
    /// Number of steps from the starting node to the peak.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Returns `true` if the starting node is itself a peak.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

/// Collect the sibling positions from `pos` up to its enclosing peak in an
/// MMR of `elements_count` elements.
///
/// Fails with [`Error::InvalidElementsCount`] if `elements_count` is not a
/// valid MMR size, and with [`Error::PositionOutOfRange`] if `pos` is 0 or
/// beyond `elements_count`.
pub fn path_to_peak(pos: u64, elements_count: u64) -> Result<PeakPath> {
    let peaks = try_find_peaks(elements_count)?;
    let out_of_range = || Error::PositionOutOfRange {
        position: pos,
        elements_count,
    };
    if pos == 0 || pos > elements_count {
        return Err(out_of_range());
    }

    let mut siblings = Vec::new();
    let mut current = pos;
    while !is_peak(current, &peaks) {
        let family = family(current).ok_or_else(out_of_range)?;
        if family.parent > elements_count {
            return Err(out_of_range());
        }
        siblings.push(family.sibling);
        current = family.parent;
    }
    Ok(PeakPath {
        siblings,
        peak: current,
    })
}
