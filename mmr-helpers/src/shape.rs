//! Shape of an MMR derived from its element count.
//!
//! Every function here decomposes an element count greedily into mountains
//! of `2^k - 1` nodes, largest first. A count is valid when nothing is left
//! over. Peaks are reported as 1-indexed positions.
//!
//! For an MMR with 11 leaves (19 elements) the peaks are `[15, 18, 19]` and
//! the peak bitmap is `0b1011`:
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

use tracing::debug;

use crate::{
    Error, Result,
    bits::{bit_length, count_trailing_ones, mountain_size_bound},
};

fn invalid_elements_count(elements_count: u64, remainder: u64) -> Error {
    debug!(elements_count, remainder, "elements count is not a valid MMR shape");
    Error::InvalidElementsCount {
        elements_count,
        remainder,
    }
}

/// Convert the number of elements in an MMR to its number of leaves.
///
/// Returns [`Error::InvalidElementsCount`] if `elements_count` does not
/// decompose into mountains.
pub fn elements_count_to_leaf_count(elements_count: u64) -> Result<u64> {
    // each mountain of 2^k - 1 nodes sets bit k - 1 of the peak map, which
    // is exactly its leaf count
    let (peak_map, remainder) = peak_map_height(elements_count);
    if remainder > 0 {
        return Err(invalid_elements_count(elements_count, remainder));
    }
    Ok(peak_map)
}

/// Return the 1-indexed peak positions of an MMR of `elements_count`
/// elements, left to right.
///
/// An invalid `elements_count` yields an empty vector, as does `0`. Use
/// [`try_find_peaks`] to tell the two apart.
pub fn find_peaks(elements_count: u64) -> Vec<u64> {
    try_find_peaks(elements_count).unwrap_or_default()
}

/// Like [`find_peaks`], but fails with [`Error::InvalidElementsCount`] on an
/// invalid `elements_count`.
pub fn try_find_peaks(elements_count: u64) -> Result<Vec<u64>> {
    let mut remaining = elements_count;
    let mut mountain_size = mountain_size_bound(elements_count);
    let mut mountain_index_shift = 0;
    let mut peaks = Vec::with_capacity(bit_length(elements_count) as usize);
    while mountain_size > 0 {
        if mountain_size <= remaining {
            mountain_index_shift += mountain_size;
            peaks.push(mountain_index_shift);
            remaining -= mountain_size;
        }
        mountain_size >>= 1;
    }
    if remaining > 0 {
        return Err(invalid_elements_count(elements_count, remaining));
    }
    Ok(peaks)
}

/// Returns `true` if `pos` is one of `peaks`.
pub fn is_peak(pos: u64, peaks: &[u64]) -> bool {
    peaks.contains(&pos)
}

/// Number of merge nodes created when one leaf is appended to an MMR that
/// holds `leaf_count` leaves. The appended leaf itself is not counted.
pub fn leaf_count_to_append_no_merges(leaf_count: u64) -> u32 {
    count_trailing_ones(leaf_count)
}

/// Returns the peak bitmap of `size` together with the part of `size` not
/// covered by any mountain.
///
/// Bit `h` of the bitmap is set when a mountain of height `h` is present.
/// For a valid size the remainder is 0 and the bitmap equals the leaf count.
/// For an invalid size the bitmap describes the mountains that did fit.
pub fn peak_map_height(size: u64) -> (u64, u64) {
    let mut remaining = size;
    let mut peak_size = mountain_size_bound(size);
    let mut peak_map = 0;
    while peak_size > 0 {
        peak_map <<= 1;
        if remaining >= peak_size {
            remaining -= peak_size;
            peak_map |= 1;
        }
        peak_size >>= 1;
    }
    (peak_map, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_count_to_leaf_count() {
        assert_eq!(elements_count_to_leaf_count(0), Ok(0));
        assert_eq!(elements_count_to_leaf_count(1), Ok(1));
        assert_eq!(elements_count_to_leaf_count(3), Ok(2));
        assert_eq!(elements_count_to_leaf_count(4), Ok(3));
        assert_eq!(elements_count_to_leaf_count(7), Ok(4));
        assert_eq!(elements_count_to_leaf_count(19), Ok(11));
    }

    #[test]
    fn test_elements_count_to_leaf_count_invalid() {
        assert_eq!(
            elements_count_to_leaf_count(2),
            Err(Error::InvalidElementsCount {
                elements_count: 2,
                remainder: 1,
            })
        );
        assert_eq!(
            elements_count_to_leaf_count(6),
            Err(Error::InvalidElementsCount {
                elements_count: 6,
                remainder: 2,
            })
        );
        assert!(elements_count_to_leaf_count(5).is_err());
        assert!(elements_count_to_leaf_count(9).is_err());
    }

    #[test]
    fn test_find_peaks() {
        assert_eq!(find_peaks(1), vec![1]);
        assert_eq!(find_peaks(3), vec![3]);
        assert_eq!(find_peaks(4), vec![3, 4]);
        assert_eq!(find_peaks(7), vec![7]);
        assert_eq!(find_peaks(8), vec![7, 8]);
        assert_eq!(find_peaks(10), vec![7, 10]);
        assert_eq!(find_peaks(11), vec![7, 10, 11]);
        assert_eq!(find_peaks(19), vec![15, 18, 19]);
    }

    #[test]
    fn test_find_peaks_empty_and_invalid_are_indistinguishable() {
        assert_eq!(find_peaks(0), Vec::<u64>::new());
        assert_eq!(find_peaks(2), Vec::<u64>::new());
        assert_eq!(find_peaks(6), Vec::<u64>::new());
    }

    #[test]
    fn test_try_find_peaks() {
        assert_eq!(try_find_peaks(0), Ok(vec![]));
        assert_eq!(try_find_peaks(19), Ok(vec![15, 18, 19]));
        assert_eq!(
            try_find_peaks(2),
            Err(Error::InvalidElementsCount {
                elements_count: 2,
                remainder: 1,
            })
        );
    }

    #[test]
    fn test_is_peak() {
        let peaks = find_peaks(19);
        assert!(is_peak(15, &peaks));
        assert!(is_peak(18, &peaks));
        assert!(is_peak(19, &peaks));
        assert!(!is_peak(14, &peaks));
        assert!(!is_peak(0, &peaks));
        assert!(!is_peak(1, &[]));
        // order and duplicates do not matter
        assert!(is_peak(3, &[4, 3, 3]));
    }

    #[test]
    fn test_leaf_count_to_append_no_merges() {
        assert_eq!(leaf_count_to_append_no_merges(0), 0);
        assert_eq!(leaf_count_to_append_no_merges(1), 1);
        assert_eq!(leaf_count_to_append_no_merges(2), 0);
        assert_eq!(leaf_count_to_append_no_merges(3), 2);
        assert_eq!(leaf_count_to_append_no_merges(4), 0);
        assert_eq!(leaf_count_to_append_no_merges(7), 3);
        assert_eq!(leaf_count_to_append_no_merges(11), 2);
    }

    #[test]
    fn test_peak_map_height() {
        assert_eq!(peak_map_height(0), (0, 0));
        assert_eq!(peak_map_height(1), (0b1, 0));
        assert_eq!(peak_map_height(3), (0b10, 0));
        assert_eq!(peak_map_height(4), (0b11, 0));
        assert_eq!(peak_map_height(19), (0b1011, 0));
        // invalid sizes report the mountains that fit plus the leftover
        assert_eq!(peak_map_height(2), (0b01, 1));
        assert_eq!(peak_map_height(6), (0b011, 2));
    }

    #[test]
    fn test_peak_map_height_full_width() {
        let (peak_map, remainder) = peak_map_height(u64::MAX);
        assert_eq!(peak_map, 1 << 63);
        assert_eq!(remainder, 0);
        assert_eq!(elements_count_to_leaf_count(u64::MAX), Ok(1 << 63));
        assert_eq!(find_peaks(u64::MAX), vec![u64::MAX]);
    }
}
