//! Bit primitives over `u64`.
//!
//! Everything else in the crate is built on these. The domain is fixed at
//! 64 bits: [`leading_zeros`] and [`mountain_size_bound`] depend on it.

/// Number of bits needed to represent `n` in base 2.
///
/// `bit_length(0) == 0`. For `n >= 1`,
/// `2^(bit_length(n) - 1) <= n < 2^bit_length(n)`.
pub fn bit_length(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Number of set bits in `n`.
pub fn count_ones(n: u64) -> u32 {
    n.count_ones()
}

/// Number of consecutive set bits starting at bit 0.
pub fn count_trailing_ones(n: u64) -> u32 {
    n.trailing_ones()
}

/// Returns `true` if every bit of `n` up to its bit length is set, that is
/// `n == 2^bit_length(n) - 1`.
///
/// Following `bit_length(0) == 0`, zero counts as all ones.
pub fn all_ones(n: u64) -> bool {
    // n + 1 is a power of two (or wraps to zero for u64::MAX)
    n & n.wrapping_add(1) == 0
}

/// Leading zeros of `n` as a 64-bit unsigned value: `64` for `0`, else
/// `64 - bit_length(n)`.
pub fn leading_zeros(n: u64) -> u32 {
    n.leading_zeros()
}

/// Largest all-ones value with the same bit length as `n`.
///
/// This is the first mountain size tried when greedily decomposing an MMR
/// of `n` elements. Returns `0` for `0`.
pub fn mountain_size_bound(n: u64) -> u64 {
    u64::MAX.checked_shr(leading_zeros(n)).unwrap_or(0)
}
