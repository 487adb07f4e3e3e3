//! Sizing rules for a bloom filter derived from an expected item count and a target false
//! positive probability.

use std::f64::consts::LN_2;

/// Returns the number of bits `m` needed to hold `item_count` items with a false positive
/// probability of at most `fpp`.
///
/// `m = ceil(-(n * ln(fpp)) / ln(2)^2)`
///
/// Callers must ensure `item_count > 0` and `0 < fpp < 1`.
///
/// # Examples
///
/// ```
/// use membership_filters::bloom::calculate_size;
///
/// assert_eq!(calculate_size(3, 0.1), 15);
/// assert_eq!(calculate_size(10, 0.01), 96);
/// ```
pub fn calculate_size(item_count: usize, fpp: f64) -> usize {
    (-(item_count as f64) * fpp.ln() / (LN_2 * LN_2)).ceil() as usize
}

/// Returns the number of hash functions `k` for a filter of `bit_count` bits holding
/// `item_count` items.
///
/// `k = floor((m / n) * ln(2))`, never less than 1.
///
/// # Examples
///
/// ```
/// use membership_filters::bloom::hash_count;
///
/// assert_eq!(hash_count(15, 3), 3);
/// assert_eq!(hash_count(1, 100), 1);
/// ```
pub fn hash_count(bit_count: usize, item_count: usize) -> usize {
    let count = ((bit_count as f64) / (item_count as f64) * LN_2).floor() as usize;
    count.max(1)
}
