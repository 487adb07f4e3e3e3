//! Sizing rules for a cuckoo filter.

/// Returns the number of buckets for `item_count` items in buckets of `bucket_size` entries
/// filled to `load_factor`.
///
/// The exact requirement `ceil(n / (load_factor * bucket_size))` is rounded up to the next power
/// of two so that `(index ^ hash) % bucket_count` maps a fingerprint's two candidate buckets onto
/// each other.
///
/// # Examples
///
/// ```
/// use membership_filters::cuckoo::bucket_count;
///
/// assert_eq!(bucket_count(3, 0.9, 2), 2);
/// assert_eq!(bucket_count(10, 0.9, 2), 8);
/// assert_eq!(bucket_count(1000, 0.9, 2), 1024);
/// ```
pub fn bucket_count(item_count: usize, load_factor: f64, bucket_size: usize) -> usize {
    let exact = (item_count as f64 / (load_factor * bucket_size as f64)).ceil() as usize;
    exact.max(1).next_power_of_two()
}

/// Returns the fingerprint width in bytes for buckets of `bucket_size` entries and a target
/// false positive probability of `fpp`.
///
/// `f = ceil(ceil(log2(2 * bucket_size / fpp)) / 8)`
///
/// # Examples
///
/// ```
/// use membership_filters::cuckoo::fingerprint_size;
///
/// assert_eq!(fingerprint_size(2, 0.1), 1);
/// assert_eq!(fingerprint_size(2, 0.01), 2);
/// assert_eq!(fingerprint_size(1000, 1e-16), 9);
/// ```
pub fn fingerprint_size(bucket_size: usize, fpp: f64) -> usize {
    let bit_count = (2.0 * bucket_size as f64 / fpp).log2().ceil();
    (bit_count / 8.0).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::{bucket_count, fingerprint_size};

    #[test]
    fn test_bucket_count() {
        assert_eq!(bucket_count(3, 0.9, 2), 2);
        assert_eq!(bucket_count(10, 0.9, 2), 8);
        assert_eq!(bucket_count(1, 1.0, 4), 1);
        assert_eq!(bucket_count(1000, 0.9, 2), 1024);
        assert_eq!(bucket_count(1000, 0.5, 4), 512);
    }

    #[test]
    fn test_bucket_count_is_power_of_two() {
        for item_count in 1..500 {
            assert!(bucket_count(item_count, 0.9, 2).is_power_of_two());
        }
    }

    #[test]
    fn test_fingerprint_size() {
        assert_eq!(fingerprint_size(2, 0.1), 1);
        assert_eq!(fingerprint_size(2, 0.01), 2);
        assert_eq!(fingerprint_size(4, 0.05), 1);
        assert_eq!(fingerprint_size(4, 0.03), 2);
        assert_eq!(fingerprint_size(2, 1e-6), 3);
        assert_eq!(fingerprint_size(2, 1e-18), 8);
        assert_eq!(fingerprint_size(2, 1e-19), 9);
        assert_eq!(fingerprint_size(1000, 1e-16), 9);
        assert_eq!(fingerprint_size(2, 1e-60), 26);
    }
}
