//! Construction parameters for the filters.
//!
//! Both configs are plain values with chained setters. Filters validate them before allocating
//! anything, so an out-of-range value surfaces as [`FilterError::InvalidParameter`].
//!
//! [`FilterError::InvalidParameter`]: crate::FilterError::InvalidParameter

use crate::error::{FilterError, Result};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

const DEFAULT_EXPECTED_ITEMS: usize = 1_000;
const DEFAULT_FALSE_POSITIVE_PROBABILITY: f64 = 0.01;

/// Default number of fingerprints held by each cuckoo bucket.
pub const DEFAULT_BUCKET_SIZE: usize = 2;
/// Default bound on relocations per cuckoo insertion.
pub const DEFAULT_MAX_EVICTIONS: usize = 500;
/// Default fraction of cuckoo slots the filter is sized to fill.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.9;

fn validate_expected_items(expected_items: usize) -> Result<()> {
    if expected_items == 0 {
        return Err(FilterError::invalid(
            "expected_items",
            "must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_false_positive_probability(fpp: f64) -> Result<()> {
    // also rejects NaN
    if !(fpp > 0.0 && fpp < 1.0) {
        return Err(FilterError::invalid(
            "false_positive_probability",
            format!("must be in (0, 1), got {}", fpp),
        ));
    }
    Ok(())
}

/// Parameters for a [`BloomFilter`](crate::bloom::BloomFilter).
///
/// # Examples
///
/// ```
/// use membership_filters::BloomFilterConfig;
///
/// let config = BloomFilterConfig::new()
///     .with_expected_items(10_000)
///     .with_false_positive_probability(0.001);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(crate = "serde_crate")
)]
pub struct BloomFilterConfig {
    /// Number of keys the filter is sized for.
    pub expected_items: usize,
    /// Target false positive probability once `expected_items` keys are inserted.
    pub false_positive_probability: f64,
}

impl BloomFilterConfig {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of keys the filter is sized for.
    pub fn with_expected_items(mut self, expected_items: usize) -> Self {
        self.expected_items = expected_items;
        self
    }

    /// Sets the target false positive probability.
    pub fn with_false_positive_probability(mut self, fpp: f64) -> Self {
        self.false_positive_probability = fpp;
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        validate_expected_items(self.expected_items)?;
        validate_false_positive_probability(self.false_positive_probability)
    }
}

impl Default for BloomFilterConfig {
    fn default() -> Self {
        BloomFilterConfig {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_probability: DEFAULT_FALSE_POSITIVE_PROBABILITY,
        }
    }
}

/// Parameters for a [`CuckooFilter`](crate::cuckoo::CuckooFilter).
///
/// # Examples
///
/// ```
/// use membership_filters::CuckooFilterConfig;
///
/// let config = CuckooFilterConfig::new()
///     .with_expected_items(10)
///     .with_max_evictions(5)
///     .with_rng_seed(42);
/// assert_eq!(config.bucket_size, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(crate = "serde_crate")
)]
pub struct CuckooFilterConfig {
    /// Number of keys the filter is sized for.
    pub expected_items: usize,
    /// Target false positive probability, used to derive the fingerprint width.
    pub false_positive_probability: f64,
    /// Number of fingerprints each bucket holds.
    pub bucket_size: usize,
    /// Maximum number of relocations attempted by a single insertion.
    pub max_evictions: usize,
    /// Fraction of the total slots the filter is expected to fill, in `(0, 1]`.
    pub load_factor: f64,
    /// Seed for the eviction random walk. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl CuckooFilterConfig {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of keys the filter is sized for.
    pub fn with_expected_items(mut self, expected_items: usize) -> Self {
        self.expected_items = expected_items;
        self
    }

    /// Sets the target false positive probability.
    pub fn with_false_positive_probability(mut self, fpp: f64) -> Self {
        self.false_positive_probability = fpp;
        self
    }

    /// Sets the number of fingerprints per bucket.
    pub fn with_bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Sets the relocation budget per insertion.
    pub fn with_max_evictions(mut self, max_evictions: usize) -> Self {
        self.max_evictions = max_evictions;
        self
    }

    /// Sets the target load factor.
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Makes the eviction walk reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        validate_expected_items(self.expected_items)?;
        validate_false_positive_probability(self.false_positive_probability)?;
        if self.bucket_size == 0 {
            return Err(FilterError::invalid("bucket_size", "must be at least 1"));
        }
        if self.max_evictions == 0 {
            return Err(FilterError::invalid("max_evictions", "must be at least 1"));
        }
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(FilterError::invalid(
                "load_factor",
                format!("must be in (0, 1], got {}", self.load_factor),
            ));
        }
        Ok(())
    }
}

impl Default for CuckooFilterConfig {
    fn default() -> Self {
        CuckooFilterConfig {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_probability: DEFAULT_FALSE_POSITIVE_PROBABILITY,
            bucket_size: DEFAULT_BUCKET_SIZE,
            max_evictions: DEFAULT_MAX_EVICTIONS,
            load_factor: DEFAULT_LOAD_FACTOR,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BloomFilterConfig, CuckooFilterConfig};
    use crate::FilterError;

    fn invalid_name(err: FilterError) -> &'static str {
        match err {
            FilterError::InvalidParameter { name, .. } => name,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bloom_validate() {
        assert!(BloomFilterConfig::new().validate().is_ok());

        let config = BloomFilterConfig::new().with_expected_items(0);
        assert_eq!(invalid_name(config.validate().unwrap_err()), "expected_items");

        for fpp in &[0.0, 1.0, -0.5, 1.5, std::f64::NAN] {
            let config = BloomFilterConfig::new().with_false_positive_probability(*fpp);
            assert_eq!(
                invalid_name(config.validate().unwrap_err()),
                "false_positive_probability",
            );
        }
    }

    #[test]
    fn test_cuckoo_defaults() {
        let config = CuckooFilterConfig::default();
        assert_eq!(config.bucket_size, 2);
        assert_eq!(config.max_evictions, 500);
        assert!((config.load_factor - 0.9).abs() < std::f64::EPSILON);
        assert_eq!(config.rng_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cuckoo_validate() {
        let config = CuckooFilterConfig::new().with_bucket_size(0);
        assert_eq!(invalid_name(config.validate().unwrap_err()), "bucket_size");

        let config = CuckooFilterConfig::new().with_max_evictions(0);
        assert_eq!(invalid_name(config.validate().unwrap_err()), "max_evictions");

        let config = CuckooFilterConfig::new().with_load_factor(0.0);
        assert_eq!(invalid_name(config.validate().unwrap_err()), "load_factor");

        let config = CuckooFilterConfig::new().with_load_factor(1.0);
        assert!(config.validate().is_ok());

        let config = CuckooFilterConfig::new().with_false_positive_probability(1.0);
        assert_eq!(
            invalid_name(config.validate().unwrap_err()),
            "false_positive_probability",
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ser_de() {
        let config = CuckooFilterConfig::new()
            .with_expected_items(42)
            .with_rng_seed(7);

        let serialized = bincode::serialize(&config).unwrap();
        let de_config: CuckooFilterConfig = bincode::deserialize(&serialized).unwrap();

        assert_eq!(config, de_config);
    }
}
