use crate::bit_vec::BitVec;
use crate::bloom::sizing;
use crate::config::BloomFilterConfig;
use crate::error::Result;
use crate::util::DoubleHasher;
use crate::SipHasherBuilder;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use tracing::debug;

/// A space-efficient probabilistic data structure to test for membership in a set.
///
/// At its core, a bloom filter is a bit array, initially all set to zero. `K` hash functions
/// map each element to `K` bits in the bit array. An element definitely does not exist in the
/// bloom filter if any of the `K` bits are unset. An element is possibly in the set if all of the
/// `K` bits are set. This particular implementation of a bloom filter uses two hash functions to
/// simulate `K` hash functions.
///
/// Bits are only ever set, so the filter never produces false negatives and does not support
/// removal.
///
/// # Examples
///
/// ```
/// use membership_filters::bloom::BloomFilter;
///
/// let mut filter = BloomFilter::<String>::new(3, 0.1).unwrap();
///
/// assert!(!filter.contains("user1"));
/// filter.initialize_with_dataset(["user1", "user2", "user3"].iter().copied());
/// assert!(filter.contains("user1"));
/// assert!(filter.contains("user2"));
///
/// assert_eq!(filter.len(), 15);
/// assert_eq!(filter.hasher_count(), 3);
/// ```
#[derive(Debug, PartialEq)]
pub struct BloomFilter<T, B = SipHasherBuilder> {
    bit_vec: BitVec,
    hasher: DoubleHasher<T, B>,
    hasher_count: usize,
    _marker: PhantomData<T>,
}

impl<T> BloomFilter<T> {
    /// Constructs a new, empty `BloomFilter` with an estimated max capacity of `item_count` items,
    /// and a maximum false positive probability of `fpp`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `item_count` is 0 or `fpp` is not in `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::<String>::new(10, 0.01).unwrap();
    /// assert!(BloomFilter::<String>::new(0, 0.01).is_err());
    /// ```
    pub fn new(item_count: usize, fpp: f64) -> Result<Self> {
        Self::from_config(
            &BloomFilterConfig::new()
                .with_expected_items(item_count)
                .with_false_positive_probability(fpp),
        )
    }

    /// Constructs a new, empty `BloomFilter` from `config`, seeding its hashers from entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    /// use membership_filters::BloomFilterConfig;
    ///
    /// let filter = BloomFilter::<String>::from_config(&BloomFilterConfig::default()).unwrap();
    /// ```
    pub fn from_config(config: &BloomFilterConfig) -> Result<Self> {
        Self::with_hashers(
            config,
            [
                SipHasherBuilder::from_entropy(),
                SipHasherBuilder::from_entropy(),
            ],
        )
    }
}

impl<T, B> BloomFilter<T, B>
where
    B: BuildHasher,
{
    /// Constructs a new, empty `BloomFilter` from `config` and two hasher builders for double
    /// hashing.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    /// use membership_filters::{BloomFilterConfig, SipHasherBuilder};
    ///
    /// let filter = BloomFilter::<String>::with_hashers(
    ///     &BloomFilterConfig::new().with_expected_items(10),
    ///     [SipHasherBuilder::from_seed(0, 0), SipHasherBuilder::from_seed(1, 1)],
    /// )
    /// .unwrap();
    /// ```
    pub fn with_hashers(config: &BloomFilterConfig, hash_builders: [B; 2]) -> Result<Self> {
        config.validate()?;
        let bit_count =
            sizing::calculate_size(config.expected_items, config.false_positive_probability);
        let hasher_count = sizing::hash_count(bit_count, config.expected_items);
        debug!(
            expected_items = config.expected_items,
            fpp = config.false_positive_probability,
            bit_count,
            hasher_count,
            "constructed bloom filter"
        );
        Ok(BloomFilter {
            bit_vec: BitVec::new(bit_count),
            hasher: DoubleHasher::with_hashers(hash_builders),
            hasher_count,
            _marker: PhantomData,
        })
    }

    /// Inserts an element into the bloom filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::<String>::new(10, 0.01).unwrap();
    ///
    /// filter.insert("foo");
    /// assert!(filter.contains("foo"));
    /// ```
    pub fn insert<U>(&mut self, item: &U)
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let bit_count = self.bit_vec.len() as u64;
        let bit_vec = &mut self.bit_vec;
        self.hasher
            .hash(item)
            .take(self.hasher_count)
            .for_each(|hash| {
                bit_vec.set((hash % bit_count) as usize);
            })
    }

    /// Inserts every element of `items` in order and returns how many were inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::<String>::new(3, 0.1).unwrap();
    ///
    /// let usernames = ["user1", "user2", "user3"];
    /// assert_eq!(filter.initialize_with_dataset(usernames.iter().copied()), 3);
    /// ```
    pub fn initialize_with_dataset<'a, I, U>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a U>,
        T: Borrow<U>,
        U: Hash + ?Sized + 'a,
    {
        let mut count = 0;
        for item in items {
            self.insert(item);
            count += 1;
        }
        count
    }

    /// Checks if an element is possibly in the bloom filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::<String>::new(10, 0.01).unwrap();
    ///
    /// assert!(!filter.contains("foo"));
    /// filter.insert("foo");
    /// assert!(filter.contains("foo"));
    /// ```
    pub fn contains<U>(&self, item: &U) -> bool
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let bit_count = self.bit_vec.len() as u64;
        self.hasher
            .hash(item)
            .take(self.hasher_count)
            .all(|hash| self.bit_vec[(hash % bit_count) as usize])
    }

    /// Returns the number of bits in the bloom filter.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    /// Returns `true` if the bloom filter has no bits. A successfully constructed filter always
    /// has at least one.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.is_empty()
    }

    /// Returns the number of hash functions used by the bloom filter.
    pub fn hasher_count(&self) -> usize {
        self.hasher_count
    }

    /// Returns the number of set bits in the bloom filter.
    pub fn count_ones(&self) -> usize {
        self.bit_vec.count_ones()
    }

    /// Returns the number of unset bits in the bloom filter.
    pub fn count_zeros(&self) -> usize {
        self.bit_vec.count_zeros()
    }

    /// Returns the estimated false positive probability of the bloom filter. This value will
    /// increase as more items are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::<String>::new(100, 0.01).unwrap();
    /// assert!(filter.estimated_fpp() < std::f64::EPSILON);
    ///
    /// filter.insert("foo");
    /// assert!(filter.estimated_fpp() > std::f64::EPSILON);
    /// assert!(filter.estimated_fpp() < 0.01);
    /// ```
    pub fn estimated_fpp(&self) -> f64 {
        let single_fpp = self.bit_vec.count_ones() as f64 / self.bit_vec.len() as f64;
        single_fpp.powi(self.hasher_count as i32)
    }

    /// Returns a reference to the bloom filter's hasher builders.
    pub fn hashers(&self) -> &[B; 2] {
        self.hasher.hashers()
    }
}

#[cfg(test)]
mod tests {
    use super::BloomFilter;
    use crate::config::BloomFilterConfig;
    use crate::util::tests::{hash_builder_1, hash_builder_2};
    use crate::FilterError;
    use proptest::prelude::*;

    fn seeded_filter(item_count: usize, fpp: f64) -> BloomFilter<String> {
        let config = BloomFilterConfig::new()
            .with_expected_items(item_count)
            .with_false_positive_probability(fpp);
        BloomFilter::with_hashers(&config, [hash_builder_1(), hash_builder_2()]).unwrap()
    }

    #[test]
    fn test_new() {
        let mut filter = seeded_filter(10, 0.01);

        assert!(!filter.contains("foo"));
        filter.insert("foo");
        assert!(filter.contains("foo"));
        assert!(filter.count_ones() >= 1 && filter.count_ones() <= 6);
        assert_eq!(filter.count_ones() + filter.count_zeros(), 96);

        assert_eq!(filter.len(), 96);
        assert!(!filter.is_empty());
        assert_eq!(filter.hasher_count(), 6);
        assert_eq!(filter.hashers(), &[hash_builder_1(), hash_builder_2()]);
    }

    #[test]
    fn test_invalid_parameters() {
        for &(item_count, fpp) in &[(0, 0.1), (10, 0.0), (10, 1.0), (10, -1.0), (10, 2.0)] {
            match BloomFilter::<String>::new(item_count, fpp) {
                Err(FilterError::InvalidParameter { .. }) => {}
                other => panic!("expected InvalidParameter, got {:?}", other.map(|f| f.len())),
            }
        }
    }

    #[test]
    fn test_initialize_with_dataset() {
        let usernames = ["user1", "user2", "user3"];
        let mut filter = seeded_filter(usernames.len(), 0.1);

        assert_eq!(filter.initialize_with_dataset(usernames.iter().copied()), 3);
        for username in &usernames {
            assert!(filter.contains(*username));
        }
    }

    #[test]
    fn test_initialize_with_owned_dataset() {
        let usernames: Vec<String> = (0..50).map(|i| format!("user_{}", i)).collect();
        let mut filter = seeded_filter(usernames.len(), 0.01);

        assert_eq!(filter.initialize_with_dataset(&usernames), 50);
        assert!(usernames.iter().all(|username| filter.contains(username.as_str())));
    }

    #[test]
    fn test_empty_filter() {
        let filter = seeded_filter(10, 0.1);
        assert_eq!(filter.count_ones(), 0);
        assert!(!filter.contains("non_existent_user"));
        assert!((0..1000).all(|i| !filter.contains(format!("user{}", i).as_str())));
    }

    #[test]
    fn test_estimated_fpp() {
        let mut filter = seeded_filter(100, 0.01);
        assert!(filter.estimated_fpp() < std::f64::EPSILON);

        filter.insert("foo");

        let expected_fpp = (filter.count_ones() as f64 / 959f64).powi(6);
        assert!((filter.estimated_fpp() - expected_fpp).abs() < std::f64::EPSILON);
    }

    #[test]
    fn test_false_positive_rate() {
        let fpp = 0.1;
        let mut filter = seeded_filter(1000, fpp);
        let usernames: Vec<String> = (0..1000).map(|i| format!("user_{}", i)).collect();
        filter.initialize_with_dataset(&usernames);

        let total_checks = 10_000;
        let false_positives = (0..total_checks)
            .filter(|i| filter.contains(format!("absent_{}", i).as_str()))
            .count();

        let rate = false_positives as f64 / total_checks as f64;
        assert!(rate >= fpp * 0.5, "false positive rate too low: {}", rate);
        assert!(rate <= fpp * 1.5, "false positive rate too high: {}", rate);
    }

    proptest! {
        #[test]
        fn proptest_no_false_negatives(items in prop::collection::vec(".{0,16}", 1..200)) {
            let mut filter = BloomFilter::<String>::new(items.len(), 0.05).unwrap();
            filter.initialize_with_dataset(&items);

            for item in &items {
                prop_assert!(filter.contains(item.as_str()));
            }
        }
    }
}
