use crate::config::CuckooFilterConfig;
use crate::cuckoo::bucket::Bucket;
use crate::cuckoo::fingerprint::Fingerprint;
use crate::cuckoo::sizing;
use crate::error::{FilterError, Result};
use crate::util;
use crate::SipHasherBuilder;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use tracing::{debug, trace, warn};

/// A space-efficient probabilistic data structure to test for membership in a set. Cuckoo filters
/// also provide the flexibility to remove items.
///
/// A cuckoo filter is based on cuckoo hashing and is essentially a cuckoo hash table storing
/// each keys' fingerprint. Every fingerprint lives in one of two candidate buckets, and the
/// candidates can be derived from each other using only the fingerprint. When both candidates
/// are full, an insertion evicts a random resident fingerprint and moves it to its other
/// candidate, repeating up to `max_evictions` times.
///
/// # Examples
///
/// ```
/// use membership_filters::cuckoo::CuckooFilter;
///
/// let mut filter = CuckooFilter::<String>::new(3, 0.1).unwrap();
///
/// assert!(!filter.contains("user1"));
/// let usernames = ["user1", "user2", "user3"];
/// assert_eq!(filter.initialize_with_dataset(usernames.iter().copied()), 3);
/// assert!(usernames.iter().all(|username| filter.contains(*username)));
///
/// assert!(filter.remove("user1"));
/// assert_eq!(filter.len(), 2);
/// assert_eq!(filter.capacity(), 2);
/// assert_eq!(filter.bucket_size(), 2);
/// assert_eq!(filter.fingerprint_size(), 1);
/// ```
#[derive(Debug)]
pub struct CuckooFilter<T, B = SipHasherBuilder> {
    buckets: Vec<Bucket>,
    bucket_size: usize,
    fingerprint_size: usize,
    max_evictions: usize,
    stored: usize,
    hash_builders: [B; 2],
    rng: XorShiftRng,
    _marker: PhantomData<T>,
}

impl<T> CuckooFilter<T> {
    /// Constructs a new, empty `CuckooFilter` with an estimated max capacity of `item_count` and
    /// an estimated maximum false positive probability of `fpp`. By default, each bucket holds 2
    /// fingerprints, the filter is sized for a load factor of 0.9, and an insertion gives up after
    /// 500 evictions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `item_count` is 0 or `fpp` is not in `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    ///
    /// let filter = CuckooFilter::<String>::new(100, 0.01).unwrap();
    /// assert!(CuckooFilter::<String>::new(100, 1.0).is_err());
    /// ```
    pub fn new(item_count: usize, fpp: f64) -> Result<Self> {
        Self::from_config(
            &CuckooFilterConfig::new()
                .with_expected_items(item_count)
                .with_false_positive_probability(fpp),
        )
    }

    /// Constructs a new, empty `CuckooFilter` from `config`, seeding its hashers from entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    /// use membership_filters::CuckooFilterConfig;
    ///
    /// let config = CuckooFilterConfig::new()
    ///     .with_expected_items(100)
    ///     .with_bucket_size(4)
    ///     .with_rng_seed(0);
    /// let filter = CuckooFilter::<String>::from_config(&config).unwrap();
    /// assert_eq!(filter.bucket_size(), 4);
    /// ```
    pub fn from_config(config: &CuckooFilterConfig) -> Result<Self> {
        Self::with_hashers(
            config,
            [
                SipHasherBuilder::from_entropy(),
                SipHasherBuilder::from_entropy(),
            ],
        )
    }
}

impl<T, B> CuckooFilter<T, B>
where
    B: BuildHasher,
{
    /// Constructs a new, empty `CuckooFilter` from `config` and two hasher builders. The first
    /// builder derives fingerprints and the second derives bucket indexes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    /// use membership_filters::{CuckooFilterConfig, SipHasherBuilder};
    ///
    /// let filter = CuckooFilter::<String>::with_hashers(
    ///     &CuckooFilterConfig::new().with_expected_items(100),
    ///     [SipHasherBuilder::from_seed(0, 0), SipHasherBuilder::from_seed(1, 1)],
    /// )
    /// .unwrap();
    /// ```
    pub fn with_hashers(config: &CuckooFilterConfig, hash_builders: [B; 2]) -> Result<Self> {
        config.validate()?;
        let fingerprint_size =
            sizing::fingerprint_size(config.bucket_size, config.false_positive_probability);
        let bucket_count = sizing::bucket_count(
            config.expected_items,
            config.load_factor,
            config.bucket_size,
        );
        let rng = match config.rng_seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        debug!(
            expected_items = config.expected_items,
            fpp = config.false_positive_probability,
            bucket_count,
            bucket_size = config.bucket_size,
            fingerprint_size,
            max_evictions = config.max_evictions,
            "constructed cuckoo filter"
        );
        Ok(CuckooFilter {
            buckets: (0..bucket_count)
                .map(|_| Bucket::new(config.bucket_size, fingerprint_size))
                .collect(),
            bucket_size: config.bucket_size,
            fingerprint_size,
            max_evictions: config.max_evictions,
            stored: 0,
            hash_builders,
            rng,
            _marker: PhantomData,
        })
    }

    /// Returns the fingerprint of `item`: the first `fingerprint_size` bytes of its hash. Widths
    /// beyond 8 bytes are filled from further hashes of `item`.
    pub fn fingerprint<U>(&self, item: &U) -> Fingerprint
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        Fingerprint::derive(&self.hash_builders[0], item, self.fingerprint_size)
    }

    /// Returns the first candidate bucket of `item`.
    pub fn primary_index<U>(&self, item: &U) -> usize
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let hash = util::hash(&self.hash_builders[1], &item);
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns the other candidate bucket of a fingerprint stored at `index`. Applying this twice
    /// returns `index`.
    ///
    /// `alternate = (index ^ (hash(fingerprint) | 1)) % capacity`
    ///
    /// This differs from the plain `index ^ hash(fingerprint)` of the cuckoo filter paper: the
    /// offset is forced odd, so with more than one bucket the two candidates are always distinct.
    /// The bucket count is a power of two, which keeps the mapping its own inverse.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    ///
    /// let filter = CuckooFilter::<String>::new(1000, 0.01).unwrap();
    /// let fingerprint = filter.fingerprint("foo");
    /// let index_1 = filter.primary_index("foo");
    /// let index_2 = filter.alternate_index(index_1, &fingerprint);
    ///
    /// assert_ne!(index_1, index_2);
    /// assert_eq!(filter.alternate_index(index_2, &fingerprint), index_1);
    /// ```
    pub fn alternate_index(&self, index: usize, fingerprint: &[u8]) -> usize {
        let offset = util::hash(&self.hash_builders[1], &fingerprint) | 1;
        ((index as u64 ^ offset) % self.buckets.len() as u64) as usize
    }

    fn get_fingerprint_and_indexes<U>(&self, item: &U) -> (Fingerprint, usize, usize)
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let fingerprint = self.fingerprint(item);
        let index_1 = self.primary_index(item);
        let index_2 = self.alternate_index(index_1, &fingerprint);
        (fingerprint, index_1, index_2)
    }

    fn place(&mut self, index: usize, fingerprint: &[u8]) -> usize {
        let inserted = self.buckets[index].insert(fingerprint);
        debug_assert!(inserted);
        self.stored += 1;
        index
    }

    /// Inserts an element into the cuckoo filter and returns the index of the bucket that
    /// received a new fingerprint. That is either one of the item's candidates, or the bucket
    /// that took in the last fingerprint displaced by eviction.
    ///
    /// # Errors
    ///
    /// Returns `FilterFull` if no slot was found within `max_evictions` relocations. Every
    /// relocation is undone in that case, so the filter holds exactly what it held before.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::<String>::new(100, 0.01).unwrap();
    ///
    /// let index = filter.insert("foo").unwrap();
    /// assert!(index < filter.capacity());
    /// assert!(filter.contains("foo"));
    /// ```
    pub fn insert<U>(&mut self, item: &U) -> Result<usize>
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let (fingerprint, index_1, index_2) = self.get_fingerprint_and_indexes(item);
        if !self.buckets[index_1].is_full() {
            return Ok(self.place(index_1, &fingerprint));
        }
        if !self.buckets[index_2].is_full() {
            return Ok(self.place(index_2, &fingerprint));
        }
        self.relocate(fingerprint, index_1, index_2)
    }

    fn relocate(
        &mut self,
        mut fingerprint: Fingerprint,
        index_1: usize,
        index_2: usize,
    ) -> Result<usize> {
        let mut index = if self.rng.gen::<bool>() {
            index_1
        } else {
            index_2
        };
        let mut path = Vec::new();

        for _ in 0..self.max_evictions {
            let slot = self.buckets[index].swap_random(&mut fingerprint, &mut self.rng);
            path.push((index, slot));
            let from = index;
            index = self.alternate_index(index, &fingerprint);
            trace!(from, to = index, "evicted fingerprint");
            if !self.buckets[index].is_full() {
                return Ok(self.place(index, &fingerprint));
            }
        }

        // put every displaced fingerprint back where it was
        for (index, slot) in path.into_iter().rev() {
            self.buckets[index].replace(slot, &mut fingerprint);
        }
        warn!(
            stored = self.stored,
            max_evictions = self.max_evictions,
            "cuckoo filter is full, insertion rolled back"
        );
        Err(FilterError::FilterFull {
            max_evictions: self.max_evictions,
        })
    }

    /// Inserts every element of `items` in order, stopping at the first insertion that fails
    /// with `FilterFull`. Returns the number of elements inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    /// use membership_filters::CuckooFilterConfig;
    ///
    /// let config = CuckooFilterConfig::new()
    ///     .with_expected_items(10)
    ///     .with_max_evictions(5);
    /// let mut filter = CuckooFilter::<String>::from_config(&config).unwrap();
    ///
    /// let usernames: Vec<String> = (0..30).map(|i| format!("user{}", i)).collect();
    /// assert!(filter.initialize_with_dataset(&usernames) < usernames.len());
    /// ```
    pub fn initialize_with_dataset<'a, I, U>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a U>,
        T: Borrow<U>,
        U: Hash + ?Sized + 'a,
    {
        let mut count = 0;
        for item in items {
            if let Err(err) = self.insert(item) {
                debug!(inserted = count, error = %err, "stopped loading dataset");
                break;
            }
            count += 1;
        }
        count
    }

    /// Removes one copy of an element's fingerprint from the cuckoo filter. Returns `false` if
    /// no matching fingerprint was found.
    ///
    /// Removing an element that was never inserted may remove the fingerprint of a different
    /// element that collides with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::<String>::new(100, 0.01).unwrap();
    ///
    /// filter.insert("foo").unwrap();
    /// assert!(filter.remove("foo"));
    /// assert!(!filter.contains("foo"));
    /// assert!(!filter.remove("foo"));
    /// ```
    pub fn remove<U>(&mut self, item: &U) -> bool
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let (fingerprint, index_1, index_2) = self.get_fingerprint_and_indexes(item);
        let removed = self.buckets[index_1].delete(&fingerprint)
            || self.buckets[index_2].delete(&fingerprint);
        if removed {
            self.stored -= 1;
        }
        removed
    }

    /// Checks if an element is possibly in the cuckoo filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::<String>::new(100, 0.01).unwrap();
    ///
    /// assert!(!filter.contains("foo"));
    /// filter.insert("foo").unwrap();
    /// assert!(filter.contains("foo"));
    /// ```
    pub fn contains<U>(&self, item: &U) -> bool
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        let (fingerprint, index_1, index_2) = self.get_fingerprint_and_indexes(item);
        self.buckets[index_1].contains(&fingerprint)
            || self.buckets[index_2].contains(&fingerprint)
    }

    /// Returns the number of items in the cuckoo filter.
    pub fn len(&self) -> usize {
        self.stored
    }

    /// Returns `true` if the cuckoo filter is empty.
    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }

    /// Returns the number of buckets in the cuckoo filter.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of fingerprints each bucket holds.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Returns the width of each fingerprint in bytes.
    pub fn fingerprint_size(&self) -> usize {
        self.fingerprint_size
    }

    /// Returns the maximum number of evictions an insertion performs before giving up.
    pub fn max_evictions(&self) -> usize {
        self.max_evictions
    }

    /// Returns the fraction of fingerprint slots currently in use.
    pub fn load_factor(&self) -> f64 {
        self.stored as f64 / (self.buckets.len() * self.bucket_size) as f64
    }

    /// Returns a reference to the cuckoo filter's hasher builders.
    pub fn hashers(&self) -> &[B; 2] {
        &self.hash_builders
    }
}
