use rand::Rng;
use std::slice::ChunksExact;

/// A fixed-capacity, unordered collection of fixed-width fingerprints. Duplicate fingerprints
/// are allowed.
///
/// Fingerprints are packed back to back in a single byte buffer.
///
/// # Examples
///
/// ```
/// use membership_filters::cuckoo::Bucket;
///
/// let mut bucket = Bucket::new(2, 3);
///
/// assert!(bucket.insert(b"fp1"));
/// assert!(bucket.insert(b"fp2"));
/// assert!(!bucket.insert(b"fp3"));
/// assert!(bucket.is_full());
///
/// assert!(bucket.delete(b"fp1"));
/// assert!(!bucket.contains(b"fp1"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    capacity: usize,
    fingerprint_size: usize,
    bytes: Vec<u8>,
}

impl Bucket {
    /// Constructs an empty bucket holding at most `capacity` fingerprints of `fingerprint_size`
    /// bytes each.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `fingerprint_size` is 0.
    pub fn new(capacity: usize, fingerprint_size: usize) -> Self {
        assert!(capacity > 0);
        assert!(fingerprint_size > 0);
        Bucket {
            capacity,
            fingerprint_size,
            bytes: Vec::with_capacity(capacity * fingerprint_size),
        }
    }

    fn slot_range(&self, slot: usize) -> std::ops::Range<usize> {
        slot * self.fingerprint_size..(slot + 1) * self.fingerprint_size
    }

    fn position(&self, fingerprint: &[u8]) -> Option<usize> {
        self.entries().position(|entry| entry == fingerprint)
    }

    /// Appends `fingerprint` if there is room. Returns `false`, leaving the bucket unchanged, if
    /// the bucket is full.
    ///
    /// # Panics
    ///
    /// Panics if `fingerprint` is not `fingerprint_size` bytes long.
    pub fn insert(&mut self, fingerprint: &[u8]) -> bool {
        assert_eq!(fingerprint.len(), self.fingerprint_size);
        if self.is_full() {
            return false;
        }
        self.bytes.extend_from_slice(fingerprint);
        true
    }

    /// Returns `true` if `fingerprint` is stored in the bucket.
    pub fn contains(&self, fingerprint: &[u8]) -> bool {
        self.position(fingerprint).is_some()
    }

    /// Removes one copy of `fingerprint`. Returns `false` if it was not present.
    pub fn delete(&mut self, fingerprint: &[u8]) -> bool {
        match self.position(fingerprint) {
            Some(slot) => {
                let last = self.slot_range(self.len() - 1);
                let dest = self.slot_range(slot).start;
                let new_len = last.start;
                self.bytes.copy_within(last, dest);
                self.bytes.truncate(new_len);
                true
            }
            None => false,
        }
    }

    /// Replaces a uniformly chosen entry with `fingerprint` and returns the entry it displaced.
    ///
    /// # Panics
    ///
    /// Panics if the bucket is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::Bucket;
    ///
    /// let mut bucket = Bucket::new(2, 3);
    /// bucket.insert(b"fp1");
    ///
    /// let evicted = bucket.swap(b"fp2", &mut rand::thread_rng());
    /// assert_eq!(evicted, b"fp1");
    /// assert!(bucket.contains(b"fp2"));
    /// ```
    pub fn swap<R>(&mut self, fingerprint: &[u8], rng: &mut R) -> Vec<u8>
    where
        R: Rng,
    {
        let mut fingerprint = fingerprint.to_vec();
        self.swap_random(&mut fingerprint, rng);
        fingerprint
    }

    /// Exchanges `fingerprint` with a uniformly chosen entry in place and returns the slot that
    /// was overwritten. Calling `replace` with the same slot and buffer undoes the exchange.
    pub(super) fn swap_random<R>(&mut self, fingerprint: &mut [u8], rng: &mut R) -> usize
    where
        R: Rng,
    {
        assert!(!self.is_empty(), "cannot swap into an empty bucket");
        let slot = rng.gen_range(0, self.len());
        self.replace(slot, fingerprint);
        slot
    }

    pub(super) fn replace(&mut self, slot: usize, fingerprint: &mut [u8]) {
        assert_eq!(fingerprint.len(), self.fingerprint_size);
        let range = self.slot_range(slot);
        self.bytes[range].swap_with_slice(fingerprint);
    }

    /// Returns `true` if the bucket holds `capacity` fingerprints.
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Returns the number of fingerprints in the bucket.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.fingerprint_size
    }

    /// Returns `true` if the bucket holds no fingerprints.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the maximum number of fingerprints the bucket can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the width of each fingerprint in bytes.
    pub fn fingerprint_size(&self) -> usize {
        self.fingerprint_size
    }

    /// Returns an iterator over the stored fingerprints in no particular order.
    pub fn entries(&self) -> ChunksExact<'_, u8> {
        self.bytes.chunks_exact(self.fingerprint_size)
    }
}
