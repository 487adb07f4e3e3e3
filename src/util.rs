use rand::Rng;
use siphasher::sip::SipHasher;
use std::borrow::Borrow;
use std::hash::BuildHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::{cmp, fmt};

/// The default hash builder for all filters.
#[derive(Clone, Copy)]
pub struct SipHasherBuilder {
    k0: u64,
    k1: u64,
    hasher: SipHasher,
}

impl SipHasherBuilder {
    /// Constructs a new `SipHasherBuilder` that uses the thread-local RNG to seed itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::SipHasherBuilder;
    ///
    /// let hash_builder = SipHasherBuilder::from_entropy();
    /// ```
    pub fn from_entropy() -> Self {
        let mut rng = rand::thread_rng();
        Self::from_seed(rng.gen(), rng.gen())
    }

    /// Constructs a new `SipHasherBuilder` that is seeded with the given keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::SipHasherBuilder;
    ///
    /// let hash_builder = SipHasherBuilder::from_seed(0, 0);
    /// ```
    pub fn from_seed(k0: u64, k1: u64) -> Self {
        SipHasherBuilder {
            k0,
            k1,
            hasher: SipHasher::new_with_keys(k0, k1),
        }
    }
}

impl fmt::Debug for SipHasherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipHasherBuilder")
            .field("k0", &self.k0)
            .field("k1", &self.k1)
            .finish()
    }
}

impl cmp::PartialEq for SipHasherBuilder {
    fn eq(&self, other: &SipHasherBuilder) -> bool {
        self.k0 == other.k0 && self.k1 == other.k1
    }
}

impl BuildHasher for SipHasherBuilder {
    type Hasher = SipHasher;

    #[inline]
    fn build_hasher(&self) -> SipHasher {
        self.hasher
    }
}

/// Derives any number of probe positions for an item from two base hashes.
#[derive(Debug, PartialEq)]
pub struct DoubleHasher<T, B = SipHasherBuilder> {
    hash_builders: [B; 2],
    _marker: PhantomData<T>,
}

impl<T, B> DoubleHasher<T, B>
where
    B: BuildHasher,
{
    pub fn with_hashers(hash_builders: [B; 2]) -> Self {
        DoubleHasher {
            hash_builders,
            _marker: PhantomData,
        }
    }

    /// Returns an endless iterator of hash values for `item`; the `i`-th value plays the role of
    /// the `i`-th seeded hash function.
    pub fn hash<U>(&self, item: &U) -> HashIter
    where
        T: Borrow<U>,
        U: Hash + ?Sized,
    {
        HashIter {
            a: hash(&self.hash_builders[0], &item),
            b: hash(&self.hash_builders[1], &item),
            c: 0,
        }
    }

    pub fn hashers(&self) -> &[B; 2] {
        &self.hash_builders
    }
}

pub fn hash(hash_builder: &impl BuildHasher, item: &impl Hash) -> u64 {
    let mut hasher = hash_builder.build_hasher();
    item.hash(&mut hasher);
    hasher.finish()
}

#[derive(Clone, Copy)]
pub struct HashIter {
    a: u64,
    b: u64,
    c: u64,
}

impl Iterator for HashIter {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let ret = self.a;
        self.a = self.a.wrapping_add(self.b);
        self.b = self.b.wrapping_add(self.c);
        self.c = self.c.wrapping_add(1);
        Some(ret)
    }
}

#[cfg(test)]
pub mod tests {
    use super::{DoubleHasher, SipHasherBuilder};
    use siphasher::sip::SipHasher;
    use std::collections::HashSet;

    pub fn hash_builder_1() -> SipHasherBuilder {
        SipHasherBuilder {
            k0: 0,
            k1: 0,
            hasher: SipHasher::new_with_keys(0, 0),
        }
    }

    pub fn hash_builder_2() -> SipHasherBuilder {
        SipHasherBuilder {
            k0: 1,
            k1: 1,
            hasher: SipHasher::new_with_keys(1, 1),
        }
    }

    #[test]
    fn test_hash_iter_is_deterministic() {
        let hasher = DoubleHasher::<String>::with_hashers([hash_builder_1(), hash_builder_2()]);
        let first: Vec<u64> = hasher.hash("user1").take(8).collect();
        let second: Vec<u64> = hasher.hash("user1").take(8).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_iter_values_differ_per_index() {
        let hasher = DoubleHasher::<String>::with_hashers([hash_builder_1(), hash_builder_2()]);
        let values: HashSet<u64> = hasher.hash("user1").take(8).collect();
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn test_builder_eq() {
        assert_eq!(SipHasherBuilder::from_seed(0, 0), hash_builder_1());
        assert_ne!(hash_builder_1(), hash_builder_2());
    }
}
