//! A common interface over every membership structure in the crate.
//!
//! Code that only needs to load keys and ask whether a key is present can be written once
//! against [`Membership`] and run against the probabilistic filters and the exact baselines
//! alike.

use crate::bloom::BloomFilter;
use crate::cuckoo::CuckooFilter;
use crate::error::Result;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// A set-like structure that answers membership queries for items of type `U`.
pub trait Membership<U: ?Sized> {
    /// Adds `item` to the structure.
    fn insert(&mut self, item: &U) -> Result<()>;

    /// Returns `true` if `item` is, or may be, in the structure.
    fn contains(&self, item: &U) -> bool;

    /// Inserts every element of `items` in order, stopping at the first failed insertion.
    /// Returns the number of elements inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::cuckoo::CuckooFilter;
    /// use membership_filters::Membership;
    ///
    /// let mut filter = CuckooFilter::<String>::new(100, 0.01).unwrap();
    /// let usernames = ["user1", "user2", "user3"];
    ///
    /// assert_eq!(filter.load(usernames.iter().copied()), 3);
    /// assert!(Membership::<str>::contains(&filter, "user2"));
    /// ```
    fn load<'a, I>(&mut self, items: I) -> usize
    where
        Self: Sized,
        I: IntoIterator<Item = &'a U>,
        U: 'a,
    {
        let mut count = 0;
        for item in items {
            if let Err(err) = self.insert(item) {
                debug!(inserted = count, error = %err, "stopped loading items");
                break;
            }
            count += 1;
        }
        count
    }
}

impl<U, M> Membership<U> for Box<M>
where
    U: ?Sized,
    M: Membership<U> + ?Sized,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        (**self).insert(item)
    }

    fn contains(&self, item: &U) -> bool {
        (**self).contains(item)
    }
}

impl<T, U, B> Membership<U> for BloomFilter<T, B>
where
    T: Borrow<U>,
    U: Hash + ?Sized,
    B: BuildHasher,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        BloomFilter::insert(self, item);
        Ok(())
    }

    fn contains(&self, item: &U) -> bool {
        BloomFilter::contains(self, item)
    }
}

impl<T, U, B> Membership<U> for CuckooFilter<T, B>
where
    T: Borrow<U>,
    U: Hash + ?Sized,
    B: BuildHasher,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        CuckooFilter::insert(self, item).map(|_| ())
    }

    fn contains(&self, item: &U) -> bool {
        CuckooFilter::contains(self, item)
    }
}
