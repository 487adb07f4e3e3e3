//! Exact membership structures used as baselines for the probabilistic filters.
//!
//! None of these ever report a false positive, and their insertions never fail. They trade
//! memory (every key is stored in full) and, for the scan-based variants, lookup time for that
//! exactness.

use crate::error::Result;
use crate::membership::Membership;
use crate::SipHasherBuilder;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// An unordered list of keys searched front to back.
///
/// # Examples
///
/// ```
/// use membership_filters::search::LinearSearch;
/// use membership_filters::Membership;
///
/// let search = LinearSearch::from(vec!["user1".to_string(), "user2".to_string()]);
///
/// assert!(Membership::<str>::contains(&search, "user2"));
/// assert!(!Membership::<str>::contains(&search, "user4"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSearch<T> {
    items: Vec<T>,
}

impl<T> LinearSearch<T> {
    /// Constructs an empty `LinearSearch`.
    pub fn new() -> Self {
        LinearSearch { items: Vec::new() }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for LinearSearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for LinearSearch<T> {
    fn from(items: Vec<T>) -> Self {
        LinearSearch { items }
    }
}

impl<T, U> Membership<U> for LinearSearch<T>
where
    T: Borrow<U>,
    U: ToOwned<Owned = T> + PartialEq + ?Sized,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        self.items.push(item.to_owned());
        Ok(())
    }

    fn contains(&self, item: &U) -> bool {
        self.items.iter().any(|candidate| candidate.borrow() == item)
    }
}

/// A sorted list of keys searched by bisection.
///
/// # Examples
///
/// ```
/// use membership_filters::search::BinarySearch;
/// use membership_filters::Membership;
///
/// let mut search = BinarySearch::from(vec!["user3".to_string(), "user1".to_string()]);
/// search.insert("user2").unwrap();
///
/// assert_eq!(search.as_slice(), &["user1", "user2", "user3"]);
/// assert!(Membership::<str>::contains(&search, "user2"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BinarySearch<T> {
    sorted_items: Vec<T>,
}

impl<T> BinarySearch<T> {
    /// Constructs an empty `BinarySearch`.
    pub fn new() -> Self {
        BinarySearch {
            sorted_items: Vec::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.sorted_items.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.sorted_items.is_empty()
    }

    /// Returns the stored keys in ascending order.
    pub fn as_slice(&self) -> &[T] {
        &self.sorted_items
    }

    fn search<U>(&self, item: &U) -> std::result::Result<usize, usize>
    where
        T: Borrow<U>,
        U: Ord + ?Sized,
    {
        let mut low = 0;
        let mut high = self.sorted_items.len();
        while low < high {
            let mid = low + (high - low) / 2;
            match self.sorted_items[mid].borrow().cmp(item) {
                Ordering::Equal => return Ok(mid),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }
        Err(low)
    }
}

impl<T> Default for BinarySearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for BinarySearch<T>
where
    T: Ord,
{
    fn from(mut items: Vec<T>) -> Self {
        items.sort_unstable();
        BinarySearch {
            sorted_items: items,
        }
    }
}

impl<T, U> Membership<U> for BinarySearch<T>
where
    T: Borrow<U>,
    U: ToOwned<Owned = T> + Ord + ?Sized,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        let index = match self.search(item) {
            Ok(index) | Err(index) => index,
        };
        self.sorted_items.insert(index, item.to_owned());
        Ok(())
    }

    fn contains(&self, item: &U) -> bool {
        self.search(item).is_ok()
    }
}

/// A hash set of keys.
///
/// # Examples
///
/// ```
/// use membership_filters::search::HashSearch;
/// use membership_filters::Membership;
///
/// let mut search = HashSearch::<String>::new();
/// search.insert("user1").unwrap();
/// search.insert("user1").unwrap();
///
/// assert_eq!(search.len(), 1);
/// assert!(Membership::<str>::contains(&search, "user1"));
/// ```
#[derive(Clone, Debug)]
pub struct HashSearch<T, B = SipHasherBuilder> {
    items: HashSet<T, B>,
}

impl<T> HashSearch<T>
where
    T: Hash + Eq,
{
    /// Constructs an empty `HashSearch` with a randomly seeded hasher.
    pub fn new() -> Self {
        Self::with_hasher(SipHasherBuilder::from_entropy())
    }
}

impl<T> Default for HashSearch<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> HashSearch<T, B>
where
    T: Hash + Eq,
    B: BuildHasher,
{
    /// Constructs an empty `HashSearch` that hashes keys with `hash_builder`.
    pub fn with_hasher(hash_builder: B) -> Self {
        HashSearch {
            items: HashSet::with_hasher(hash_builder),
        }
    }

    /// Returns the number of distinct stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T, U, B> Membership<U> for HashSearch<T, B>
where
    T: Borrow<U> + Hash + Eq,
    U: ToOwned<Owned = T> + Hash + Eq + ?Sized,
    B: BuildHasher,
{
    fn insert(&mut self, item: &U) -> Result<()> {
        self.items.insert(item.to_owned());
        Ok(())
    }

    fn contains(&self, item: &U) -> bool {
        self.items.contains(item)
    }
}

#[cfg(test)]
mod tests {
    use super::{BinarySearch, HashSearch, LinearSearch};
    use crate::membership::Membership;
    use crate::util::tests::hash_builder_1;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn usernames() -> Vec<String> {
        vec!["user1".to_string(), "user2".to_string(), "user3".to_string()]
    }

    #[test]
    fn test_linear_search() {
        let mut search = LinearSearch::from(usernames());
        assert!(Membership::<str>::contains(&search, "user2"));
        assert!(!Membership::<str>::contains(&search, "user4"));

        search.insert("user4").unwrap();
        assert!(Membership::<str>::contains(&search, "user4"));
        assert_eq!(search.len(), 4);
    }

    #[test]
    fn test_linear_search_owned_keys() {
        let mut search = LinearSearch::<String>::new();
        assert!(search.is_empty());
        search.insert(&"user1".to_string()).unwrap();
        assert!(search.contains(&"user1".to_string()));
    }

    #[test]
    fn test_binary_search() {
        let mut search = BinarySearch::from(vec![
            "user3".to_string(),
            "user1".to_string(),
            "user2".to_string(),
        ]);
        assert_eq!(search.as_slice(), &["user1", "user2", "user3"]);
        assert!(Membership::<str>::contains(&search, "user2"));
        assert!(!Membership::<str>::contains(&search, "user4"));
        assert!(!Membership::<str>::contains(&search, "user0"));

        search.insert("user0").unwrap();
        search.insert("user2").unwrap();
        assert_eq!(
            search.as_slice(),
            &["user0", "user1", "user2", "user2", "user3"],
        );
    }

    // no `Default` impl
    struct Login;

    #[test]
    fn test_default_without_default_items() {
        let linear = LinearSearch::<Login>::default();
        assert!(linear.is_empty());

        let binary = BinarySearch::<Login>::default();
        assert!(binary.is_empty());
        assert!(binary.as_slice().is_empty());
    }

    #[test]
    fn test_binary_search_empty() {
        let search = BinarySearch::<String>::new();
        assert!(search.is_empty());
        assert!(!Membership::<str>::contains(&search, "user1"));
    }

    #[test]
    fn test_hash_search() {
        let mut search = HashSearch::<String, _>::with_hasher(hash_builder_1());
        for username in usernames() {
            search.insert(username.as_str()).unwrap();
        }
        assert_eq!(search.len(), 3);
        assert!(Membership::<str>::contains(&search, "user2"));
        assert!(!Membership::<str>::contains(&search, "user4"));
    }

    proptest! {
        #[test]
        fn proptest_binary_search_matches_set(
            items in prop::collection::vec(any::<u32>(), 0..100),
            probes in prop::collection::vec(any::<u32>(), 0..100),
        ) {
            let mut search = BinarySearch::<u32>::new();
            for item in &items {
                search.insert(item).unwrap();
            }
            let expected: BTreeSet<u32> = items.iter().copied().collect();

            prop_assert!(search.as_slice().windows(2).all(|pair| pair[0] <= pair[1]));
            for probe in items.iter().chain(probes.iter()) {
                prop_assert_eq!(search.contains(probe), expected.contains(probe));
            }
        }
    }
}
