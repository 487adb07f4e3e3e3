//! Wall-clock timing around membership operations.
//!
//! Filters never measure themselves. Callers that want latency numbers wrap a structure in
//! [`Timed`] or wrap a single call with [`time`].

use crate::error::Result;
use crate::membership::Membership;
use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the elapsed wall-clock time.
///
/// # Examples
///
/// ```
/// use membership_filters::timing::time;
///
/// let (sum, elapsed) = time(|| (0..100u32).sum::<u32>());
/// assert_eq!(sum, 4950);
/// assert!(elapsed.as_secs() < 1);
/// ```
pub fn time<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// A membership structure whose operations report how long they took.
///
/// # Examples
///
/// ```
/// use membership_filters::search::HashSearch;
/// use membership_filters::timing::Timed;
///
/// let mut timed = Timed::new(HashSearch::<String>::new());
/// let (result, _) = timed.insert("user1");
/// assert!(result.is_ok());
///
/// let (found, _) = timed.contains("user1");
/// assert!(found);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Timed<M> {
    inner: M,
}

impl<M> Timed<M> {
    /// Wraps `inner`.
    pub fn new(inner: M) -> Self {
        Timed { inner }
    }

    /// Returns a reference to the wrapped structure.
    pub fn get_ref(&self) -> &M {
        &self.inner
    }

    /// Unwraps the structure.
    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Inserts `item` and reports the time taken.
    pub fn insert<U>(&mut self, item: &U) -> (Result<()>, Duration)
    where
        M: Membership<U>,
        U: ?Sized,
    {
        let inner = &mut self.inner;
        time(|| inner.insert(item))
    }

    /// Looks up `item` and reports the time taken.
    pub fn contains<U>(&self, item: &U) -> (bool, Duration)
    where
        M: Membership<U>,
        U: ?Sized,
    {
        time(|| self.inner.contains(item))
    }

    /// Returns the mean lookup time over `probes`, or `None` if there are no probes.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_filters::search::LinearSearch;
    /// use membership_filters::timing::Timed;
    ///
    /// let timed = Timed::new(LinearSearch::from(vec!["user1".to_string()]));
    ///
    /// assert!(timed.mean_contains_time(["user1", "user2"].iter().copied()).is_some());
    /// assert!(timed.mean_contains_time(std::iter::empty::<&str>()).is_none());
    /// ```
    pub fn mean_contains_time<'a, I, U>(&self, probes: I) -> Option<Duration>
    where
        I: IntoIterator<Item = &'a U>,
        M: Membership<U>,
        U: ?Sized + 'a,
    {
        let mut total = Duration::default();
        let mut count = 0u32;
        for probe in probes {
            total += self.contains(probe).1;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(total / count)
        }
    }
}
