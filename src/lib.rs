//! # membership-filters
//!
//! `membership-filters` answers "have we seen this login before?" for very large sets of keys
//! without storing the keys themselves. It provides a bloom filter and a bucketized cuckoo
//! filter, both sized from an expected item count and a target false positive probability,
//! along with exact baseline structures that share the same [`Membership`] interface so they
//! can be measured side by side.
//!
//! Neither filter ever reports a false negative for an item it accepted. Both may report false
//! positives at a rate bounded by the configured probability.
//!
//! ## Usage
//!
//! ```rust
//! use membership_filters::bloom::BloomFilter;
//! use membership_filters::cuckoo::CuckooFilter;
//! use membership_filters::{FilterError, Membership};
//!
//! let usernames = ["user1", "user2", "user3"];
//!
//! let mut bloom = BloomFilter::<String>::new(usernames.len(), 0.1)?;
//! bloom.initialize_with_dataset(usernames.iter().copied());
//! assert!(bloom.contains("user1"));
//!
//! let mut cuckoo = CuckooFilter::<String>::new(usernames.len(), 0.1)?;
//! assert_eq!(cuckoo.load(usernames.iter().copied()), 3);
//! assert!(cuckoo.contains("user3"));
//! # Ok::<(), FilterError>(())
//! ```
//!
//! ## References
//!
//!  - [Cuckoo Filter: Practically Better Than Bloom](https://dl.acm.org/citation.cfm?id=2674994)
//!  > Fan, Bin, Dave G. Andersen, Michael Kaminsky, and Michael D. Mitzenmacher. 2014. “Cuckoo Filter: Practically Better Than Bloom.” In *Proceedings of the 10th Acm International on Conference on Emerging Networking Experiments and Technologies*, 75–88. CoNEXT ’14. New York, NY, USA: ACM. doi:[10.1145/2674005.2674994](https://doi.org/10.1145/2674005.2674994).
//!  - [Less hashing, same performance: Building a better Bloom filter](https://dl.acm.org/citation.cfm?id=1400125)
//!  > Kirsch, Adam, and Michael Mitzenmacher. 2008. “Less Hashing, Same Performance: Building a Better Bloom Filter.” *Random Struct. Algorithms* 33 (2). New York, NY, USA: John Wiley & Sons, Inc.: 187–218. doi:[10.1002/rsa.v33:2](https://doi.org/10.1002/rsa.v33:2).

#![warn(missing_docs)]

pub mod bit_vec;
pub mod bloom;
mod config;
pub mod cuckoo;
mod error;
mod membership;
pub mod search;
pub mod timing;
mod util;

pub use crate::config::{
    BloomFilterConfig, CuckooFilterConfig, DEFAULT_BUCKET_SIZE, DEFAULT_LOAD_FACTOR,
    DEFAULT_MAX_EVICTIONS,
};
pub use crate::error::{FilterError, Result};
pub use crate::membership::Membership;
pub use crate::util::SipHasherBuilder;
