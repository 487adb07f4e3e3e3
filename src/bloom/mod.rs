//! Space-efficient probabilistic data structure for approximate membership queries in a set.

mod bloom_filter;
mod sizing;

pub use self::bloom_filter::BloomFilter;
pub use self::sizing::{calculate_size, hash_count};
