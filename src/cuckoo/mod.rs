//! Space-efficient probabilistic data structure to test for membership in a set, storing short
//! fingerprints of each item in a table of fixed-size buckets.

mod bucket;
mod cuckoo_filter;
mod fingerprint;
mod sizing;

pub use self::bucket::Bucket;
pub use self::cuckoo_filter::CuckooFilter;
pub use self::fingerprint::Fingerprint;
pub use self::sizing::{bucket_count, fingerprint_size};
