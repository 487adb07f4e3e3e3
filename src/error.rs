//! Error types shared by every filter in the crate.

/// Errors returned when constructing or inserting into a filter.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// A construction parameter was out of range. Nothing was allocated.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A cuckoo filter insertion could not place its fingerprint within the eviction budget. The
    /// filter is left exactly as it was before the call.
    #[error("filter is full: no free slot found after {max_evictions} evictions")]
    FilterFull {
        /// Number of relocations attempted before giving up.
        max_evictions: usize,
    },
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
