//! Store error types.

use thiserror::Error;

/// Errors produced by an entity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A create collided with an existing business key.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// The colliding business key.
        key: String,
    },

    /// An update carried a stale version.
    #[error("concurrency conflict on {key}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The business key of the entity.
        key: String,
        /// The version the caller held.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },

    /// An update addressed a business key that does not exist.
    #[error("entity not found: {key}")]
    NotFound {
        /// The missing business key.
        key: String,
    },
}
