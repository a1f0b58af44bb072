//! The error taxonomy shared by all services.

use thiserror::Error;

/// Top-level error type for composite and core service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// A malformed or out-of-range business key, or a duplicate key on a
    /// direct create.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The primary entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Optimistic concurrency conflict: the caller held a stale version.
    #[error("concurrency conflict on {key}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// Business key of the conflicting entity.
        key: String,
        /// The version the caller held.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },

    /// A message could not be processed by an event consumer; drives
    /// redelivery and dead-lettering at the channel.
    #[error("event processing failed: {0}")]
    EventProcessing(String),

    /// Handing an event to the event channel failed.
    #[error("event publish failed: {0}")]
    Publish(String),

    /// The publish worker pool rejected new work; the caller should back off.
    #[error("service overloaded: {0}")]
    Overloaded(String),

    /// Any other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}
