//! Storefront Channel: the asynchronous delivery substrate between the
//! composite aggregator and the backend event consumers.
//!
//! A channel is append-only per key: events are partitioned by business key,
//! each partition has a single reader, and delivery is at-least-once. Cross-
//! key ordering is not guaranteed and not needed.

mod channel;
mod consumer;
mod publish_pool;

pub use channel::{EventChannel, Partition, PublishError};
pub use consumer::{ConsumerConfig, DeadLetterQueue, EventProcessor, spawn_consumer};
pub use publish_pool::{PoolError, PublishPool};
