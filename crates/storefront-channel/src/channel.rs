//! The partitioned event channel.

use thiserror::Error;
use tokio::sync::mpsc;

use storefront_core::event::Event;

/// Failure to hand an event to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The channel's consumers have shut down; nothing can accept the event.
    #[error("channel {channel} is closed")]
    Closed {
        /// The channel name.
        channel: &'static str,
    },
}

/// One partition of a channel, to be owned by exactly one consumer so that
/// in-order delivery per key is preserved.
#[derive(Debug)]
pub struct Partition<T> {
    /// The channel this partition belongs to.
    pub channel: &'static str,
    /// Partition index within the channel.
    pub index: usize,
    /// The receiving end; single reader.
    pub receiver: mpsc::Receiver<Event<i32, T>>,
}

/// The producer side of a named, partitioned event channel.
///
/// Events are routed to a partition by business key, so all events for one
/// key land on the same partition in publication order. Clones share the
/// same underlying partitions.
#[derive(Debug, Clone)]
pub struct EventChannel<T> {
    name: &'static str,
    senders: Vec<mpsc::Sender<Event<i32, T>>>,
}

impl<T: Send + 'static> EventChannel<T> {
    /// Creates a channel with `partitions` partitions, each buffering up to
    /// `buffer` undelivered events, and returns the producer handle together
    /// with the partitions to hand to consumers.
    ///
    /// # Panics
    ///
    /// Panics if `partitions` or `buffer` is zero; both are configuration
    /// constants fixed at startup.
    #[must_use]
    pub fn new(name: &'static str, partitions: usize, buffer: usize) -> (Self, Vec<Partition<T>>) {
        assert!(partitions > 0, "channel must have at least one partition");
        let mut senders = Vec::with_capacity(partitions);
        let mut receivers = Vec::with_capacity(partitions);
        for index in 0..partitions {
            let (sender, receiver) = mpsc::channel(buffer);
            senders.push(sender);
            receivers.push(Partition {
                channel: name,
                index,
                receiver,
            });
        }
        (Self { name, senders }, receivers)
    }

    /// The channel name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Hands an event to the channel, blocking the calling thread while the
    /// target partition's buffer is full.
    ///
    /// This is a blocking call into the channel client and must run on the
    /// publish worker pool, never on a runtime thread.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Closed` if the partition's consumer has shut
    /// down; the event was not accepted.
    pub fn publish_blocking(&self, event: Event<i32, T>) -> Result<(), PublishError> {
        let partition = self.partition_for(event.key);
        tracing::debug!(
            channel = self.name,
            partition,
            key = event.key,
            event_type = ?event.event_type,
            "publishing event"
        );
        self.senders[partition]
            .blocking_send(event)
            .map_err(|_| PublishError::Closed { channel: self.name })
    }

    /// The partition index the given key routes to.
    #[must_use]
    pub fn partition_for(&self, key: i32) -> usize {
        let partitions = i32::try_from(self.senders.len()).unwrap_or(i32::MAX);
        usize::try_from(key.rem_euclid(partitions)).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use storefront_core::event::Event;

    use super::*;

    fn created_at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_same_key_routes_to_same_partition() {
        let (channel, _partitions) = EventChannel::<String>::new("products", 3, 8);

        assert_eq!(channel.partition_for(7), channel.partition_for(7));
        assert_eq!(channel.partition_for(-5), channel.partition_for(-5));
    }

    #[tokio::test]
    async fn test_events_for_one_key_arrive_in_publication_order() {
        // Arrange
        let (channel, mut partitions) = EventChannel::<String>::new("products", 2, 8);
        let key = 4;
        let partition = channel.partition_for(key);

        // Act: publish off-runtime, as the publish pool would.
        let publisher = channel.clone();
        tokio::task::spawn_blocking(move || {
            for n in 0..3 {
                publisher
                    .publish_blocking(Event::create(key, format!("e{n}"), created_at()))
                    .unwrap();
            }
        })
        .await
        .unwrap();

        // Assert
        let receiver = &mut partitions[partition].receiver;
        for n in 0..3 {
            let event = receiver.recv().await.unwrap();
            assert_eq!(event.data.as_deref(), Some(format!("e{n}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_publish_to_closed_partition_fails() {
        // Arrange: drop all partitions, simulating consumers gone.
        let (channel, partitions) = EventChannel::<String>::new("products", 1, 8);
        drop(partitions);

        // Act
        let result = tokio::task::spawn_blocking(move || {
            channel.publish_blocking(Event::create(1, "e".to_owned(), created_at()))
        })
        .await
        .unwrap();

        // Assert
        assert_eq!(result, Err(PublishError::Closed { channel: "products" }));
    }
}
