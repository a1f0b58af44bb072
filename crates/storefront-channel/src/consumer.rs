//! The consumer runner: delivers each event of a partition to a processor,
//! redelivering on failure and dead-lettering when redelivery is exhausted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::JoinHandle;

use storefront_core::error::ServiceError;
use storefront_core::event::Event;

use crate::channel::Partition;

/// Processes one delivered event.
#[async_trait]
pub trait EventProcessor<T>: Send + Sync {
    /// Processes the event. Returning an error triggers redelivery; the
    /// processor must therefore be idempotent across redeliveries.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::EventProcessing` when the message cannot be
    /// applied.
    async fn process(&self, event: &Event<i32, T>) -> Result<(), ServiceError>;
}

/// Consumer tuning.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerConfig {
    /// How many times a failed message is redelivered before it is moved to
    /// the dead-letter queue.
    pub max_redeliveries: u32,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            max_redeliveries: 2,
        }
    }
}

/// Holds events whose processing kept failing. Never dropped silently; an
/// operator (or a test) can inspect and drain it.
#[derive(Debug)]
pub struct DeadLetterQueue<T> {
    entries: Arc<Mutex<Vec<Event<i32, T>>>>,
}

impl<T> Clone for DeadLetterQueue<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for DeadLetterQueue<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> DeadLetterQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event<i32, T>) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }

    /// Removes and returns all dead-lettered events.
    pub fn drain(&self) -> Vec<Event<i32, T>> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }

    /// Number of dead-lettered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no events have been dead-lettered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spawns the single reader for one partition.
///
/// Each received event is handed to the processor; on failure it is
/// redelivered up to `config.max_redeliveries` additional times and then
/// moved to the dead-letter queue. The task ends when the producer side of
/// the partition is dropped.
pub fn spawn_consumer<T>(
    mut partition: Partition<T>,
    processor: Arc<dyn EventProcessor<T>>,
    config: ConsumerConfig,
    dead_letters: DeadLetterQueue<T>,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let channel = partition.channel;
        let index = partition.index;
        while let Some(event) = partition.receiver.recv().await {
            let mut deliveries: u32 = 0;
            loop {
                deliveries += 1;
                match processor.process(&event).await {
                    Ok(()) => {
                        tracing::debug!(
                            channel,
                            partition = index,
                            key = event.key,
                            "event processed"
                        );
                        break;
                    }
                    Err(error) if deliveries <= config.max_redeliveries => {
                        tracing::warn!(
                            channel,
                            partition = index,
                            key = event.key,
                            delivery = deliveries,
                            %error,
                            "event processing failed, redelivering"
                        );
                    }
                    Err(error) => {
                        tracing::error!(
                            channel,
                            partition = index,
                            key = event.key,
                            deliveries,
                            %error,
                            "event processing failed after final delivery, dead-lettering"
                        );
                        dead_letters.push(event);
                        break;
                    }
                }
            }
        }
        tracing::debug!(channel, partition = index, "partition closed, consumer stopping");
    })
}
