//! The generic event consumer: applies CREATE/DELETE events to a core
//! service's store.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_channel::EventProcessor;
use storefront_core::error::ServiceError;
use storefront_core::event::{Event, EventType};

use crate::entities::CoreEntity;
use crate::facade::CoreService;

/// Processes events for one entity type.
///
/// Delivery is at-least-once; idempotency comes from the store's semantics:
/// a DELETE of nothing is benign, while a duplicate key on CREATE is a
/// genuine conflict and is surfaced as a processing failure so the channel's
/// redelivery/dead-letter policy engages.
#[derive(Debug)]
pub struct CoreEventProcessor<E> {
    service: Arc<CoreService<E>>,
}

impl<E: CoreEntity> CoreEventProcessor<E> {
    /// Creates a processor applying events through the given service.
    #[must_use]
    pub fn new(service: Arc<CoreService<E>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<E: CoreEntity> EventProcessor<E::Api> for CoreEventProcessor<E> {
    async fn process(&self, event: &Event<i32, E::Api>) -> Result<(), ServiceError> {
        tracing::info!(
            service = E::SERVICE_NAME,
            key = event.key,
            event_type = ?event.event_type,
            created_at = %event.event_created_at,
            "processing message"
        );
        match event.event_type {
            EventType::Create => {
                let data = event.data.as_ref().ok_or_else(|| {
                    ServiceError::EventProcessing(format!(
                        "CREATE event for key {} carries no data",
                        event.key
                    ))
                })?;
                self.service.create(data).map_err(|err| {
                    ServiceError::EventProcessing(format!(
                        "{} create failed: {err}",
                        E::SERVICE_NAME
                    ))
                })?;
                Ok(())
            }
            EventType::Delete => self.service.delete_by_product_id(event.key).map_err(|err| {
                ServiceError::EventProcessing(format!(
                    "{} delete failed: {err}",
                    E::SERVICE_NAME
                ))
            }),
            EventType::Unknown => Err(ServiceError::EventProcessing(format!(
                "incorrect event type for key {}, expected a CREATE or DELETE event",
                event.key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use storefront_core::api::Product;
    use storefront_store::InMemoryStore;

    use super::*;
    use crate::entities::ProductEntity;

    fn created_at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn processor_and_service() -> (CoreEventProcessor<ProductEntity>, Arc<CoreService<ProductEntity>>) {
        let service = Arc::new(CoreService::new(
            Arc::new(InMemoryStore::new()),
            "product@localhost:7001".to_owned(),
        ));
        (CoreEventProcessor::new(Arc::clone(&service)), service)
    }

    fn product(product_id: i32) -> Product {
        Product {
            product_id,
            name: format!("p{product_id}"),
            weight: 100,
            service_address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_event_stores_entity() {
        // Arrange
        let (processor, service) = processor_and_service();
        let event = Event::create(1, product(1), created_at());

        // Act
        processor.process(&event).await.unwrap();

        // Assert
        assert_eq!(service.find_by_product_id(1).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_event_is_a_processing_failure() {
        // Arrange: the same CREATE delivered twice.
        let (processor, service) = processor_and_service();
        let event = Event::create(1, product(1), created_at());
        processor.process(&event).await.unwrap();

        // Act
        let result = processor.process(&event).await;

        // Assert: not a silent ack, and no second entity.
        match result.unwrap_err() {
            ServiceError::EventProcessing(message) => {
                assert!(message.contains("duplicate key"));
            }
            other => panic!("expected EventProcessing, got {other:?}"),
        }
        assert_eq!(service.find_by_product_id(1).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_event_without_data_is_a_processing_failure() {
        // Arrange
        let (processor, _service) = processor_and_service();
        let mut event = Event::create(1, product(1), created_at());
        event.data = None;

        // Act
        let result = processor.process(&event).await;

        // Assert
        assert!(matches!(result, Err(ServiceError::EventProcessing(_))));
    }

    #[tokio::test]
    async fn test_delete_event_removes_all_matching_entities() {
        // Arrange
        let (processor, service) = processor_and_service();
        processor
            .process(&Event::create(1, product(1), created_at()))
            .await
            .unwrap();

        // Act
        let event: Event<i32, Product> = Event::delete(1, created_at());
        processor.process(&event).await.unwrap();

        // Assert
        assert!(service.find_by_product_id(1).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_nothing_acks_normally() {
        // Arrange: redelivery of a DELETE that already took effect.
        let (processor, _service) = processor_and_service();
        let event: Event<i32, Product> = Event::delete(77, created_at());

        // Act / Assert
        processor.process(&event).await.unwrap();
        processor.process(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_unrecognized_event_type_is_a_processing_failure() {
        // Arrange
        let (processor, _service) = processor_and_service();
        let event = Event {
            event_type: EventType::Unknown,
            key: 1,
            data: Some(product(1)),
            event_created_at: created_at(),
        };

        // Act
        let result = processor.process(&event).await;

        // Assert
        match result.unwrap_err() {
            ServiceError::EventProcessing(message) => {
                assert!(message.contains("expected a CREATE or DELETE"));
            }
            other => panic!("expected EventProcessing, got {other:?}"),
        }
    }
}
