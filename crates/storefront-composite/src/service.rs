//! The composite service: aggregate reads and event-driven writes.

use std::sync::Arc;
use std::time::Duration;

use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::composite::{
    ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses,
};
use storefront_core::error::ServiceError;

use crate::integration::CompositeIntegration;

/// The product-composite service.
pub struct CompositeService {
    integration: Arc<CompositeIntegration>,
    service_address: String,
    read_timeout: Duration,
}

impl CompositeService {
    /// Creates the composite service. `read_timeout` is the overall
    /// deadline for one aggregate read, covering all three fan-out calls.
    #[must_use]
    pub fn new(
        integration: Arc<CompositeIntegration>,
        service_address: String,
        read_timeout: Duration,
    ) -> Self {
        Self {
            integration,
            service_address,
            read_timeout,
        }
    }

    /// Looks up a product aggregate.
    ///
    /// The three core-service calls are issued concurrently and joined
    /// under one deadline. The product call is load-bearing; the other two
    /// are best-effort and resolve to empty lists on failure. No partial
    /// aggregate is emitted.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1` before any
    /// downstream call, `ServiceError::NotFound` if the product is absent,
    /// and `ServiceError::Internal` if the deadline elapses.
    pub async fn get_composite(&self, product_id: i32) -> Result<ProductAggregate, ServiceError> {
        if product_id < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "invalid productId: {product_id}"
            )));
        }
        tracing::debug!(product_id, "looking up product aggregate");

        let lookup = async {
            let (product, recommendations, reviews) = tokio::join!(
                self.integration.get_product(product_id),
                self.integration.get_recommendations(product_id),
                self.integration.get_reviews(product_id),
            );
            Ok::<_, ServiceError>(self.assemble(product?, recommendations, reviews))
        };

        match tokio::time::timeout(self.read_timeout, lookup).await {
            Ok(result) => result,
            // Outstanding calls are dropped with the future; their eventual
            // results are discarded.
            Err(_) => Err(ServiceError::Internal(format!(
                "aggregate read for productId {product_id} timed out after {:?}",
                self.read_timeout
            ))),
        }
    }

    /// Accepts an aggregate for creation: decomposes it into one CREATE
    /// event per entity and returns once all events are handed to the
    /// channels. Acceptance does not mean the backends have processed the
    /// events yet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if the business key is out of
    /// range, and a publish error if any handoff fails. Events already
    /// handed off are not recalled.
    pub async fn create_composite(&self, body: &ProductAggregate) -> Result<(), ServiceError> {
        if body.product_id < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "invalid productId: {}",
                body.product_id
            )));
        }
        tracing::debug!(
            product_id = body.product_id,
            "accepting new composite entity"
        );

        let product = Product {
            product_id: body.product_id,
            name: body.name.clone(),
            weight: body.weight,
            service_address: String::new(),
        };
        self.integration.create_product(product).await?;

        for summary in body.recommendations.iter().flatten() {
            let recommendation = Recommendation {
                product_id: body.product_id,
                recommendation_id: summary.recommendation_id,
                author: summary.author.clone(),
                rate: summary.rate,
                content: summary.content.clone(),
                service_address: String::new(),
            };
            self.integration.create_recommendation(recommendation).await?;
        }

        for summary in body.reviews.iter().flatten() {
            let review = Review {
                product_id: body.product_id,
                review_id: summary.review_id,
                author: summary.author.clone(),
                subject: summary.subject.clone(),
                content: summary.content.clone(),
                service_address: String::new(),
            };
            self.integration.create_review(review).await?;
        }

        tracing::debug!(
            product_id = body.product_id,
            "composite create events handed off"
        );
        Ok(())
    }

    /// Accepts an aggregate for deletion: publishes a DELETE event on all
    /// three channels. Idempotent from the caller's perspective; deleting a
    /// missing aggregate is also accepted.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1`, and a
    /// publish error if any handoff fails.
    pub async fn delete_composite(&self, product_id: i32) -> Result<(), ServiceError> {
        if product_id < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "invalid productId: {product_id}"
            )));
        }
        tracing::debug!(product_id, "accepting composite delete");

        self.integration.delete_product(product_id).await?;
        self.integration.delete_reviews(product_id).await?;
        self.integration.delete_recommendations(product_id).await?;

        tracing::debug!(product_id, "composite delete events handed off");
        Ok(())
    }

    fn assemble(
        &self,
        product: Product,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
    ) -> ProductAggregate {
        let recommendation_address = recommendations
            .first()
            .map(|r| r.service_address.clone())
            .unwrap_or_default();
        let review_address = reviews
            .first()
            .map(|r| r.service_address.clone())
            .unwrap_or_default();

        let recommendation_summaries = recommendations
            .into_iter()
            .map(|r| RecommendationSummary {
                recommendation_id: r.recommendation_id,
                author: r.author,
                rate: r.rate,
                content: r.content,
            })
            .collect();
        let review_summaries = reviews
            .into_iter()
            .map(|r| ReviewSummary {
                review_id: r.review_id,
                author: r.author,
                subject: r.subject,
                content: r.content,
            })
            .collect();

        ProductAggregate {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendations: Some(recommendation_summaries),
            reviews: Some(review_summaries),
            service_addresses: Some(ServiceAddresses {
                cmp: self.service_address.clone(),
                pro: product.service_address,
                rev: review_address,
                rec: recommendation_address,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use storefront_channel::{EventChannel, Partition, PublishPool};
    use storefront_core::clock::Clock;
    use storefront_core::event::EventType;
    use storefront_core::service::ProductApi;
    use storefront_test_support::{
        FailingRecommendationApi, FailingReviewApi, FixedClock, FixedProductApi,
        FixedRecommendationApi, FixedReviewApi,
    };

    use super::*;

    struct Channels {
        products: Vec<Partition<Product>>,
        recommendations: Vec<Partition<Recommendation>>,
        reviews: Vec<Partition<Review>>,
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ))
    }

    fn product(product_id: i32) -> Product {
        Product {
            product_id,
            name: format!("p{product_id}"),
            weight: 100,
            service_address: "product@localhost:7001".to_owned(),
        }
    }

    fn recommendation(product_id: i32, recommendation_id: i32) -> Recommendation {
        Recommendation {
            product_id,
            recommendation_id,
            author: "a".to_owned(),
            rate: 4,
            content: "c".to_owned(),
            service_address: "recommendation@localhost:7002".to_owned(),
        }
    }

    fn review(product_id: i32, review_id: i32) -> Review {
        Review {
            product_id,
            review_id,
            author: "a".to_owned(),
            subject: "s".to_owned(),
            content: "c".to_owned(),
            service_address: "review@localhost:7003".to_owned(),
        }
    }

    fn build_service(
        products: Arc<dyn ProductApi>,
        recommendations: Arc<dyn storefront_core::service::RecommendationApi>,
        reviews: Arc<dyn storefront_core::service::ReviewApi>,
    ) -> (CompositeService, Channels) {
        let (product_events, product_partitions) = EventChannel::new("products", 1, 16);
        let (recommendation_events, recommendation_partitions) =
            EventChannel::new("recommendations", 1, 16);
        let (review_events, review_partitions) = EventChannel::new("reviews", 1, 16);
        let integration = Arc::new(CompositeIntegration::new(
            products,
            recommendations,
            reviews,
            product_events,
            recommendation_events,
            review_events,
            Arc::new(PublishPool::new(2, 16)),
            fixed_clock(),
        ));
        let service = CompositeService::new(
            integration,
            "composite@localhost:7000".to_owned(),
            Duration::from_secs(2),
        );
        let channels = Channels {
            products: product_partitions,
            recommendations: recommendation_partitions,
            reviews: review_partitions,
        };
        (service, channels)
    }

    fn happy_service() -> (CompositeService, Channels) {
        build_service(
            Arc::new(FixedProductApi(product(1))),
            Arc::new(FixedRecommendationApi(vec![recommendation(1, 1)])),
            Arc::new(FixedReviewApi(vec![review(1, 1)])),
        )
    }

    #[tokio::test]
    async fn test_get_composite_rejects_invalid_product_id() {
        // Arrange
        let (service, _channels) = happy_service();

        // Act
        let result = service.get_composite(0).await;

        // Assert
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_get_composite_assembles_summaries_and_addresses() {
        // Arrange
        let (service, _channels) = happy_service();

        // Act
        let aggregate = service.get_composite(1).await.unwrap();

        // Assert
        assert_eq!(aggregate.product_id, 1);
        assert_eq!(aggregate.recommendations.as_ref().unwrap().len(), 1);
        assert_eq!(aggregate.reviews.as_ref().unwrap().len(), 1);
        let addresses = aggregate.service_addresses.unwrap();
        assert_eq!(addresses.cmp, "composite@localhost:7000");
        assert_eq!(addresses.pro, "product@localhost:7001");
        assert_eq!(addresses.rec, "recommendation@localhost:7002");
        assert_eq!(addresses.rev, "review@localhost:7003");
    }

    #[tokio::test]
    async fn test_primary_not_found_fails_the_aggregate() {
        // Arrange: secondaries would succeed, but the primary is absent.
        let (service, _channels) = build_service(
            Arc::new(storefront_test_support::FailingProductApi(
                ServiceError::NotFound("no product found for productId: 1".to_owned()),
            )),
            Arc::new(FixedRecommendationApi(vec![recommendation(1, 1)])),
            Arc::new(FixedReviewApi(vec![review(1, 1)])),
        );

        // Act
        let result = service.get_composite(1).await;

        // Assert
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_secondary_failures_yield_empty_lists() {
        // Arrange: both secondaries fail; the aggregate must still succeed.
        let (service, _channels) = build_service(
            Arc::new(FixedProductApi(product(1))),
            Arc::new(FailingRecommendationApi(ServiceError::Internal(
                "connection refused".to_owned(),
            ))),
            Arc::new(FailingReviewApi(ServiceError::Internal(
                "request timed out".to_owned(),
            ))),
        );

        // Act
        let aggregate = service.get_composite(1).await.unwrap();

        // Assert
        assert_eq!(aggregate.recommendations.as_ref().unwrap().len(), 0);
        assert_eq!(aggregate.reviews.as_ref().unwrap().len(), 0);
        let addresses = aggregate.service_addresses.unwrap();
        assert_eq!(addresses.rec, "");
        assert_eq!(addresses.rev, "");
    }

    #[tokio::test]
    async fn test_read_deadline_elapsing_fails_the_aggregate() {
        // Arrange: a product lookup slower than the deadline.
        struct SlowProductApi;

        #[async_trait]
        impl ProductApi for SlowProductApi {
            async fn get_product(&self, product_id: i32) -> Result<Product, ServiceError> {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(product(product_id))
            }
        }

        let (fast_service, _channels) = build_service(
            Arc::new(SlowProductApi),
            Arc::new(FixedRecommendationApi(vec![])),
            Arc::new(FixedReviewApi(vec![])),
        );
        let service = CompositeService::new(
            Arc::clone(&fast_service.integration),
            fast_service.service_address.clone(),
            Duration::from_millis(50),
        );

        // Act
        let result = service.get_composite(1).await;

        // Assert
        match result.unwrap_err() {
            ServiceError::Internal(message) => assert!(message.contains("timed out")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_composite_publishes_one_event_per_entity() {
        // Arrange
        let (service, mut channels) = happy_service();
        let body = ProductAggregate {
            product_id: 123,
            name: "p123".to_owned(),
            weight: 100,
            recommendations: Some(vec![
                RecommendationSummary {
                    recommendation_id: 1,
                    author: "a".to_owned(),
                    rate: 4,
                    content: "c".to_owned(),
                },
                RecommendationSummary {
                    recommendation_id: 2,
                    author: "b".to_owned(),
                    rate: 5,
                    content: "d".to_owned(),
                },
            ]),
            reviews: Some(vec![ReviewSummary {
                review_id: 1,
                author: "a".to_owned(),
                subject: "s".to_owned(),
                content: "c".to_owned(),
            }]),
            service_addresses: None,
        };

        // Act
        service.create_composite(&body).await.unwrap();

        // Assert: 1 product, 2 recommendation, 1 review CREATE events.
        let product_event = channels.products[0].receiver.recv().await.unwrap();
        assert_eq!(product_event.event_type, EventType::Create);
        assert_eq!(product_event.key, 123);
        assert_eq!(product_event.data.unwrap().name, "p123");

        let first = channels.recommendations[0].receiver.recv().await.unwrap();
        let second = channels.recommendations[0].receiver.recv().await.unwrap();
        assert_eq!(first.data.unwrap().recommendation_id, 1);
        assert_eq!(second.data.unwrap().recommendation_id, 2);

        let review_event = channels.reviews[0].receiver.recv().await.unwrap();
        assert_eq!(review_event.data.unwrap().review_id, 1);
    }

    #[tokio::test]
    async fn test_create_composite_rejects_invalid_product_id_before_publishing() {
        // Arrange
        let (service, mut channels) = happy_service();
        let body = ProductAggregate {
            product_id: -1,
            name: "p".to_owned(),
            weight: 1,
            recommendations: None,
            reviews: None,
            service_addresses: None,
        };

        // Act
        let result = service.create_composite(&body).await;

        // Assert: nothing was handed to any channel.
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(channels.products[0].receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_composite_publishes_delete_on_all_three_channels() {
        // Arrange
        let (service, mut channels) = happy_service();

        // Act
        service.delete_composite(123).await.unwrap();

        // Assert
        for event in [
            channels.products[0].receiver.recv().await.unwrap().event_type,
            channels.reviews[0].receiver.recv().await.unwrap().event_type,
            channels
                .recommendations[0]
                .receiver
                .recv()
                .await
                .unwrap()
                .event_type,
        ] {
            assert_eq!(event, EventType::Delete);
        }
    }

    #[tokio::test]
    async fn test_publish_failure_fails_the_write_synchronously() {
        // Arrange: the product channel is closed because its consumers are gone.
        let (service, channels) = happy_service();
        drop(channels);
        let body = ProductAggregate {
            product_id: 5,
            name: "p5".to_owned(),
            weight: 1,
            recommendations: None,
            reviews: None,
            service_addresses: None,
        };

        // Act
        let result = service.create_composite(&body).await;

        // Assert
        assert!(matches!(result, Err(ServiceError::Publish(_))));
    }
}
