//! The integration layer between the aggregator and its collaborators: the
//! three read APIs and the three event channels.

use std::sync::Arc;

use storefront_channel::{EventChannel, PoolError, PublishPool};
use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::clock::Clock;
use storefront_core::error::ServiceError;
use storefront_core::event::Event;
use storefront_core::service::{ProductApi, RecommendationApi, ReviewApi};

/// Calls the three core services and publishes write events.
///
/// Read calls are classified here: errors from the load-bearing product call
/// propagate in the domain taxonomy, while failures of the two secondary
/// calls are absorbed and replaced with an empty list. Write events are
/// published through the bounded worker pool because handing an event to a
/// channel is a blocking call.
pub struct CompositeIntegration {
    products: Arc<dyn ProductApi>,
    recommendations: Arc<dyn RecommendationApi>,
    reviews: Arc<dyn ReviewApi>,
    product_events: EventChannel<Product>,
    recommendation_events: EventChannel<Recommendation>,
    review_events: EventChannel<Review>,
    publish_pool: Arc<PublishPool>,
    clock: Arc<dyn Clock>,
}

impl CompositeIntegration {
    /// Wires the integration layer to its collaborators.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        products: Arc<dyn ProductApi>,
        recommendations: Arc<dyn RecommendationApi>,
        reviews: Arc<dyn ReviewApi>,
        product_events: EventChannel<Product>,
        recommendation_events: EventChannel<Recommendation>,
        review_events: EventChannel<Review>,
        publish_pool: Arc<PublishPool>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            recommendations,
            reviews,
            product_events,
            recommendation_events,
            review_events,
            publish_pool,
            clock,
        }
    }

    /// Looks up the product. This call is load-bearing: its failure fails
    /// the whole aggregate.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` when the product is absent; any
    /// other error is logged and propagated in the domain taxonomy.
    pub async fn get_product(&self, product_id: i32) -> Result<Product, ServiceError> {
        self.products.get_product(product_id).await.map_err(|err| {
            match &err {
                ServiceError::NotFound(_) | ServiceError::InvalidInput(_) => {}
                other => {
                    tracing::warn!(product_id, error = %other, "unexpected error from product service");
                }
            }
            err
        })
    }

    /// Looks up recommendations, best-effort: any failure is absorbed and an
    /// empty list returned.
    pub async fn get_recommendations(&self, product_id: i32) -> Vec<Recommendation> {
        match self.recommendations.get_recommendations(product_id).await {
            Ok(recommendations) => recommendations,
            Err(error) => {
                tracing::warn!(
                    product_id,
                    %error,
                    "got an error while requesting recommendations, returning zero recommendations"
                );
                Vec::new()
            }
        }
    }

    /// Looks up reviews, best-effort: any failure is absorbed and an empty
    /// list returned.
    pub async fn get_reviews(&self, product_id: i32) -> Vec<Review> {
        match self.reviews.get_reviews(product_id).await {
            Ok(reviews) => reviews,
            Err(error) => {
                tracing::warn!(
                    product_id,
                    %error,
                    "got an error while requesting reviews, returning zero reviews"
                );
                Vec::new()
            }
        }
    }

    /// Publishes a CREATE event for the product.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn create_product(&self, product: Product) -> Result<(), ServiceError> {
        let event = Event::create(product.product_id, product, self.clock.now());
        Self::publish(&self.publish_pool, &self.product_events, event).await
    }

    /// Publishes a CREATE event for a recommendation.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn create_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> Result<(), ServiceError> {
        let event = Event::create(recommendation.product_id, recommendation, self.clock.now());
        Self::publish(&self.publish_pool, &self.recommendation_events, event).await
    }

    /// Publishes a CREATE event for a review.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn create_review(&self, review: Review) -> Result<(), ServiceError> {
        let event = Event::create(review.product_id, review, self.clock.now());
        Self::publish(&self.publish_pool, &self.review_events, event).await
    }

    /// Publishes a DELETE event on the product channel.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn delete_product(&self, product_id: i32) -> Result<(), ServiceError> {
        let event = Event::delete(product_id, self.clock.now());
        Self::publish(&self.publish_pool, &self.product_events, event).await
    }

    /// Publishes a DELETE event on the recommendation channel.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn delete_recommendations(&self, product_id: i32) -> Result<(), ServiceError> {
        let event = Event::delete(product_id, self.clock.now());
        Self::publish(&self.publish_pool, &self.recommendation_events, event).await
    }

    /// Publishes a DELETE event on the review channel.
    ///
    /// # Errors
    ///
    /// See [`Self::publish`].
    pub async fn delete_reviews(&self, product_id: i32) -> Result<(), ServiceError> {
        let event = Event::delete(product_id, self.clock.now());
        Self::publish(&self.publish_pool, &self.review_events, event).await
    }

    /// Runs the blocking publish on the worker pool and waits for its
    /// outcome without blocking the runtime.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Overloaded` when the pool's queue is
    /// saturated, `ServiceError::Publish` when the channel rejected the
    /// event, and `ServiceError::Internal` for pool shutdown.
    async fn publish<T>(
        pool: &PublishPool,
        channel: &EventChannel<T>,
        event: Event<i32, T>,
    ) -> Result<(), ServiceError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let channel = channel.clone();
        let receiver = pool
            .submit(move || channel.publish_blocking(event))
            .map_err(|err| match err {
                PoolError::Saturated => {
                    ServiceError::Overloaded("publish pool queue is saturated".to_owned())
                }
                PoolError::Shutdown => {
                    ServiceError::Internal("publish pool is shut down".to_owned())
                }
            })?;
        receiver
            .await
            .map_err(|_| ServiceError::Internal("publish worker dropped the result".to_owned()))?
            .map_err(|err| ServiceError::Publish(err.to_string()))
    }
}
