//! Read-side service traits consumed by the composite aggregator.
//!
//! The aggregator fans out to these three collaborators concurrently. Writes
//! do not appear here: they travel through the event channel, not through
//! synchronous calls.

use async_trait::async_trait;

use crate::api::{Product, Recommendation, Review};
use crate::error::ServiceError;

/// Read access to the product service. The product lookup is the
/// load-bearing call of the composite read path.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Returns the product with the given business key.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1` and
    /// `ServiceError::NotFound` if no such product exists.
    async fn get_product(&self, product_id: i32) -> Result<Product, ServiceError>;
}

/// Read access to the recommendation service.
#[async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Returns all recommendations for the given product, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1`.
    async fn get_recommendations(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, ServiceError>;
}

/// Read access to the review service.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Returns all reviews for the given product, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1`.
    async fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, ServiceError>;
}
