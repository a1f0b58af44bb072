//! Stub implementations of the read-side service traits, for exercising the
//! composite aggregator without real backends.

use async_trait::async_trait;

use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::error::ServiceError;
use storefront_core::service::{ProductApi, RecommendationApi, ReviewApi};

/// A product API that returns the same product for every lookup.
#[derive(Debug, Clone)]
pub struct FixedProductApi(pub Product);

#[async_trait]
impl ProductApi for FixedProductApi {
    async fn get_product(&self, _product_id: i32) -> Result<Product, ServiceError> {
        Ok(self.0.clone())
    }
}

/// A product API that fails every lookup with the configured error.
#[derive(Debug, Clone)]
pub struct FailingProductApi(pub ServiceError);

#[async_trait]
impl ProductApi for FailingProductApi {
    async fn get_product(&self, _product_id: i32) -> Result<Product, ServiceError> {
        Err(self.0.clone())
    }
}

/// A recommendation API that returns the same list for every lookup.
#[derive(Debug, Clone)]
pub struct FixedRecommendationApi(pub Vec<Recommendation>);

#[async_trait]
impl RecommendationApi for FixedRecommendationApi {
    async fn get_recommendations(
        &self,
        _product_id: i32,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// A recommendation API that fails every lookup with the configured error.
#[derive(Debug, Clone)]
pub struct FailingRecommendationApi(pub ServiceError);

#[async_trait]
impl RecommendationApi for FailingRecommendationApi {
    async fn get_recommendations(
        &self,
        _product_id: i32,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        Err(self.0.clone())
    }
}

/// A review API that returns the same list for every lookup.
#[derive(Debug, Clone)]
pub struct FixedReviewApi(pub Vec<Review>);

#[async_trait]
impl ReviewApi for FixedReviewApi {
    async fn get_reviews(&self, _product_id: i32) -> Result<Vec<Review>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// A review API that fails every lookup with the configured error.
#[derive(Debug, Clone)]
pub struct FailingReviewApi(pub ServiceError);

#[async_trait]
impl ReviewApi for FailingReviewApi {
    async fn get_reviews(&self, _product_id: i32) -> Result<Vec<Review>, ServiceError> {
        Err(self.0.clone())
    }
}
