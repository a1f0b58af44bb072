//! Shared application state.

use std::sync::Arc;

use storefront_backend::{CoreService, ProductEntity, RecommendationEntity, ReviewEntity};
use storefront_composite::CompositeService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The composite aggregator.
    pub composite: Arc<CompositeService>,
    /// The product core service.
    pub products: Arc<CoreService<ProductEntity>>,
    /// The recommendation core service.
    pub recommendations: Arc<CoreService<RecommendationEntity>>,
    /// The review core service.
    pub reviews: Arc<CoreService<ReviewEntity>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        composite: Arc<CompositeService>,
        products: Arc<CoreService<ProductEntity>>,
        recommendations: Arc<CoreService<RecommendationEntity>>,
        reviews: Arc<CoreService<ReviewEntity>>,
    ) -> Self {
        Self {
            composite,
            products,
            recommendations,
            reviews,
        }
    }
}
