//! Shared test mocks and utilities for the Storefront services.

mod api_stubs;
mod clock;

pub use api_stubs::{
    FailingProductApi, FailingRecommendationApi, FailingReviewApi, FixedProductApi,
    FixedRecommendationApi, FixedReviewApi,
};
pub use clock::FixedClock;
