//! Routes for the review core service.

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use storefront_core::api::Review;

use crate::error::ApiError;
use crate::routes::recommendation::ProductIdQuery;
use crate::state::AppState;

/// GET /review?productId=
async fn get_reviews(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductIdQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    state
        .reviews
        .find_by_product_id(query.product_id)
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// POST /review
async fn create_review(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Review>,
) -> Result<Json<Review>, ApiError> {
    state
        .reviews
        .create(&body)
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// DELETE /review?productId=
async fn delete_reviews(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    state
        .reviews
        .delete_by_product_id(query.product_id)
        .map(|()| StatusCode::OK)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// Returns the router for the review service.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/review",
        get(get_reviews).post(create_review).delete(delete_reviews),
    )
}
