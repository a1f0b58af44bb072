//! Routes for the product-composite service.
//!
//! Reads return the assembled aggregate; writes return 202 Accepted as soon
//! as the events are handed to the channels, before the backends have
//! processed them.

use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use storefront_core::composite::ProductAggregate;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /product-composite/{productId}
async fn get_composite(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<i32>,
) -> Result<Json<ProductAggregate>, ApiError> {
    state
        .composite
        .get_composite(product_id)
        .await
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// POST /product-composite
async fn create_composite(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<ProductAggregate>,
) -> Result<StatusCode, ApiError> {
    state
        .composite
        .create_composite(&body)
        .await
        .map(|()| StatusCode::ACCEPTED)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// DELETE /product-composite/{productId}
async fn delete_composite(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .composite
        .delete_composite(product_id)
        .await
        .map(|()| StatusCode::ACCEPTED)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// Returns the router for the composite service.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product-composite", axum::routing::post(create_composite))
        .route(
            "/product-composite/{product_id}",
            get(get_composite).delete(delete_composite),
        )
}
