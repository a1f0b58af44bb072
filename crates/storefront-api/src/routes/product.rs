//! Routes for the product core service: synchronous read plus direct write.

use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use storefront_core::api::Product;
use storefront_core::error::ServiceError;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /product/{productId}
async fn get_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let found = state
        .products
        .find_by_product_id(product_id)
        .map_err(|err| ApiError::new(err, uri.path()))?;
    found.into_iter().next().map(Json).ok_or_else(|| {
        ApiError::new(
            ServiceError::NotFound(format!("no product found for productId: {product_id}")),
            uri.path(),
        )
    })
}

/// POST /product
async fn create_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Product>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .create(&body)
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// DELETE /product/{productId}
async fn delete_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .delete_by_product_id(product_id)
        .map(|()| StatusCode::OK)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// Returns the router for the product service.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product", axum::routing::post(create_product))
        .route(
            "/product/{product_id}",
            get(get_product).delete(delete_product),
        )
}
