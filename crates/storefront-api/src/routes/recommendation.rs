//! Routes for the recommendation core service.

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use storefront_core::api::Recommendation;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter shared by the collection endpoints.
#[derive(Debug, Deserialize)]
pub struct ProductIdQuery {
    /// The product business key.
    #[serde(rename = "productId")]
    pub product_id: i32,
}

/// GET /recommendation?productId=
async fn get_recommendations(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductIdQuery>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    state
        .recommendations
        .find_by_product_id(query.product_id)
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// POST /recommendation
async fn create_recommendation(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Recommendation>,
) -> Result<Json<Recommendation>, ApiError> {
    state
        .recommendations
        .create(&body)
        .map(Json)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// DELETE /recommendation?productId=
async fn delete_recommendations(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    state
        .recommendations
        .delete_by_product_id(query.product_id)
        .map(|()| StatusCode::OK)
        .map_err(|err| ApiError::new(err, uri.path()))
}

/// Returns the router for the recommendation service.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/recommendation",
        get(get_recommendations)
            .post(create_recommendation)
            .delete(delete_recommendations),
    )
}
