//! Wire-level API model for the three core services.
//!
//! These are the JSON shapes exchanged between the composite service and the
//! core services, and carried as event payloads. Storage identity and
//! versioning live on the backend entities, not here.

use serde::{Deserialize, Serialize};

/// A product, identified by its business key `productId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Business key; positive integer.
    pub product_id: i32,
    /// Product name.
    pub name: String,
    /// Product weight.
    pub weight: i32,
    /// Address of the service instance that produced this representation.
    #[serde(default)]
    pub service_address: String,
}

/// A recommendation for a product. Zero-to-many per product; the compound
/// business key is `productId` + `recommendationId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Product business key.
    pub product_id: i32,
    /// Recommendation identifier within the product.
    pub recommendation_id: i32,
    /// Recommendation author.
    pub author: String,
    /// Rating, 1 to 5.
    pub rate: i32,
    /// Recommendation text.
    pub content: String,
    /// Address of the service instance that produced this representation.
    #[serde(default)]
    pub service_address: String,
}

/// A review of a product. Zero-to-many per product; the compound business
/// key is `productId` + `reviewId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Product business key.
    pub product_id: i32,
    /// Review identifier within the product.
    pub review_id: i32,
    /// Review author.
    pub author: String,
    /// Review subject line.
    pub subject: String,
    /// Review text.
    pub content: String,
    /// Address of the service instance that produced this representation.
    #[serde(default)]
    pub service_address: String,
}
