//! Entity definitions for the three core services.
//!
//! Each entity pairs a stored shape (storage identity + version + business
//! fields) with its wire-level API shape, and validates business fields when
//! converting from the wire.

use uuid::Uuid;

use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::error::ServiceError;
use storefront_store::StoredEntity;

/// Per-entity configuration of the generic core service: the wire shape and
/// the mapping between it and the stored shape.
pub trait CoreEntity: StoredEntity {
    /// The wire-level API shape for this entity.
    type Api: Clone + Send + Sync + 'static;

    /// The service name, used in logs and error messages.
    const SERVICE_NAME: &'static str;

    /// Builds a stored entity from its wire shape, validating business
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for out-of-range keys or fields.
    fn from_api(api: &Self::Api) -> Result<Self, ServiceError>;

    /// Renders the entity back to its wire shape, stamped with the address
    /// of the replying service instance.
    fn to_api(&self, service_address: &str) -> Self::Api;
}

fn check_key(name: &str, value: i32) -> Result<(), ServiceError> {
    if value < 1 {
        return Err(ServiceError::InvalidInput(format!(
            "invalid {name}: {value}"
        )));
    }
    Ok(())
}

/// Stored shape of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntity {
    /// Storage-assigned identity.
    pub id: Option<Uuid>,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Product business key.
    pub product_id: i32,
    /// Product name.
    pub name: String,
    /// Product weight.
    pub weight: i32,
}

impl StoredEntity for ProductEntity {
    fn product_id(&self) -> i32 {
        self.product_id
    }

    fn entity_id(&self) -> Option<i32> {
        None
    }

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

impl CoreEntity for ProductEntity {
    type Api = Product;

    const SERVICE_NAME: &'static str = "product";

    fn from_api(api: &Product) -> Result<Self, ServiceError> {
        check_key("productId", api.product_id)?;
        Ok(Self {
            id: None,
            version: 0,
            product_id: api.product_id,
            name: api.name.clone(),
            weight: api.weight,
        })
    }

    fn to_api(&self, service_address: &str) -> Product {
        Product {
            product_id: self.product_id,
            name: self.name.clone(),
            weight: self.weight,
            service_address: service_address.to_owned(),
        }
    }
}

/// Stored shape of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationEntity {
    /// Storage-assigned identity.
    pub id: Option<Uuid>,
    /// Optimistic-concurrency version.
    pub version: i64,
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
}

impl StoredEntity for RecommendationEntity {
    fn product_id(&self) -> i32 {
        self.product_id
    }

    fn entity_id(&self) -> Option<i32> {
        Some(self.recommendation_id)
    }

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

impl CoreEntity for RecommendationEntity {
    type Api = Recommendation;

    const SERVICE_NAME: &'static str = "recommendation";

    fn from_api(api: &Recommendation) -> Result<Self, ServiceError> {
        check_key("productId", api.product_id)?;
        check_key("recommendationId", api.recommendation_id)?;
        if !(1..=5).contains(&api.rate) {
            return Err(ServiceError::InvalidInput(format!(
                "invalid rate: {}, must be 1-5",
                api.rate
            )));
        }
        Ok(Self {
            id: None,
            version: 0,
            product_id: api.product_id,
            recommendation_id: api.recommendation_id,
            author: api.author.clone(),
            rate: api.rate,
            content: api.content.clone(),
        })
    }

    fn to_api(&self, service_address: &str) -> Recommendation {
        Recommendation {
            product_id: self.product_id,
            recommendation_id: self.recommendation_id,
            author: self.author.clone(),
            rate: self.rate,
            content: self.content.clone(),
            service_address: service_address.to_owned(),
        }
    }
}

/// Stored shape of a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntity {
    /// Storage-assigned identity.
    pub id: Option<Uuid>,
    /// Optimistic-concurrency version.
    pub version: i64,
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
}

impl StoredEntity for ReviewEntity {
    fn product_id(&self) -> i32 {
        self.product_id
    }

    fn entity_id(&self) -> Option<i32> {
        Some(self.review_id)
    }

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

impl CoreEntity for ReviewEntity {
    type Api = Review;

    const SERVICE_NAME: &'static str = "review";

    fn from_api(api: &Review) -> Result<Self, ServiceError> {
        check_key("productId", api.product_id)?;
        check_key("reviewId", api.review_id)?;
        Ok(Self {
            id: None,
            version: 0,
            product_id: api.product_id,
            review_id: api.review_id,
            author: api.author.clone(),
            subject: api.subject.clone(),
            content: api.content.clone(),
        })
    }

    fn to_api(&self, service_address: &str) -> Review {
        Review {
            product_id: self.product_id,
            review_id: self.review_id,
            author: self.author.clone(),
            subject: self.subject.clone(),
            content: self.content.clone(),
            service_address: service_address.to_owned(),
        }
    }
}
