//! The generic core-service facade.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::api::{Product, Recommendation, Review};
use storefront_core::error::ServiceError;
use storefront_core::service::{ProductApi, RecommendationApi, ReviewApi};
use storefront_store::{InMemoryStore, StoreError};

use crate::entities::{CoreEntity, ProductEntity, RecommendationEntity, ReviewEntity};

/// One core service over one entity type: synchronous reads and direct
/// writes against its entity store. All three core services are instances of
/// this type.
#[derive(Debug)]
pub struct CoreService<E> {
    store: Arc<InMemoryStore<E>>,
    service_address: String,
}

impl<E: CoreEntity> CoreService<E> {
    /// Creates a service over the given store, reporting `service_address`
    /// in its responses.
    #[must_use]
    pub fn new(store: Arc<InMemoryStore<E>>, service_address: String) -> Self {
        Self {
            store,
            service_address,
        }
    }

    /// Returns all entities for the product key, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1`, before any
    /// store access.
    pub fn find_by_product_id(&self, product_id: i32) -> Result<Vec<E::Api>, ServiceError> {
        if product_id < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "invalid productId: {product_id}"
            )));
        }
        let found = self.store.find_by_product_id(product_id);
        tracing::debug!(
            service = E::SERVICE_NAME,
            product_id,
            count = found.len(),
            "lookup"
        );
        Ok(found
            .iter()
            .map(|entity| entity.to_api(&self.service_address))
            .collect())
    }

    /// Creates an entity from its wire shape.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for invalid fields or a
    /// duplicate business key.
    pub fn create(&self, api: &E::Api) -> Result<E::Api, ServiceError> {
        let entity = E::from_api(api)?;
        match self.store.create(entity) {
            Ok(created) => {
                tracing::debug!(
                    service = E::SERVICE_NAME,
                    product_id = created.product_id(),
                    "entity created"
                );
                Ok(created.to_api(&self.service_address))
            }
            Err(StoreError::DuplicateKey { key }) => Err(ServiceError::InvalidInput(format!(
                "duplicate key, {key}"
            ))),
            Err(other) => Err(ServiceError::Internal(other.to_string())),
        }
    }

    /// Deletes all entities for the product key. Deleting nothing is
    /// success, so retries and redeliveries are benign.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if `product_id < 1`.
    pub fn delete_by_product_id(&self, product_id: i32) -> Result<(), ServiceError> {
        if product_id < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "invalid productId: {product_id}"
            )));
        }
        let deleted = self.store.delete_by_product_id(product_id);
        tracing::debug!(
            service = E::SERVICE_NAME,
            product_id,
            deleted,
            "entities deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl ProductApi for CoreService<ProductEntity> {
    async fn get_product(&self, product_id: i32) -> Result<Product, ServiceError> {
        self.find_by_product_id(product_id)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ServiceError::NotFound(format!("no product found for productId: {product_id}"))
            })
    }
}

#[async_trait]
impl RecommendationApi for CoreService<RecommendationEntity> {
    async fn get_recommendations(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        self.find_by_product_id(product_id)
    }
}

#[async_trait]
impl ReviewApi for CoreService<ReviewEntity> {
    async fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, ServiceError> {
        self.find_by_product_id(product_id)
    }
}
