//! The contract an entity must satisfy to be held in a store.

use uuid::Uuid;

/// An entity with a storage-assigned identity, an optimistic-concurrency
/// version, and a business key.
///
/// The business key is `product_id` alone for singleton-per-product entities
/// (product) and `product_id` + `entity_id` for collection entities
/// (recommendation, review). The key must be unique within a store.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    /// The product business key.
    fn product_id(&self) -> i32;

    /// The secondary key within the product, if the entity has one
    /// (`recommendation_id` / `review_id`); `None` for products.
    fn entity_id(&self) -> Option<i32>;

    /// The storage-assigned identity, once persisted.
    fn id(&self) -> Option<Uuid>;

    /// Assigns the storage identity. Called by the store on create.
    fn assign_id(&mut self, id: Uuid);

    /// The optimistic-concurrency version.
    fn version(&self) -> i64;

    /// Sets the version. Called by the store on create and update.
    fn set_version(&mut self, version: i64);

    /// The full business key, used in error messages and for uniqueness.
    fn business_key(&self) -> (i32, Option<i32>) {
        (self.product_id(), self.entity_id())
    }
}

/// Renders a business key for error messages, e.g. `productId: 1` or
/// `productId: 1, entityId: 2`.
#[must_use]
pub fn format_key(key: (i32, Option<i32>)) -> String {
    match key {
        (product_id, None) => format!("productId: {product_id}"),
        (product_id, Some(entity_id)) => {
            format!("productId: {product_id}, entityId: {entity_id}")
        }
    }
}
