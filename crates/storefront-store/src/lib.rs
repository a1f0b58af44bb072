//! Storefront Store: the entity store backing each core service.
//!
//! One store holds one entity type. Every mutation is mediated by the
//! optimistic version check: racing writers both proceed until the store's
//! compare-and-increment step, where exactly one observes a conflict.

mod entity;
mod error;
mod memory;

pub use entity::StoredEntity;
pub use error::StoreError;
pub use memory::InMemoryStore;
