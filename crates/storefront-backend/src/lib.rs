//! Storefront Backend: the core services behind the composite aggregator.
//!
//! The three core services (product, review, recommendation) are near-
//! identical, so they are one generic facade parameterized over entity type;
//! this crate supplies the facade, the per-entity configuration, and the
//! generic event consumer that applies CREATE/DELETE events to the store.

mod entities;
mod facade;
mod processor;

pub use entities::{CoreEntity, ProductEntity, RecommendationEntity, ReviewEntity};
pub use facade::CoreService;
pub use processor::CoreEventProcessor;
