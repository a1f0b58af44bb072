//! Storefront Composite: the product-composite aggregator.
//!
//! Reads fan out to the three core services concurrently and fan in with
//! partial-failure tolerance; writes decompose an aggregate into per-entity
//! events on the event channels and return as soon as the events are handed
//! off.

mod integration;
mod service;

pub use integration::CompositeIntegration;
pub use service::CompositeService;
