//! Route modules, one per exposed service.

pub mod health;
pub mod product;
pub mod product_composite;
pub mod recommendation;
pub mod review;
