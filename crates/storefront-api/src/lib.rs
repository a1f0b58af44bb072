//! Storefront API: HTTP surface for the composite and core services.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
