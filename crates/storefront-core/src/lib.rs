//! Storefront Core: shared API model and abstractions.
//!
//! This crate defines the wire-level API model, the event envelope, the
//! error taxonomy, and the read-side service traits that the composite
//! aggregator and the backend services depend on. It contains no
//! infrastructure code.

pub mod address;
pub mod api;
pub mod clock;
pub mod composite;
pub mod error;
pub mod event;
pub mod service;
