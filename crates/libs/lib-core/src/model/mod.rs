//! # Model Layer
//!
//! Database schema, entities, and repositories.

pub mod store;
