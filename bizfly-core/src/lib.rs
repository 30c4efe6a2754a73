//! Bizfly Core
//!
//! Resource model, attribute schemas and the provider trait consumed by the
//! infrastructure engine that drives the Bizfly Cloud provider.

pub mod provider;
pub mod resource;
pub mod schema;
