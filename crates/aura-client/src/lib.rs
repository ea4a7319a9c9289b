//! Infrastructure for the Aura client: the support-service HTTP backend
//! and configuration loading.
//!
//! Implements the backend traits defined in `aura-core` using `reqwest`.

pub mod config;
pub mod http;

pub use http::SupportApi;
