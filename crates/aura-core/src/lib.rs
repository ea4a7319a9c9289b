//! Session lifecycle, transcript store, and message dispatch for Aura.
//!
//! This crate defines the "ports" (backend traits) that the HTTP layer
//! implements. It depends only on `aura-types` -- never on `aura-client`
//! or any network crate.

pub mod backend;
pub mod password;
pub mod session;
pub mod transcript;
pub mod widget;
