//! Shared domain types for the Aura support-chat client.
//!
//! This crate contains the types used across the client: chat sessions,
//! transcript turns, identities, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod chat;
pub mod error;
pub mod identity;
