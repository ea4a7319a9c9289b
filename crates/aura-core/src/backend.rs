//! Backend trait definitions.
//!
//! These are the seams between the core and the remote support service.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition); the concrete
//! implementations live in `aura-client`.

use secrecy::SecretString;

use aura_types::chat::ChatSession;
use aura_types::error::{AuthError, ChatApiError};
use aura_types::identity::{AuthenticatedUser, Identity};

/// Trait for the conversational-support service backend.
///
/// Implementations carry the caller's identity on every request; the core
/// never talks to the network directly.
pub trait ChatBackend: Send + Sync {
    /// Request a new chat session for the given identity.
    fn create_session(
        &self,
        identity: &Identity,
    ) -> impl std::future::Future<Output = Result<ChatSession, ChatApiError>> + Send;

    /// Deliver one user message to a session and return the assistant reply.
    fn send_message(
        &self,
        session: &ChatSession,
        identity: &Identity,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, ChatApiError>> + Send;
}

/// Trait for the authentication service backend.
pub trait AuthBackend: Send + Sync {
    /// Register a new account.
    fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> impl std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send;

    /// Verify credentials and obtain an identity.
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send;
}
