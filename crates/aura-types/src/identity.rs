//! Authenticated identity types.
//!
//! An [`Identity`] is issued by the auth service after credential
//! verification and is immutable for the widget's lifetime. The access
//! token is wrapped in [`secrecy::SecretString`] and never appears in
//! `Debug` output or logs.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// The authenticated user's id and access token.
///
/// Passed by reference to any operation needing authorization; never held
/// as ambient global state.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub access_token: SecretString,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, access_token: SecretString) -> Self {
        Self {
            user_id: user_id.into(),
            access_token,
        }
    }
}

/// The identity provider's view of the current sign-in.
///
/// `Absent` before any sign-in attempt, `Pending` while credential
/// verification is in flight, `Resolved` once an identity is issued.
#[derive(Debug, Clone, Default)]
pub enum IdentityState {
    #[default]
    Absent,
    Pending,
    Resolved(Identity),
}

impl IdentityState {
    /// The resolved identity, if sign-in has completed.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityState::Resolved(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, IdentityState::Resolved(_))
    }
}

/// Account profile returned by the auth service on login/registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A completed sign-in: the account profile plus the capability to call
/// authenticated endpoints.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub profile: UserProfile,
    pub identity: Identity,
}
