use thiserror::Error;

/// Errors from the chat service HTTP boundary.
///
/// Produced by backend implementations; the dispatcher converts these into
/// a visible fallback turn, session establishment converts them into
/// [`SessionError::CreationFailed`]. They never cross into the UI layer.
#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response body: {0}")]
    Deserialization(String),
}

/// Errors related to chat session establishment.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("chat session creation failed: {0}")]
    CreationFailed(String),
}

/// Errors related to authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication denied")]
    Denied,

    #[error("authentication request timed out")]
    Timeout,

    #[error("{0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Client-side password policy violations, reported before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least 8 characters long.")]
    TooShort,

    #[error("Passwords do not match.")]
    ConfirmationMismatch,

    #[error(
        "Please use a stronger password with uppercase letters, numbers, and special characters."
    )]
    TooWeak,
}
