//! [`AuthBackend`] implementation for the support service.
//!
//! Login failures collapse to [`AuthError::Denied`] regardless of the
//! response body; registration failures surface the server's `message`
//! so the user can act on it. Both calls share the client's 10-second
//! timeout.

use secrecy::{ExposeSecret, SecretString};

use aura_core::backend::AuthBackend;
use aura_types::error::AuthError;
use aura_types::identity::{AuthenticatedUser, Identity, UserProfile};

use super::SupportApi;
use super::types::{ApiErrorBody, AuthResponse, LoginRequest, RegisterRequest};

fn map_auth_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Timeout
    } else {
        AuthError::Transport(err.to_string())
    }
}

fn into_authenticated_user(body: AuthResponse) -> AuthenticatedUser {
    let identity = Identity::new(body.user.id.clone(), SecretString::from(body.token));
    AuthenticatedUser {
        profile: UserProfile {
            id: body.user.id,
            email: body.user.email,
            name: body.user.name,
        },
        identity,
    }
}

impl AuthBackend for SupportApi {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError> {
        let body = RegisterRequest {
            name,
            email,
            password: password.expose_secret(),
        };

        let response = self
            .client()
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(map_auth_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_else(|_| "Registration failed".to_string());
            return Err(AuthError::Rejected(message));
        }

        let parsed: AuthResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(into_authenticated_user(parsed))
    }

    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedUser, AuthError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };

        let response = self
            .client()
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(map_auth_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "login rejected");
            return Err(AuthError::Denied);
        }

        let parsed: AuthResponse = response.json().await.map_err(|_| AuthError::Denied)?;

        Ok(into_authenticated_user(parsed))
    }
}
