//! `SupportApi` -- concrete backend for the remote support service.
//!
//! Implements [`ChatBackend`] and [`AuthBackend`] over HTTP with a
//! 10-second request timeout. The caller's access token travels as a
//! bearer header and is only exposed while the header is built.

mod auth;
mod types;

use std::time::Duration;

use secrecy::ExposeSecret;

use aura_core::backend::ChatBackend;
use aura_types::chat::ChatSession;
use aura_types::error::ChatApiError;
use aura_types::identity::Identity;

use types::{CreateSessionRequest, CreateSessionResponse, SendMessageRequest, SendMessageResponse};

/// Requests are aborted and treated as failed after this long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the support service.
pub struct SupportApi {
    client: reqwest::Client,
    base_url: String,
}

impl SupportApi {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Build the full API URL for a given path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn map_request_error(err: reqwest::Error) -> ChatApiError {
    if err.is_timeout() {
        ChatApiError::Timeout
    } else {
        ChatApiError::Transport(err.to_string())
    }
}

impl ChatBackend for SupportApi {
    async fn create_session(&self, identity: &Identity) -> Result<ChatSession, ChatApiError> {
        let body = CreateSessionRequest {
            user_id: &identity.user_id,
        };

        let response = self
            .client
            .post(self.url("/api/chat/session"))
            .bearer_auth(identity.access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| ChatApiError::Deserialization(e.to_string()))?;

        Ok(ChatSession::new(parsed.session_id))
    }

    async fn send_message(
        &self,
        session: &ChatSession,
        identity: &Identity,
        text: &str,
    ) -> Result<String, ChatApiError> {
        let body = SendMessageRequest {
            message: text,
            user_id: &identity.user_id,
        };

        let response = self
            .client
            .post(self.url(&format!("/api/chat/{}/message", session.session_id)))
            .bearer_auth(identity.access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| ChatApiError::Deserialization(e.to_string()))?;

        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let api = SupportApi::new("http://localhost:5000");
        assert_eq!(
            api.url("/api/chat/session"),
            "http://localhost:5000/api/chat/session"
        );
    }

    #[test]
    fn new_strips_trailing_slash() {
        let api = SupportApi::new("http://localhost:5000/");
        assert_eq!(
            api.url("/api/chat/s1/message"),
            "http://localhost:5000/api/chat/s1/message"
        );
    }

    #[test]
    fn message_path_embeds_session_id() {
        let api = SupportApi::new("https://support.example.com");
        let session = ChatSession::new("abc-123");
        let path = format!("/api/chat/{}/message", session.session_id);
        assert_eq!(
            api.url(&path),
            "https://support.example.com/api/chat/abc-123/message"
        );
    }
}
