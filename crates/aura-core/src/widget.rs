//! Chat widget open/close state machine.
//!
//! [`ChatWidget`] composes the session manager into visible states:
//! `Closed -> Open(SessionPending) -> Open(Ready) -> Closed`. Closing
//! retains the session and transcript in memory, so reopening resumes
//! the same conversation; both are dropped only with the widget itself.

use std::sync::Arc;

use aura_types::identity::Identity;

use crate::backend::ChatBackend;
use crate::session::SessionManager;

/// Phase of an open widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPhase {
    /// Session establishment has not succeeded yet.
    SessionPending,
    /// Session established; the widget accepts sends.
    Ready,
}

/// Visible state of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    Open(OpenPhase),
}

/// Controller binding the session manager to open/closed visual states.
///
/// Requires an already-resolved [`Identity`] at construction, so the
/// "identity must be resolved before opening" precondition holds by
/// construction.
pub struct ChatWidget<B: ChatBackend> {
    manager: Arc<SessionManager<B>>,
    state: WidgetState,
}

impl<B: ChatBackend> ChatWidget<B> {
    pub fn new(backend: B, identity: Identity) -> Self {
        Self {
            manager: Arc::new(SessionManager::new(backend, identity)),
            state: WidgetState::Closed,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, WidgetState::Open(_))
    }

    /// The session manager, shareable with dispatch tasks.
    pub fn manager(&self) -> &Arc<SessionManager<B>> {
        &self.manager
    }

    /// Open the widget, establishing the session if none exists yet.
    ///
    /// Transitions to `Open(Ready)` only when a session is held; on
    /// establishment failure the widget stays `Open(SessionPending)` and
    /// the next open attempt retries. Reopening with a live session goes
    /// straight to `Ready` without a network call.
    pub async fn open(&mut self) {
        if matches!(self.state, WidgetState::Open(OpenPhase::Ready)) {
            return;
        }
        self.state = WidgetState::Open(OpenPhase::SessionPending);
        if self.manager.establish_session().await.is_ok() {
            self.state = WidgetState::Open(OpenPhase::Ready);
        }
    }

    /// Close the widget. The transcript and session are retained.
    pub fn close(&mut self) {
        self.state = WidgetState::Closed;
    }

    /// Dispatch a message if the widget is ready; otherwise a no-op.
    pub async fn send(&self, text: &str) {
        if self.state != WidgetState::Open(OpenPhase::Ready) {
            return;
        }
        self.manager.send_message(text).await;
    }
}
