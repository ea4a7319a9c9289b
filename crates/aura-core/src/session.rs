//! Chat session lifecycle and message dispatch.
//!
//! [`SessionManager`] binds a resolved identity to a server-issued chat
//! session, owns the conversation transcript, and dispatches outgoing
//! messages. Session creation happens exactly once per manager; message
//! delivery failures are absorbed into the transcript as a visible
//! fallback turn and never surface to the caller.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{info, warn};

use aura_types::chat::{ChatSession, Turn};
use aura_types::error::SessionError;
use aura_types::identity::Identity;

use crate::backend::ChatBackend;
use crate::transcript::Transcript;

/// Fixed assistant greeting seeded into the transcript on session creation.
pub const GREETING: &str =
    "Hi there! I'm Aura, your AI therapist. How are you feeling today?";

/// Fixed assistant turn appended when message delivery fails.
pub const FALLBACK_NOTICE: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

/// Owns one conversation: session handle, transcript, and dispatch state.
///
/// Constructed with an already-resolved [`Identity`]; the identity is
/// immutable for the manager's lifetime. A fresh manager creates a fresh
/// session -- sessions are never reused across instances.
pub struct SessionManager<B: ChatBackend> {
    backend: B,
    identity: Identity,
    /// Guarded across the creation await so at most one request is issued.
    session: Mutex<Option<ChatSession>>,
    transcript: Transcript,
    /// True while at least one reply is outstanding -- approximately.
    /// Overlapping sends share this one flag, so an earlier completion
    /// clears it while a later send is still in flight.
    awaiting_reply: AtomicBool,
}

impl<B: ChatBackend> SessionManager<B> {
    pub fn new(backend: B, identity: Identity) -> Self {
        Self {
            backend,
            identity,
            session: Mutex::new(None),
            transcript: Transcript::new(),
            awaiting_reply: AtomicBool::new(false),
        }
    }

    /// The identity this manager dispatches on behalf of.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The conversation transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether a dispatched message is still waiting for its reply.
    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply.load(Ordering::SeqCst)
    }

    /// The current session handle, if one has been established.
    pub async fn current_session(&self) -> Option<ChatSession> {
        self.session.lock().await.clone()
    }

    /// Establish the chat session, creating it on first call.
    ///
    /// Issues at most one creation request for the manager's lifetime:
    /// later calls (sequential or concurrent) observe the stored session
    /// and return it without touching the network. On success the
    /// transcript is seeded with the fixed assistant greeting before any
    /// user interaction. On failure the session stays absent and the
    /// caller may simply try again.
    pub async fn establish_session(&self) -> Result<ChatSession, SessionError> {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_ref() {
            return Ok(session.clone());
        }

        match self.backend.create_session(&self.identity).await {
            Ok(session) => {
                info!(session_id = %session.session_id, "chat session established");
                *slot = Some(session.clone());
                self.transcript.append(Turn::assistant(GREETING));
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "chat session creation failed");
                Err(SessionError::CreationFailed(err.to_string()))
            }
        }
    }

    /// Dispatch one outgoing message.
    ///
    /// No-op when `text` is empty after trimming or no session exists.
    /// The user turn is appended with the literal text before the network
    /// round-trip starts, so the transcript reflects the send immediately.
    /// The reply -- or the fixed fallback notice on any delivery failure --
    /// is appended exactly once when the round-trip resolves. This method
    /// never returns an error; delivery failures are fully absorbed.
    pub async fn send_message(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let Some(session) = self.current_session().await else {
            return;
        };

        self.transcript.append(Turn::user(text));
        self.awaiting_reply.store(true, Ordering::SeqCst);

        match self
            .backend
            .send_message(&session, &self.identity, text)
            .await
        {
            Ok(reply) => {
                self.transcript.append(Turn::assistant(reply));
            }
            Err(err) => {
                warn!(
                    session_id = %session.session_id,
                    error = %err,
                    "message delivery failed"
                );
                self.transcript.append(Turn::assistant(FALLBACK_NOTICE));
            }
        }

        self.awaiting_reply.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;

    use secrecy::SecretString;
    use tokio::sync::oneshot;

    use aura_types::chat::TurnRole;
    use aura_types::error::ChatApiError;

    /// What the mock backend does with the next `send_message` call.
    enum ReplyScript {
        Reply(String),
        Fail(ChatApiError),
        /// Hold the call until the paired sender resolves it.
        Gated(oneshot::Receiver<Result<String, ChatApiError>>),
    }

    struct ScriptedBackend {
        create_calls: AtomicUsize,
        send_calls: AtomicUsize,
        create_results: StdMutex<VecDeque<Result<ChatSession, ChatApiError>>>,
        replies: StdMutex<VecDeque<ReplyScript>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                create_calls: AtomicUsize::new(0),
                send_calls: AtomicUsize::new(0),
                create_results: StdMutex::new(VecDeque::new()),
                replies: StdMutex::new(VecDeque::new()),
            }
        }

        fn session_ok(self, id: &str) -> Self {
            self.create_results
                .lock()
                .unwrap()
                .push_back(Ok(ChatSession::new(id)));
            self
        }

        fn session_err(self) -> Self {
            self.create_results
                .lock()
                .unwrap()
                .push_back(Err(ChatApiError::Transport("connection refused".into())));
            self
        }

        fn reply(self, text: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(ReplyScript::Reply(text.to_string()));
            self
        }

        fn reply_err(self, err: ChatApiError) -> Self {
            self.replies.lock().unwrap().push_back(ReplyScript::Fail(err));
            self
        }

        fn reply_gated(self) -> (Self, oneshot::Sender<Result<String, ChatApiError>>) {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push_back(ReplyScript::Gated(rx));
            (self, tx)
        }
    }

    impl ChatBackend for ScriptedBackend {
        async fn create_session(
            &self,
            _identity: &Identity,
        ) -> Result<ChatSession, ChatApiError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.create_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted create result left")
        }

        async fn send_message(
            &self,
            _session: &ChatSession,
            _identity: &Identity,
            _text: &str,
        ) -> Result<String, ChatApiError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            let script = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left");
            match script {
                ReplyScript::Reply(text) => Ok(text),
                ReplyScript::Fail(err) => Err(err),
                ReplyScript::Gated(rx) => rx.await.expect("reply gate dropped"),
            }
        }
    }

    fn test_identity() -> Identity {
        Identity::new("u1", SecretString::from("test-token"))
    }

    fn manager(backend: ScriptedBackend) -> SessionManager<ScriptedBackend> {
        SessionManager::new(backend, test_identity())
    }

    #[tokio::test]
    async fn establish_seeds_greeting() {
        let mgr = manager(ScriptedBackend::new().session_ok("s1"));

        let session = mgr.establish_session().await.unwrap();
        assert_eq!(session.session_id, "s1");

        let turns = mgr.transcript().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::Assistant);
        assert_eq!(turns[0].content, GREETING);
    }

    #[tokio::test]
    async fn establish_twice_issues_one_request() {
        let mgr = manager(ScriptedBackend::new().session_ok("s1"));

        let first = mgr.establish_session().await.unwrap();
        let second = mgr.establish_session().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mgr.backend.create_calls.load(Ordering::SeqCst), 1);
        // Greeting seeded once, not twice.
        assert_eq!(mgr.transcript().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_establish_issues_one_request() {
        let mgr = std::sync::Arc::new(manager(ScriptedBackend::new().session_ok("s1")));

        let a = {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.establish_session().await })
        };
        let b = {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.establish_session().await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();
        assert_eq!(mgr.backend.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn establish_failure_leaves_session_absent() {
        let mgr = manager(ScriptedBackend::new().session_err());

        let result = mgr.establish_session().await;
        assert!(matches!(result, Err(SessionError::CreationFailed(_))));
        assert!(mgr.current_session().await.is_none());
        assert!(mgr.transcript().is_empty());
    }

    #[tokio::test]
    async fn establish_can_be_retried_after_failure() {
        let mgr = manager(ScriptedBackend::new().session_err().session_ok("s2"));

        assert!(mgr.establish_session().await.is_err());
        let session = mgr.establish_session().await.unwrap();
        assert_eq!(session.session_id, "s2");
        assert_eq!(mgr.backend.create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn send_appends_user_then_assistant_reply() {
        let mgr = manager(
            ScriptedBackend::new()
                .session_ok("s1")
                .reply("Tell me more."),
        );
        mgr.establish_session().await.unwrap();

        mgr.send_message("I feel anxious").await;

        let turns = mgr.transcript().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1], Turn::user("I feel anxious"));
        assert_eq!(turns[2], Turn::assistant("Tell me more."));
        assert!(!mgr.awaiting_reply());
    }

    #[tokio::test]
    async fn user_turn_is_visible_before_reply_resolves() {
        let (backend, gate) = ScriptedBackend::new().session_ok("s1").reply_gated();
        let mgr = std::sync::Arc::new(manager(backend));
        mgr.establish_session().await.unwrap();

        let handle = {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.send_message("hello").await })
        };

        // Let the dispatch reach its suspension point.
        while mgr.transcript().len() < 2 {
            tokio::task::yield_now().await;
        }

        let turns = mgr.transcript().turns();
        assert_eq!(turns[1], Turn::user("hello"));
        assert!(mgr.awaiting_reply());

        gate.send(Ok("hi!".to_string())).unwrap();
        handle.await.unwrap();
        assert_eq!(mgr.transcript().turns()[2], Turn::assistant("hi!"));
    }

    #[tokio::test]
    async fn delivery_failure_appends_exactly_one_fallback_turn() {
        let mgr = manager(ScriptedBackend::new().session_ok("s1").reply_err(
            ChatApiError::Http {
                status: 500,
                message: "internal error".into(),
            },
        ));
        mgr.establish_session().await.unwrap();

        mgr.send_message("are you there?").await;

        let turns = mgr.transcript().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[2], Turn::assistant(FALLBACK_NOTICE));
        assert!(!mgr.awaiting_reply());
    }

    #[tokio::test]
    async fn timeout_takes_the_fallback_branch() {
        let mgr = manager(
            ScriptedBackend::new()
                .session_ok("s1")
                .reply_err(ChatApiError::Timeout),
        );
        mgr.establish_session().await.unwrap();

        mgr.send_message("ping").await;

        assert_eq!(mgr.transcript().turns()[2], Turn::assistant(FALLBACK_NOTICE));
    }

    #[tokio::test]
    async fn blank_text_is_a_no_op() {
        let mgr = manager(ScriptedBackend::new().session_ok("s1"));
        mgr.establish_session().await.unwrap();

        mgr.send_message("").await;
        mgr.send_message("   ").await;

        assert_eq!(mgr.transcript().len(), 1); // greeting only
        assert_eq!(mgr.backend.send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn send_without_session_is_a_no_op() {
        let mgr = manager(ScriptedBackend::new());

        mgr.send_message("anyone home?").await;

        assert!(mgr.transcript().is_empty());
        assert_eq!(mgr.backend.send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn untrimmed_text_is_appended_literally() {
        let mgr = manager(ScriptedBackend::new().session_ok("s1").reply("ok"));
        mgr.establish_session().await.unwrap();

        mgr.send_message("  hello  ").await;

        assert_eq!(mgr.transcript().turns()[1], Turn::user("  hello  "));
    }

    #[tokio::test]
    async fn overlapping_sends_interleave_by_completion_order() {
        let (backend, gate_one) = ScriptedBackend::new().session_ok("s1").reply_gated();
        let (backend, gate_two) = backend.reply_gated();
        let mgr = std::sync::Arc::new(manager(backend));
        mgr.establish_session().await.unwrap();

        let first = {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.send_message("first").await })
        };
        while mgr.transcript().len() < 2 {
            tokio::task::yield_now().await;
        }
        let second = {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.send_message("second").await })
        };
        while mgr.transcript().len() < 3 {
            tokio::task::yield_now().await;
        }

        // Both optimistic turns landed in call order.
        let turns = mgr.transcript().turns();
        assert_eq!(turns[1], Turn::user("first"));
        assert_eq!(turns[2], Turn::user("second"));

        // Resolve the second send before the first: replies land in
        // completion order.
        gate_two.send(Ok("reply two".to_string())).unwrap();
        second.await.unwrap();
        assert_eq!(mgr.transcript().turns()[3], Turn::assistant("reply two"));

        // The shared flag is already cleared even though the first send
        // is still outstanding.
        assert!(!mgr.awaiting_reply());

        gate_one.send(Ok("reply one".to_string())).unwrap();
        first.await.unwrap();
        assert_eq!(mgr.transcript().turns()[4], Turn::assistant("reply one"));
    }
}
