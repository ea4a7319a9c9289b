//! Append-only transcript store.
//!
//! The transcript is the ordered history of turns for one conversation.
//! It only ever grows; turns are never mutated, removed, or reordered.
//! Each append is published on a broadcast channel so observers can react
//! to transcript growth without polling.

use std::sync::RwLock;

use tokio::sync::broadcast;

use aura_types::chat::{TranscriptEvent, Turn};

/// Broadcast capacity for append notifications.
const EVENT_CAPACITY: usize = 64;

/// Ordered, append-only sequence of turns for one conversation.
///
/// Shared read access with interior mutability: appends take the write
/// lock briefly and never across an await point.
pub struct Transcript {
    turns: RwLock<Vec<Turn>>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl Transcript {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            turns: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Append a turn to the end of the transcript.
    ///
    /// Publishes a [`TranscriptEvent::TurnAppended`] to all subscribers;
    /// with no subscribers the event is silently dropped.
    pub fn append(&self, turn: Turn) {
        let index = {
            let mut turns = self.turns.write().unwrap_or_else(|e| e.into_inner());
            let role = turn.role;
            turns.push(turn);
            let index = turns.len() - 1;
            let _ = self.events.send(TranscriptEvent::TurnAppended { index, role });
            index
        };
        tracing::debug!(index, "turn appended to transcript");
    }

    /// Snapshot of the full ordered transcript for rendering.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of turns appended so far.
    pub fn len(&self) -> usize {
        self.turns.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to append notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.events.subscribe()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript").field("len", &self.len()).finish()
    }
}
