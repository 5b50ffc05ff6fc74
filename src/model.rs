//! Shared application state injected into every handler through the
//! dispatcher's dependency map.

use crate::engine::FeedbackEngine;

/// The central, shared state of the bot. An `Arc<AppState>` is registered
/// with the dispatcher and handed to each command, callback and text handler.
pub struct AppState {
    /// The conversation engine owning all per-user feedback sessions.
    pub engine: FeedbackEngine,
}

impl AppState {
    pub fn new(engine: FeedbackEngine) -> Self {
        Self { engine }
    }
}
