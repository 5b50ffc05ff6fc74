//! Transient per-user session storage.
//!
//! The store hands out one lock per user: holding a slot guard serializes
//! every state transition for that user (including the awaited delivery in
//! submit) while leaving other users free to proceed in parallel. The outer
//! map lock is only ever held to look up or create a slot, never across an
//! await point.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::session::Session;

type Slot = Arc<Mutex<Option<Session>>>;

/// Concurrency-safe map of active feedback sessions keyed by user id.
///
/// `None` in a slot means "no session" — the terminal state of the form.
/// Emptied slots are retained; a user's next `/feedback` reuses them.
#[derive(Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<UserId, Slot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the caller's slot, creating it on first contact.
    pub(crate) async fn slot(&self, user: UserId) -> OwnedMutexGuard<Option<Session>> {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(user).or_default())
        };
        slot.lock_owned().await
    }
}
