//! Static routing table from the two categorical choices to the staff chat
//! that receives the completed submission.

use std::collections::HashMap;

use teloxide::types::ChatId;

use super::session::{AppFormat, FeedbackType};
use crate::constants;

/// Read-only mapping `(app format, feedback type) -> recipient chat`.
///
/// A missing pair is a deployment defect, never a user error; callers treat
/// it as a configuration failure.
pub struct RecipientTable {
    entries: HashMap<(AppFormat, FeedbackType), ChatId>,
}

impl RecipientTable {
    pub fn new(entries: impl IntoIterator<Item = ((AppFormat, FeedbackType), ChatId)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn resolve(&self, format: AppFormat, feedback_type: FeedbackType) -> Option<ChatId> {
        self.entries.get(&(format, feedback_type)).copied()
    }
}

impl Default for RecipientTable {
    fn default() -> Self {
        use AppFormat::*;
        use FeedbackType::*;
        Self::new([
            ((Android, Wishes), ChatId(constants::ANDROID_WISHES_CHAT)),
            ((Android, Features), ChatId(constants::FEATURES_CHAT)),
            ((MiniApp, Wishes), ChatId(constants::MINIAPP_WISHES_CHAT)),
            ((MiniApp, Features), ChatId(constants::FEATURES_CHAT)),
        ])
    }
}
