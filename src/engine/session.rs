//! Core data types of the feedback conversation: the two categorical
//! choices, the per-user session state, and the completed submission.

use std::fmt;

use teloxide::types::UserId;

/// Which client platform the feedback concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppFormat {
    Android,
    MiniApp,
}

impl AppFormat {
    pub const ALL: [AppFormat; 2] = [Self::Android, Self::MiniApp];

    /// Stable wire token used inside callback data.
    pub fn token(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::MiniApp => "miniapp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Android => "📱 Android",
            Self::MiniApp => "🌐 Mini App Telegram",
        }
    }

    /// Exact-match decoding; anything outside the known token set is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.token() == token)
    }
}

impl fmt::Display for AppFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Category of the feedback being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackType {
    Wishes,
    Features,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 2] = [Self::Wishes, Self::Features];

    pub fn token(self) -> &'static str {
        match self {
            Self::Wishes => "wishes",
            Self::Features => "features",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wishes => "💭 Wishes",
            Self::Features => "✨ Feature suggestions",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.token() == token)
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A user's progress through the feedback form.
///
/// Each variant carries exactly the answers collected so far, so a later
/// field cannot exist without the earlier ones and none can be rewritten
/// without restarting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    AwaitingFormat,
    AwaitingFeedbackType {
        format: AppFormat,
    },
    AwaitingMessage {
        format: AppFormat,
        feedback_type: FeedbackType,
    },
}

impl Session {
    pub fn stage(&self) -> Stage {
        match self {
            Self::AwaitingFormat => Stage::AwaitingFormat,
            Self::AwaitingFeedbackType { .. } => Stage::AwaitingFeedbackType,
            Self::AwaitingMessage { .. } => Stage::AwaitingMessage,
        }
    }
}

/// Payload-free view of a session's position in the form, for logging and
/// assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingFormat,
    AwaitingFeedbackType,
    AwaitingMessage,
}

/// Identity of the user submitting feedback, as reported by Telegram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub username: Option<String>,
}

impl Sender {
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(name) => format!("@{name}"),
            None => "(no username)".to_string(),
        }
    }
}

/// A completed feedback form, ready to be forwarded to its recipient.
#[derive(Debug, Clone)]
pub struct Submission {
    pub format: AppFormat,
    pub feedback_type: FeedbackType,
    pub sender: Sender,
    pub text: String,
}

impl Submission {
    /// Body of the notification delivered to the resolved recipient.
    pub fn render(&self) -> String {
        format!(
            "📝 New feedback\n\n\
             App format: {}\n\
             Feedback type: {}\n\
             From: {} (ID: {})\n\n\
             Message:\n{}",
            self.format.label(),
            self.feedback_type.label(),
            self.sender.handle(),
            self.sender.id,
            self.text,
        )
    }
}
