//! User-facing strings for the feedback dialogue.

use teloxide::types::{ChatId, UserId};

use crate::engine::session::{AppFormat, FeedbackType};

pub const WELCOME: &str = "🤖 Welcome to the Gainly app feedback bot!\n\n\
📋 Available commands:\n\
/start — show bot info and commands\n\
/feedback — send feedback\n\
/cancel — cancel the current form\n\
/get_chat_id — show your chat id (for maintainers)\n\n\
💡 Use /feedback to share your wishes and suggestions!";

pub const STEP_FORMAT: &str = "📝 Feedback form\n\nStep 1/3: choose the app format:";

pub fn step_feedback_type(format: AppFormat) -> String {
    format!(
        "📝 Feedback form\n\n\
         Chosen: {}\n\n\
         Step 2/3: choose the feedback type:",
        format.label()
    )
}

pub fn step_message(format: AppFormat, feedback_type: FeedbackType) -> String {
    format!(
        "📝 Feedback form\n\n\
         App format: {}\n\
         Feedback type: {}\n\n\
         Step 3/3: enter your message:",
        format.label(),
        feedback_type.label()
    )
}

pub const THANKS: &str = "✅ Thank you! Your message has been sent.";

pub const CANCELLED: &str = "❌ Feedback form cancelled.";

pub const SESSION_EXPIRED: &str = "❌ Session expired. Please start again with /feedback.";

pub const RECIPIENT_MISSING: &str =
    "❌ No recipient is configured for this choice. Please contact the administrator.";

pub fn delivery_failed(detail: &str) -> String {
    format!(
        "❌ Something went wrong while sending your message. Please try again later.\n\
         Error: {detail}"
    )
}

/// Free text arrived while a menu step is still open.
pub const USE_THE_BUTTONS: &str = "Please pick one of the options above using the buttons.";

/// A button press for a step that is no longer current.
pub const STALE_CHOICE: &str = "That menu is no longer active.";

/// A callback token outside the known option set.
pub const UNKNOWN_CHOICE: &str = "That option is not recognized.";

pub fn identity(chat_id: ChatId, user_id: UserId, username: Option<&str>) -> String {
    format!(
        "📋 Your details:\n\n\
         Chat ID: `{chat_id}`\n\
         User ID: `{user_id}`\n\
         Username: @{}\n\n\
         Use the chat id to configure feedback recipients.",
        username.unwrap_or("none")
    )
}
