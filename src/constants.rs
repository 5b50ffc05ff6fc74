// Central constants: recipient chats and logging paths.
// Run /get_chat_id against the bot to find the chat id for a new recipient.
pub const ANDROID_WISHES_CHAT: i64 = 844_693_564;
pub const MINIAPP_WISHES_CHAT: i64 = 909_844_183;
// Feature suggestions from both formats land in the same chat.
pub const FEATURES_CHAT: i64 = 946_851_965;

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "bot.log";
