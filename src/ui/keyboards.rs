//! Central keyboard construction helpers so every menu carries exactly the
//! two known options with their canonical callback tokens.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::engine::session::{AppFormat, FeedbackType};
use crate::interactions::ids;

/// Step 1: Android vs Mini App, side by side.
pub fn format_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback(AppFormat::Android.label(), ids::format_token(AppFormat::Android)),
        InlineKeyboardButton::callback(AppFormat::MiniApp.label(), ids::format_token(AppFormat::MiniApp)),
    ]])
}

/// Step 2: wishes vs feature suggestions.
pub fn feedback_type_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback(
            FeedbackType::Wishes.label(),
            ids::feedback_type_token(FeedbackType::Wishes),
        ),
        InlineKeyboardButton::callback(
            FeedbackType::Features.label(),
            ids::feedback_type_token(FeedbackType::Features),
        ),
    ]])
}
