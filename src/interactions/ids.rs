//! Callback token constants and decoding for the two feedback menus.
//! Consolidating here keeps the wire format in one place and guarantees the
//! menus and the parsers can never drift apart.

use crate::engine::session::{AppFormat, FeedbackType};

pub const FORMAT_PREFIX: &str = "appformat_"; // followed by a format token
pub const FEEDBACK_TYPE_PREFIX: &str = "feedbacktype_"; // followed by a type token

pub fn format_token(format: AppFormat) -> String {
    format!("{FORMAT_PREFIX}{}", format.token())
}

pub fn feedback_type_token(feedback_type: FeedbackType) -> String {
    format!("{FEEDBACK_TYPE_PREFIX}{}", feedback_type.token())
}

/// Decode a step-1 callback token. The remainder after the prefix must match
/// a known format exactly; spoofed or truncated tokens yield `None`.
pub fn parse_format_token(id: &str) -> Option<AppFormat> {
    AppFormat::from_token(id.strip_prefix(FORMAT_PREFIX)?)
}

/// Decode a step-2 callback token, with the same exact-match contract.
pub fn parse_feedback_type_token(id: &str) -> Option<FeedbackType> {
    FeedbackType::from_token(id.strip_prefix(FEEDBACK_TYPE_PREFIX)?)
}
