//! Router for inline-keyboard callback queries.
//!
//! The main handler tree delegates every callback query here. The token
//! family is picked by prefix, the token itself is decoded by exact match,
//! and unrecognized data is rejected without touching any session. Each path
//! answers the callback query exactly once so the client spinner always
//! stops.

pub mod ids;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;

use crate::engine::FlowError;
use crate::model::AppState;
use crate::ui::{keyboards, text};

pub async fn handle(bot: Bot, query: CallbackQuery, state: Arc<AppState>) -> anyhow::Result<()> {
    let Some(data) = query.data.clone() else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    if data.starts_with(ids::FORMAT_PREFIX) {
        handle_format(&bot, &query, &state, &data).await
    } else if data.starts_with(ids::FEEDBACK_TYPE_PREFIX) {
        handle_feedback_type(&bot, &query, &state, &data).await
    } else {
        tracing::warn!(target: "interactions", user_id = %query.from.id, data = %data, "unrecognized callback token");
        bot.answer_callback_query(query.id.clone())
            .text(text::UNKNOWN_CHOICE)
            .await?;
        Ok(())
    }
}

async fn handle_format(
    bot: &Bot,
    query: &CallbackQuery,
    state: &AppState,
    data: &str,
) -> anyhow::Result<()> {
    let user = query.from.id;
    let Some(format) = ids::parse_format_token(data) else {
        return reject_malformed(bot, query, data).await;
    };

    match state.engine.select_format(user, format).await {
        Ok(()) => {
            bot.answer_callback_query(query.id.clone()).await?;
            show_step(
                bot,
                query,
                &text::step_feedback_type(format),
                Some(keyboards::feedback_type_menu()),
            )
            .await
        }
        Err(FlowError::SessionExpired) => {
            bot.answer_callback_query(query.id.clone()).await?;
            show_step(bot, query, text::SESSION_EXPIRED, None).await
        }
        Err(_) => reject_stale(bot, query).await,
    }
}

async fn handle_feedback_type(
    bot: &Bot,
    query: &CallbackQuery,
    state: &AppState,
    data: &str,
) -> anyhow::Result<()> {
    let user = query.from.id;
    let Some(feedback_type) = ids::parse_feedback_type_token(data) else {
        return reject_malformed(bot, query, data).await;
    };

    match state.engine.select_feedback_type(user, feedback_type).await {
        Ok(format) => {
            bot.answer_callback_query(query.id.clone()).await?;
            show_step(bot, query, &text::step_message(format, feedback_type), None).await
        }
        Err(FlowError::SessionExpired) => {
            bot.answer_callback_query(query.id.clone()).await?;
            show_step(bot, query, text::SESSION_EXPIRED, None).await
        }
        Err(_) => reject_stale(bot, query).await,
    }
}

/// A token the bot's own menus never produce. State is left untouched.
async fn reject_malformed(bot: &Bot, query: &CallbackQuery, data: &str) -> anyhow::Result<()> {
    tracing::warn!(target: "interactions", user_id = %query.from.id, data = %data, "malformed choice token rejected");
    bot.answer_callback_query(query.id.clone())
        .text(text::UNKNOWN_CHOICE)
        .await?;
    Ok(())
}

/// A duplicate or late press of a real button; the short alert is enough.
async fn reject_stale(bot: &Bot, query: &CallbackQuery) -> anyhow::Result<()> {
    tracing::debug!(target: "interactions", user_id = %query.from.id, "stale menu selection ignored");
    bot.answer_callback_query(query.id.clone())
        .text(text::STALE_CHOICE)
        .await?;
    Ok(())
}

/// Advance the menu message in place; fall back to a fresh message when the
/// original is no longer accessible to the bot.
async fn show_step(
    bot: &Bot,
    query: &CallbackQuery,
    body: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> anyhow::Result<()> {
    if let Some(message) = query.message.as_ref() {
        let req = bot.edit_message_text(message.chat().id, message.id(), body);
        match keyboard {
            Some(kb) => {
                req.reply_markup(kb).await?;
            }
            None => {
                req.await?;
            }
        }
    } else {
        let chat = ChatId(query.from.id.0 as i64);
        let req = bot.send_message(chat, body);
        match keyboard {
            Some(kb) => {
                req.reply_markup(kb).await?;
            }
            None => {
                req.await?;
            }
        }
    }
    Ok(())
}
