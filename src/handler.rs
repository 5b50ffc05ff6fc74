//! The dispatcher schema: which update goes to which handler.
//!
//! Built as a plain function so integration wiring and production use the
//! same tree. Command messages are routed to the command modules, callback
//! queries to the interactions router, and remaining plain text into the
//! free-text step of the form.

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, MessageFilterExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::commands::{self, Command};
use crate::engine::session::Sender;
use crate::engine::FlowError;
use crate::interactions;
use crate::model::AppState;
use crate::ui::text;

pub fn schema() -> UpdateHandler<anyhow::Error> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(commands::dispatch),
        )
        .branch(Message::filter_text().endpoint(handle_text));

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(interactions::handle))
}

/// Plain text drives the free-text step of the form. Everything else about
/// the flow is button-driven, so out-of-step text only produces a hint.
async fn handle_text(
    bot: Bot,
    msg: Message,
    message_text: String,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    // Unknown slash commands are not feedback content.
    if message_text.starts_with('/') {
        return Ok(());
    }
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let sender = Sender {
        id: user.id,
        username: user.username.clone(),
    };
    match state.engine.submit(&sender, &message_text).await {
        Ok(_recipient) => {
            bot.send_message(msg.chat.id, text::THANKS).await?;
        }
        Err(FlowError::AwaitingChoice) => {
            bot.send_message(msg.chat.id, text::USE_THE_BUTTONS).await?;
        }
        Err(FlowError::SessionExpired) => {
            bot.send_message(msg.chat.id, text::SESSION_EXPIRED).await?;
        }
        Err(err @ FlowError::RecipientNotConfigured { .. }) => {
            tracing::error!(target: "feedback", user_id = %user.id, error = %err, "recipient table incomplete");
            bot.send_message(msg.chat.id, text::RECIPIENT_MISSING).await?;
        }
        Err(FlowError::Delivery(detail)) => {
            bot.send_message(msg.chat.id, text::delivery_failed(&detail))
                .await?;
        }
        // Selection errors cannot come out of submit.
        Err(FlowError::StaleSelection) => {}
    }
    Ok(())
}
