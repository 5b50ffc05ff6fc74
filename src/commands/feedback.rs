//! `/feedback` — entry point of the form. Always succeeds: any half-finished
//! session for the same user is overwritten with a fresh one.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::model::AppState;
use crate::ui::{keyboards, text};

pub async fn run(bot: Bot, msg: Message, state: Arc<AppState>) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    state.engine.begin(user.id).await;
    tracing::info!(
        target: "feedback",
        user_id = %user.id,
        username = user.username.as_deref().unwrap_or("-"),
        "feedback form started"
    );

    bot.send_message(msg.chat.id, text::STEP_FORMAT)
        .reply_markup(keyboards::format_menu())
        .await?;
    Ok(())
}
