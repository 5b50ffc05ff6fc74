//! `/cancel` — drop the active form, if any. The acknowledgment is the same
//! whether a session existed or not.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::model::AppState;
use crate::ui::text;

pub async fn run(bot: Bot, msg: Message, state: Arc<AppState>) -> anyhow::Result<()> {
    if let Some(user) = msg.from.as_ref() {
        state.engine.cancel(user.id).await;
    }
    bot.send_message(msg.chat.id, text::CANCELLED).await?;
    Ok(())
}
