//! `/start` — static welcome text listing the available commands.

use teloxide::prelude::*;

use crate::ui::text;

pub async fn run(bot: Bot, msg: Message) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, text::WELCOME).await?;
    Ok(())
}
