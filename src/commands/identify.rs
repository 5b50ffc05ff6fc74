//! `/get_chat_id` — stateless identity reply used when configuring the
//! recipient table. No session interaction.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::ui::text;

pub async fn run(bot: Bot, msg: Message) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let reply = text::identity(msg.chat.id, user.id, user.username.as_deref());
    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}
