//! Bot commands and their dispatch. One module per command, mirroring the
//! command list shown by `/start`.

pub mod cancel;
pub mod feedback;
pub mod identify;
pub mod start;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::model::AppState;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "snake_case", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show bot info and the command list.")]
    Start,
    #[command(description = "send feedback about the app.")]
    Feedback,
    #[command(description = "cancel the feedback form.")]
    Cancel,
    #[command(description = "show your chat and user ids.")]
    GetChatId,
}

pub async fn dispatch(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    cmd: Command,
) -> anyhow::Result<()> {
    match cmd {
        Command::Start => start::run(bot, msg).await,
        Command::Feedback => feedback::run(bot, msg, state).await,
        Command::Cancel => cancel::run(bot, msg, state).await,
        Command::GetChatId => identify::run(bot, msg).await,
    }
}
