//! Outbound delivery seam. The engine forwards completed submissions through
//! this trait so tests can drive full flows without a live transport.

use async_trait::async_trait;
use teloxide::prelude::*;

#[async_trait]
pub trait FeedbackForwarder: Send + Sync {
    /// Deliver a rendered notification to the recipient chat. Any error is
    /// terminal for the submission; the engine never retries.
    async fn forward(&self, recipient: ChatId, body: &str) -> anyhow::Result<()>;
}

/// Production forwarder backed by the bot's own send-message call.
pub struct BotForwarder {
    bot: Bot,
}

impl BotForwarder {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl FeedbackForwarder for BotForwarder {
    async fn forward(&self, recipient: ChatId, body: &str) -> anyhow::Result<()> {
        self.bot.send_message(recipient, body).await?;
        Ok(())
    }
}
