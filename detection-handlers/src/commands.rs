//! `/start`, `/help` and the fallback for text that is not a photo.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use tracing::{error, info, instrument};

/// Usage text sent for `/help`.
pub const HELP_TEXT: &str = "Send me a photo and I will mark every cat and dog I can find.\n\
\n\
/start - say hello\n\
/help - show this message";

const UPLOAD_HINT: &str = "Uploading image? Send it as a photo and I will look for cats and dogs.";
const UNKNOWN_COMMAND: &str = "Unknown command. Try /help.";

/// Greets the user on `/start` with a mention and asks them to reply.
pub struct StartHandler {
    bot: Arc<dyn CoreBot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, "step: /start");
        self.bot.send_greeting(&message.chat, &message.user).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// Replies to `/help` with [`HELP_TEXT`].
pub struct HelpHandler {
    bot: Arc<dyn CoreBot>,
}

impl HelpHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("help") {
            return Ok(HandlerResponse::Continue);
        }
        self.bot.reply_to(message, HELP_TEXT).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// Last in the chain: plain text gets a hint to send a photo, unknown commands point to `/help`.
/// Photos and other message types pass through untouched.
pub struct UploadHintHandler {
    bot: Arc<dyn CoreBot>,
}

impl UploadHintHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for UploadHintHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.message_type != "text" || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        let text = match message.command() {
            Some(command) => {
                info!(user_id = message.user.id, command = %command, "Unknown command");
                UNKNOWN_COMMAND
            }
            None => UPLOAD_HINT,
        };
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, "Failed to send hint");
            return Err(e);
        }
        Ok(HandlerResponse::Stop)
    }
}
