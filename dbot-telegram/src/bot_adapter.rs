//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests can substitute another Bot impl.

use std::path::Path;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, Result, User};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, ForceReply, InputFile, ParseMode, UserId};
use teloxide::utils::markdown::{escape, user_mention};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn bot_error(e: impl std::fmt::Display) -> DbotError {
    DbotError::Bot(e.to_string())
}

/// MarkdownV2 greeting, e.g. `Hi [Ann Lee](tg://user?id=42)\!`.
pub(crate) fn greeting_markdown(user: &User) -> String {
    format!(
        "Hi {}{}",
        user_mention(UserId(user.id as u64), &user.display_name()),
        escape("!")
    )
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_greeting(&self, chat: &Chat, user: &User) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), greeting_markdown(user))
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(ForceReply::new().selective())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    #[instrument(skip(self, chat, caption), fields(chat_id = chat.id))]
    async fn send_photo(&self, chat: &Chat, photo: &Path, caption: Option<&str>) -> Result<()> {
        let request = self
            .bot
            .send_photo(ChatId(chat.id), InputFile::file(photo.to_path_buf()));
        let request = match caption {
            Some(c) => request.caption(c.to_string()),
            None => request,
        };
        request.await.map_err(bot_error)?;
        debug!(path = %photo.display(), "Photo sent");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_error)?;
        let mut dst = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut dst)
            .await
            .map_err(bot_error)?;
        dst.flush().await?;
        debug!(
            telegram_path = %file.path,
            size = file.meta.size,
            "File downloaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_exposes_inner_bot() {
        let adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"));
        assert_eq!(adapter.inner().token(), "dummy_token");
    }

    fn user(id: i64, first: &str, last: Option<&str>) -> User {
        User {
            id,
            username: None,
            first_name: Some(first.to_string()),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn test_greeting_mentions_user() {
        assert_eq!(
            greeting_markdown(&user(42, "Ann", Some("Lee"))),
            "Hi [Ann Lee](tg://user?id=42)\\!"
        );
    }

    /// **Test: MarkdownV2 characters in the display name are escaped inside the mention.**
    #[test]
    fn test_greeting_escapes_display_name() {
        assert_eq!(
            greeting_markdown(&user(7, "O_Neil", Some("Jr."))),
            "Hi [O\\_Neil Jr\\.](tg://user?id=7)\\!"
        );
    }
}
