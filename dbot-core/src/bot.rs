//! Bot abstraction for sending replies and fetching uploaded files.
//!
//! [`Bot`] is transport-agnostic; `dbot-telegram` implements it via teloxide and tests substitute
//! recording mocks.

use std::path::Path;

use crate::error::Result;
use crate::types::{Chat, Message, User};
use async_trait::async_trait;

/// Outgoing operations a handler may perform. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Greets `user` in `chat` with a mention and asks them for a reply.
    async fn send_greeting(&self, chat: &Chat, user: &User) -> Result<()>;

    /// Uploads the image at `photo` to the chat, with an optional caption.
    async fn send_photo(&self, chat: &Chat, photo: &Path, caption: Option<&str>) -> Result<()>;

    /// Downloads a previously uploaded file (transport file id) into `dest`, creating or truncating it.
    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()>;
}
