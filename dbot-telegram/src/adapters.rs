//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, MessageDirection, PhotoRef, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let photo = self.largest_photo();
        let (message_type, content) = match (&photo, self.0.text()) {
            (Some(_), _) => ("photo", self.0.caption().unwrap_or("")),
            (None, Some(text)) => ("text", text),
            (None, None) => ("other", ""),
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: content.to_string(),
            message_type: message_type.to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
            photo,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Telegram sends every photo in several sizes; picks the one with the most pixels.
    fn largest_photo(&self) -> Option<PhotoRef> {
        self.0
            .photo()?
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
            .map(|p| PhotoRef {
                file_id: p.file.id.0.clone(),
                width: p.width,
                height: p.height,
            })
    }
}
