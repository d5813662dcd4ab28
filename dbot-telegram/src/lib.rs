//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation, credentials-file config, REPL runner.
//! Handles only Telegram connectivity and handler-chain execution; no detection logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{CredentialsError, TelegramConfig};
pub use runner::run_repl;
