//! # catdog-bot
//!
//! Wires the Telegram layer, the detection handlers and the image annotator into one bot.
//! Used by the `catdog-bot` binary and by integration tests that drive the handler chain directly.

mod cli;
mod config;
mod runner;

pub use cli::{Cli, Commands};
pub use config::{AnnotatorStyle, BotConfig, ACCEPTED_LABELS};
pub use runner::{build_annotator, build_handler_chain, load_telegram_config, run_bot};

/// Exit status when the bot token cannot be read.
pub const EXIT_BAD_CREDENTIALS: i32 = 13;
/// Exit status for any other startup failure (config, font, logging).
pub const EXIT_STARTUP_FAILED: i32 = 14;
