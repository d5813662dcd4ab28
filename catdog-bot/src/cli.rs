//! CLI parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catdog-bot")]
#[command(about = "Telegram bot that marks cats and dogs in photos", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; the token is read from the credentials file).
    Run {
        /// Credentials file; overrides CREDENTIALS_FILE.
        #[arg(short, long)]
        credentials: Option<PathBuf>,
        /// Bot token; skips the credentials file entirely.
        #[arg(short, long)]
        token: Option<String>,
    },
}
