//! Binary for the cat/dog detection bot.

use std::process::ExitCode;

use catdog_bot::{
    load_telegram_config, run_bot, BotConfig, Cli, Commands, EXIT_BAD_CREDENTIALS,
    EXIT_STARTUP_FAILED,
};
use clap::Parser;
use dbot_core::init_tracing;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { credentials, token } => {
            let config = match BotConfig::load(credentials) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Invalid configuration: {:#}", e);
                    return exit_code(EXIT_STARTUP_FAILED);
                }
            };
            if let Err(e) = init_tracing(&config.log_file) {
                eprintln!("Failed to initialize logging ({}): {:#}", config.log_file, e);
                return exit_code(EXIT_STARTUP_FAILED);
            }

            let telegram = match load_telegram_config(&config, token) {
                Ok(telegram) => telegram,
                Err(e) => {
                    error!(error = %e, "Token in credentials file is invalid!");
                    return exit_code(EXIT_BAD_CREDENTIALS);
                }
            };

            if let Err(e) = run_bot(config, telegram).await {
                error!(error = %format!("{:#}", e), "Bot stopped with an error");
                return exit_code(EXIT_STARTUP_FAILED);
            }
            ExitCode::SUCCESS
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}
