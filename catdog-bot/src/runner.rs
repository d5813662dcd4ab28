use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_core::Bot as CoreBot;
use dbot_telegram::{run_repl, CredentialsError, TelegramBotAdapter, TelegramConfig};
use detection_handlers::{
    HelpHandler, ImageStaging, LoggingHandler, PhotoDetectionHandler, StartHandler,
    UploadHintHandler,
};
use handler_chain::HandlerChain;
use image_annotator::Annotator;
use tracing::{info, instrument};
use vision_client::GoogleVisionClient;

use crate::config::BotConfig;

/// Resolves the Telegram connection settings. A `--token` override skips the credentials file.
pub fn load_telegram_config(
    config: &BotConfig,
    token: Option<String>,
) -> std::result::Result<TelegramConfig, CredentialsError> {
    let telegram = match token.filter(|t| !t.trim().is_empty()) {
        Some(token) => TelegramConfig::with_token(token.trim().to_string()),
        None => TelegramConfig::from_credentials_file(&config.credentials_file)?,
    };
    Ok(telegram.with_api_url(config.telegram_api_url.clone()))
}

/// Builds the vision client and annotator. Fails on bad vision settings or an unloadable font.
pub fn build_annotator(config: &BotConfig) -> Result<Annotator> {
    let auth = config
        .vision_auth()
        .context("VISION_API_KEY or VISION_ACCESS_TOKEN must be set")?;
    let client = GoogleVisionClient::with_endpoint(auth, &config.vision_endpoint)?
        .with_max_results(config.vision_max_results);
    let annotator = Annotator::new(config.annotator_config(), Arc::new(client))
        .context("Failed to build annotator")?;
    Ok(annotator)
}

/// Logging first; commands before photos; the upload hint catches whatever text is left.
pub fn build_handler_chain(
    bot: Arc<dyn CoreBot>,
    annotator: Arc<Annotator>,
    staging: ImageStaging,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(bot.clone())))
        .add_handler(Arc::new(HelpHandler::new(bot.clone())))
        .add_handler(Arc::new(PhotoDetectionHandler::new(
            bot.clone(),
            annotator,
            staging,
        )))
        .add_handler(Arc::new(UploadHintHandler::new(bot)))
}

/// Validates config, builds the annotator and handler chain, then runs the REPL until Ctrl-C.
/// Tracing must already be initialized.
#[instrument(skip(config, telegram))]
pub async fn run_bot(config: BotConfig, telegram: TelegramConfig) -> Result<()> {
    config.validate()?;

    let annotator = Arc::new(build_annotator(&config)?);
    let staging = ImageStaging::new(&config.image_dir, &config.image_extension);
    info!(
        image_dir = %staging.dir().display(),
        extension = %staging.extension(),
        vision_endpoint = %config.vision_endpoint,
        style = ?config.annotator_style,
        "Initializing bot"
    );

    let teloxide_bot = telegram.build_bot()?;
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(bot, annotator, staging);

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain).await
}
