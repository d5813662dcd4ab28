//! Application config: credentials location, logging, staging directory, vision backend and annotator
//! style. Loaded from env (call `dotenvy::dotenv()` first).

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use image_annotator::{AnnotatorConfig, FontSource, DEFAULT_FONT_SIZE};
use vision_client::{VisionAuth, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS};

/// Labels drawn by the bot.
pub const ACCEPTED_LABELS: &[&str] = &["Cat", "Dog", "Animal"];

/// How boxes and captions are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotatorStyle {
    /// One colour per label.
    Palette,
    /// Dark-red outline and pink caption for every label.
    Mono,
}

impl AnnotatorStyle {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "palette" => Ok(Self::Palette),
            "mono" => Ok(Self::Mono),
            other => anyhow::bail!("ANNOTATOR_STYLE must be 'palette' or 'mono', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// CREDENTIALS_FILE: first line holds the bot token
    pub credentials_file: PathBuf,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// IMAGE_DIR: where photos are staged while being annotated
    pub image_dir: PathBuf,
    /// IMAGE_EXTENSION
    pub image_extension: String,
    /// VISION_API_KEY
    pub vision_api_key: Option<String>,
    /// VISION_ACCESS_TOKEN, used when no API key is set
    pub vision_access_token: Option<String>,
    /// VISION_ENDPOINT
    pub vision_endpoint: String,
    /// VISION_MAX_RESULTS
    pub vision_max_results: u32,
    /// ANNOTATOR_STYLE
    pub annotator_style: AnnotatorStyle,
    /// ANNOTATOR_FONT_PATH; unset means the embedded DejaVu Sans
    pub font_path: Option<PathBuf>,
    /// ANNOTATOR_FONT_SIZE
    pub font_size: f32,
}

impl BotConfig {
    /// Loads from environment variables. `credentials` overrides CREDENTIALS_FILE if provided.
    pub fn load(credentials: Option<PathBuf>) -> Result<Self> {
        let credentials_file = credentials.unwrap_or_else(|| {
            PathBuf::from(env_or("CREDENTIALS_FILE", "credentials.txt"))
        });
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        let vision_max_results = match non_empty_var("VISION_MAX_RESULTS") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("VISION_MAX_RESULTS must be a positive integer: {}", v))?,
            None => DEFAULT_MAX_RESULTS,
        };
        let font_size = match non_empty_var("ANNOTATOR_FONT_SIZE") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("ANNOTATOR_FONT_SIZE must be a number: {}", v))?,
            None => DEFAULT_FONT_SIZE,
        };
        let annotator_style = match non_empty_var("ANNOTATOR_STYLE") {
            Some(v) => AnnotatorStyle::parse(&v)?,
            None => AnnotatorStyle::Palette,
        };

        Ok(Self {
            credentials_file,
            telegram_api_url,
            log_file: env_or("LOG_FILE", "logs/catdog-bot.log"),
            image_dir: PathBuf::from(env_or("IMAGE_DIR", "images")),
            image_extension: env_or("IMAGE_EXTENSION", "jpg"),
            vision_api_key: non_empty_var("VISION_API_KEY"),
            vision_access_token: non_empty_var("VISION_ACCESS_TOKEN"),
            vision_endpoint: env_or("VISION_ENDPOINT", DEFAULT_ENDPOINT),
            vision_max_results,
            annotator_style,
            font_path: non_empty_var("ANNOTATOR_FONT_PATH").map(PathBuf::from),
            font_size,
        })
    }

    /// Checks URLs, vision credentials and value ranges. Does not touch the network.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if reqwest::Url::parse(&self.vision_endpoint).is_err() {
            anyhow::bail!("VISION_ENDPOINT is not a valid URL: {}", self.vision_endpoint);
        }
        if self.vision_auth().is_none() {
            anyhow::bail!("VISION_API_KEY or VISION_ACCESS_TOKEN must be set");
        }
        if self.vision_max_results == 0 {
            anyhow::bail!("VISION_MAX_RESULTS must be at least 1");
        }
        if self.image_extension.trim_start_matches('.').is_empty() {
            anyhow::bail!("IMAGE_EXTENSION must not be empty");
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            anyhow::bail!("ANNOTATOR_FONT_SIZE must be positive, got {}", self.font_size);
        }
        Ok(())
    }

    /// API key wins over an access token.
    pub fn vision_auth(&self) -> Option<VisionAuth> {
        self.vision_api_key
            .clone()
            .map(VisionAuth::ApiKey)
            .or_else(|| self.vision_access_token.clone().map(VisionAuth::BearerToken))
    }

    pub fn annotator_config(&self) -> AnnotatorConfig {
        let base = match self.annotator_style {
            AnnotatorStyle::Palette => AnnotatorConfig::cat_dog(),
            AnnotatorStyle::Mono => AnnotatorConfig::mono(ACCEPTED_LABELS),
        };
        let font = match &self.font_path {
            Some(path) => FontSource::TrueType(path.clone()),
            None => FontSource::Builtin,
        };
        base.with_font(font, self.font_size)
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
