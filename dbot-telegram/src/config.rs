//! Minimal framework config: bot token (read from a single-line credentials file) and optional API URL.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The token could not be obtained from the credentials file.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("cannot read credentials file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("token in {path} is invalid: first line is empty")]
    Empty { path: PathBuf },
}

/// Minimal Telegram bot config (connectivity only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Reads the token from the first line of `path` (surrounding whitespace trimmed).
    pub fn from_credentials_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let bot_token = read_token(path.as_ref())?;
        Ok(Self::with_token(bot_token))
    }

    /// Builds config with the given token; no API URL override.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Points the bot at another Bot API server (e.g. a local mock).
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        self.telegram_api_url = url;
        self
    }

    /// Builds the teloxide Bot; fails if the API URL override is not a valid URL.
    pub fn build_bot(&self) -> anyhow::Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url).map_err(|e| {
                    anyhow::anyhow!("TELEGRAM_API_URL is not a valid URL ({}): {}", url, e)
                })?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

fn read_token(path: &Path) -> Result<String, CredentialsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CredentialsError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let token = contents.lines().next().unwrap_or("").trim();
    if token.is_empty() {
        return Err(CredentialsError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn credentials_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
    }

    /// **Test: only the first line is used and it is trimmed.**
    #[test]
    fn test_reads_first_line() {
        let file = credentials_file("123:abc \nsecond line\n");
        let config = TelegramConfig::from_credentials_file(file.path()).unwrap();
        assert_eq!(config.bot_token, "123:abc");
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let file = credentials_file("");
        let err = TelegramConfig::from_credentials_file(file.path()).unwrap_err();
        assert!(matches!(err, CredentialsError::Empty { .. }));
    }

    #[test]
    fn test_blank_first_line_is_rejected() {
        let file = credentials_file("   \n123:abc\n");
        let err = TelegramConfig::from_credentials_file(file.path()).unwrap_err();
        assert!(matches!(err, CredentialsError::Empty { .. }));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = TelegramConfig::from_credentials_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CredentialsError::Unreadable { .. }));
    }

    #[test]
    fn test_build_bot_rejects_invalid_api_url() {
        let config = TelegramConfig::with_token("t".to_string())
            .with_api_url(Some("not-a-valid-url".to_string()));
        assert!(config.build_bot().is_err());

        let config = TelegramConfig::with_token("t".to_string())
            .with_api_url(Some("http://127.0.0.1:8081".to_string()));
        assert!(config.build_bot().is_ok());
    }
}
