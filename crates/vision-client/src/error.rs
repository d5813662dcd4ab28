use thiserror::Error;

/// Failure of a single localization call. None of these are retried.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("vision request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vision API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("vision API rejected the image (code {code}): {message}")]
    Api { code: i32, message: String },

    #[error("cannot decode vision response: {0}")]
    Decode(String),

    #[error("invalid vision client config: {0}")]
    Config(String),
}
