//! Google Cloud Vision `images:annotate` client restricted to OBJECT_LOCALIZATION.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::error::VisionError;
use crate::types::{
    AnnotateImageRequest, AnnotateRequest, AnnotateResponse, Feature, ImageContent,
    LocalizedObject,
};
use crate::ObjectLocalizer;

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
const ANNOTATE_PATH: &str = "/v1/images:annotate";
const FEATURE_OBJECT_LOCALIZATION: &str = "OBJECT_LOCALIZATION";

/// How requests are authorized.
#[derive(Clone)]
pub enum VisionAuth {
    /// API key sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth2 access token sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl VisionAuth {
    fn masked(&self) -> String {
        match self {
            VisionAuth::ApiKey(k) => format!("key {}", mask_token(k)),
            VisionAuth::BearerToken(t) => format!("bearer {}", mask_token(t)),
        }
    }
}

impl std::fmt::Debug for VisionAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Masks a secret for logs: first 7 + `***` + last 4 characters; 11 characters or fewer become `***`.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Object localization over HTTPS.
#[derive(Debug, Clone)]
pub struct GoogleVisionClient {
    client: Client,
    endpoint: String,
    auth: VisionAuth,
    max_results: u32,
}

impl GoogleVisionClient {
    /// Creates a client against the public endpoint.
    pub fn new(auth: VisionAuth) -> Result<Self, VisionError> {
        Self::with_endpoint(auth, DEFAULT_ENDPOINT)
    }

    /// Creates a client against another endpoint (scheme + host, no path), e.g. a mock server.
    pub fn with_endpoint(auth: VisionAuth, endpoint: &str) -> Result<Self, VisionError> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| VisionError::Config(format!("endpoint {}: {}", endpoint, e)))?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            auth,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Upper bound on objects returned per image.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn annotate_url(&self) -> String {
        format!("{}{}", self.endpoint, ANNOTATE_PATH)
    }
}

#[async_trait]
impl ObjectLocalizer for GoogleVisionClient {
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    async fn localize_objects(&self, image: &[u8]) -> Result<Vec<LocalizedObject>, VisionError> {
        info!(
            endpoint = %self.endpoint,
            auth = %self.auth.masked(),
            max_results = self.max_results,
            "step: vision object localization request"
        );

        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: FEATURE_OBJECT_LOCALIZATION,
                    max_results: self.max_results,
                }],
            }],
        };

        let builder = self.client.post(self.annotate_url()).json(&request);
        let builder = match &self.auth {
            VisionAuth::ApiKey(key) => builder.query(&[("key", key.as_str())]),
            VisionAuth::BearerToken(token) => builder.bearer_auth(token),
        };
        let response = builder.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnnotateResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::Decode(e.to_string()))?;
        let Some(first) = parsed.responses.into_iter().next() else {
            debug!("Vision response contained no per-image result");
            return Ok(Vec::new());
        };
        if let Some(err) = first.error {
            return Err(VisionError::Api {
                code: err.code,
                message: err.message,
            });
        }

        let objects = first.localized_object_annotations;
        info!(
            count = objects.len(),
            "step: vision object localization done"
        );
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("AIzaShort"), "***");
        assert_eq!(mask_token("AIzaSyD-abcdefghijklmnop"), "AIzaSyD***mnop");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let auth = VisionAuth::ApiKey("AIzaSyD-abcdefghijklmnop".to_string());
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("abcdefghijkl"));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = GoogleVisionClient::with_endpoint(
            VisionAuth::ApiKey("k".to_string()),
            "http://127.0.0.1:1234/",
        )
        .unwrap();
        assert_eq!(client.annotate_url(), "http://127.0.0.1:1234/v1/images:annotate");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result =
            GoogleVisionClient::with_endpoint(VisionAuth::ApiKey("k".to_string()), "not a url");
        assert!(matches!(result, Err(VisionError::Config(_))));
    }
}
