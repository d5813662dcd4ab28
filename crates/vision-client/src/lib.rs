//! # vision-client
//!
//! Object localization against a cloud vision backend. [`ObjectLocalizer`] is the seam the annotator
//! depends on; [`GoogleVisionClient`] implements it with the Google Cloud Vision REST API.
//!
//! ```rust,no_run
//! use vision_client::{GoogleVisionClient, ObjectLocalizer, VisionAuth};
//!
//! async fn example(bytes: &[u8]) -> Result<(), vision_client::VisionError> {
//!     let client = GoogleVisionClient::new(VisionAuth::ApiKey("your-api-key".to_string()))?;
//!     for object in client.localize_objects(bytes).await? {
//!         println!("{} {}", object.name, object.score);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

mod client;
mod error;
mod types;

pub use client::{mask_token, GoogleVisionClient, VisionAuth, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS};
pub use error::VisionError;
pub use types::{BoundingPoly, LocalizedObject, NormalizedVertex};

/// Finds objects in an encoded image (JPEG/PNG bytes). Results keep the backend's order.
#[async_trait]
pub trait ObjectLocalizer: Send + Sync {
    async fn localize_objects(&self, image: &[u8]) -> Result<Vec<LocalizedObject>, VisionError>;
}
