//! Photo handler: stage the upload, run the annotator, send back the picture and one line per detection.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, PhotoRef, Result};
use image_annotator::{Annotator, Detection};
use tracing::{error, info, instrument, warn};

use crate::staging::ImageStaging;

const MSG_GOT_IMAGE: &str = "Got image";
const MSG_STAGING_FAILED: &str = "Sorry, I could not store your photo. Please try again later.";
const MSG_DOWNLOAD_FAILED: &str = "Sorry, I could not download your photo. Please send it again.";
const MSG_DETECTION_FAILED: &str =
    "Sorry, detection failed for this photo. Please try again later.";
const MSG_SEND_FAILED: &str = "Sorry, I could not send the annotated photo back.";

/// Runs object detection on every photo message and stops the chain once it has replied.
#[derive(Clone)]
pub struct PhotoDetectionHandler {
    bot: Arc<dyn CoreBot>,
    annotator: Arc<Annotator>,
    staging: ImageStaging,
}

impl PhotoDetectionHandler {
    pub fn new(bot: Arc<dyn CoreBot>, annotator: Arc<Annotator>, staging: ImageStaging) -> Self {
        Self {
            bot,
            annotator,
            staging,
        }
    }

    /// Text sent for one detection, e.g. `Cat confidence: 0.91`.
    pub fn detection_line(detection: &Detection) -> String {
        format!("{} confidence: {}", detection.label, detection.score)
    }

    async fn process_photo(&self, message: &Message, photo: &PhotoRef) -> Result<HandlerResponse> {
        // Dropping `staged` removes the file, whichever way this function returns.
        let staged = match self.staging.stage().await {
            Ok(staged) => staged,
            Err(e) => {
                error!(error = %e, dir = %self.staging.dir().display(), "Failed to stage photo");
                return self.send_fallback_and_stop(message, MSG_STAGING_FAILED).await;
            }
        };
        let path = staged.path();

        if let Err(e) = self.bot.download_file(&photo.file_id, path).await {
            error!(error = %e, file_id = %photo.file_id, "Failed to download photo");
            return self.send_fallback_and_stop(message, MSG_DOWNLOAD_FAILED).await;
        }
        info!(
            user_id = message.user.id,
            first_name = %message.user.first_name.as_deref().unwrap_or(""),
            path = %path.display(),
            "step: photo downloaded"
        );

        if let Err(e) = self.bot.reply_to(message, MSG_GOT_IMAGE).await {
            warn!(error = %e, "Failed to acknowledge photo");
        }

        let detections = match self.annotator.detect(path).await {
            Ok(detections) => detections,
            Err(e) => {
                error!(error = %e, path = %path.display(), "Detection failed");
                return self.send_fallback_and_stop(message, MSG_DETECTION_FAILED).await;
            }
        };
        info!(count = detections.len(), "step: detection done");

        if let Err(e) = self.bot.send_photo(&message.chat, path, None).await {
            error!(error = %e, "Failed to send photo");
            return self.send_fallback_and_stop(message, MSG_SEND_FAILED).await;
        }

        for detection in &detections {
            if let Err(e) = self
                .bot
                .reply_to(message, &Self::detection_line(detection))
                .await
            {
                error!(error = %e, label = %detection.label, "Failed to send detection");
            }
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            detections = detections.len(),
            "Photo processed"
        );
        Ok(HandlerResponse::Stop)
    }

    async fn send_fallback_and_stop(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, "Failed to send failure reply");
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for PhotoDetectionHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(photo) = &message.photo else {
            return Ok(HandlerResponse::Continue);
        };
        info!(
            user_id = message.user.id,
            file_id = %photo.file_id,
            width = photo.width,
            height = photo.height,
            "Processing photo"
        );
        self.process_photo(message, photo).await
    }
}
