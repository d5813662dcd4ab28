use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Pixel, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use thiserror::Error;
use tracing::{debug, info, warn};
use vision_client::{LocalizedObject, ObjectLocalizer, VisionError};

use crate::config::{AnnotatorConfig, FontSource, LabelStyle};
use crate::font::CaptionFont;
use crate::geometry::PixelRect;

/// Errors from [`Annotator`]. Every variant is surfaced to the caller.
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Detection backend error: {0}")]
    Detection(#[from] VisionError),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid annotator config: {0}")]
    Config(String),
}

/// One accepted object: its label and the backend's confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    pub score: f32,
}

/// Result of [`Annotator::annotate`]. `image` is `None` when no accepted object was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub detections: Vec<Detection>,
    pub image: Option<Vec<u8>>,
}

/// Rounds to 3 decimals, as shown in captions.
pub fn round_score(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

/// Formats a score with at least one fractional digit, so `1` reads `1.0`.
pub fn format_score(score: f32) -> String {
    let text = score.to_string();
    if text.contains('.') || !score.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Caption drawn next to a box, e.g. `Cat 0.912`.
pub fn caption(name: &str, score: f32) -> String {
    format!("{} {}", name, format_score(round_score(score)))
}

/// Runs object localization and draws labelled boxes for accepted objects.
pub struct Annotator {
    config: AnnotatorConfig,
    font: CaptionFont,
    localizer: Arc<dyn ObjectLocalizer>,
}

impl Annotator {
    /// Validates the config and loads the caption font once.
    pub fn new(
        config: AnnotatorConfig,
        localizer: Arc<dyn ObjectLocalizer>,
    ) -> Result<Self, AnnotateError> {
        config.validate().map_err(AnnotateError::Config)?;
        let font = CaptionFont::load(&config.font, config.font_size).map_err(|reason| {
            let path = match &config.font {
                FontSource::TrueType(path) => path.display().to_string(),
                FontSource::Builtin => "<builtin>".to_string(),
            };
            AnnotateError::Font { path, reason }
        })?;

        let labels: Vec<&str> = config.accepted_labels().collect();
        info!(
            labels = ?labels,
            font = ?config.font,
            font_size = config.font_size,
            "Annotator ready"
        );

        Ok(Self {
            config,
            font,
            localizer,
        })
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Detects objects in `bytes` and returns the accepted ones, plus the re-encoded image with boxes
    /// and captions when at least one was accepted. Touches no files.
    pub async fn annotate(&self, bytes: &[u8]) -> Result<Annotation, AnnotateError> {
        let objects = self.localizer.localize_objects(bytes).await?;
        let total = objects.len();

        let accepted: Vec<(&LocalizedObject, &LabelStyle)> = objects
            .iter()
            .filter_map(|obj| self.config.style_for(&obj.name).map(|style| (obj, style)))
            .collect();

        info!(total, accepted = accepted.len(), "step: objects localized");

        let detections: Vec<Detection> = accepted
            .iter()
            .map(|(obj, _)| Detection {
                label: obj.name.clone(),
                score: obj.score,
            })
            .collect();

        if accepted.is_empty() {
            return Ok(Annotation {
                detections,
                image: None,
            });
        }

        let format = image::guess_format(bytes).map_err(|e| AnnotateError::Decode(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| AnnotateError::Decode(e.to_string()))?;
        let keep_alpha = decoded.color().has_alpha();
        let mut canvas = decoded.to_rgba8();

        for (obj, style) in &accepted {
            self.draw_object(&mut canvas, obj, style);
        }

        let encoded = encode(canvas, keep_alpha, format)?;
        debug!(format = ?format, bytes = encoded.len(), "Annotated image encoded");

        Ok(Annotation {
            detections,
            image: Some(encoded),
        })
    }

    /// Annotates the file at `path` in place and returns the accepted detections.
    /// The file is left untouched when nothing accepted was found.
    pub async fn detect(&self, path: &Path) -> Result<Vec<Detection>, AnnotateError> {
        let bytes = tokio::fs::read(path).await?;
        let annotation = self.annotate(&bytes).await?;
        if let Some(image) = annotation.image {
            tokio::fs::write(path, image).await?;
            debug!(path = %path.display(), "Annotated image written");
        }
        Ok(annotation.detections)
    }

    fn draw_object(&self, canvas: &mut RgbaImage, obj: &LocalizedObject, style: &LabelStyle) {
        let (width, height) = canvas.dimensions();
        let rect = match PixelRect::from_normalized(&obj.bounding_poly.normalized_vertices, width, height)
        {
            Ok(rect) => rect,
            Err(e) => {
                warn!(label = %obj.name, error = %e, "Skipping box for invalid polygon");
                return;
            }
        };
        let Some(visible) = rect.clamped(width, height) else {
            warn!(label = %obj.name, ?rect, "Box lies outside the image");
            return;
        };

        draw_hollow_rect_mut(
            canvas,
            Rect::at(visible.left, visible.top).of_size(visible.width(), visible.height()),
            style.outline.to_rgba(),
        );
        self.font.draw(
            canvas,
            visible.left,
            visible.top,
            style.text,
            &caption(&obj.name, obj.score),
        );
    }
}

/// Drawing happens on RGBA. Sources without alpha go back out as RGB, so grayscale input
/// comes out as colour and JPEG stays encodable.
fn encode(
    canvas: RgbaImage,
    keep_alpha: bool,
    format: ImageFormat,
) -> Result<Vec<u8>, AnnotateError> {
    let image = if keep_alpha {
        DynamicImage::ImageRgba8(canvas)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
    };
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| AnnotateError::Encode(e.to_string()))?;
    Ok(buf)
}
