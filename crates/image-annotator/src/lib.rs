//! # image-annotator
//!
//! Sends a photo to an [`vision_client::ObjectLocalizer`], keeps the objects whose label is in the
//! configured set, and draws an outline plus a `"<name> <score>"` caption for each of them.
//!
//! [`Annotator::annotate`] works on bytes only; [`Annotator::detect`] rewrites a file in place.

mod annotator;
mod config;
mod font;
mod geometry;

pub use annotator::{caption, format_score, round_score, Annotation, AnnotateError, Annotator, Detection};
pub use config::{AnnotatorConfig, FontSource, LabelStyle, DEFAULT_FONT_SIZE};
pub use geometry::{GeometryError, PixelRect};
