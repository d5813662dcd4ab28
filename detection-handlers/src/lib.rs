//! # Handlers for the cat/dog detection bot
//!
//! Chat-facing handlers run in a `HandlerChain`: logging, `/start` and `/help`
//! commands, photo detection and a hint for plain text. [`ImageStaging`] owns the temporary files.

mod commands;
mod logging;
mod photo;
mod staging;

#[cfg(test)]
mod test;

pub use commands::{HelpHandler, StartHandler, UploadHintHandler, HELP_TEXT};
pub use logging::LoggingHandler;
pub use photo::PhotoDetectionHandler;
pub use staging::{random_file_stem, ImageStaging, StagedImage, FILE_STEM_LEN};
