//! Annotator configuration: which labels are accepted, how each one is drawn, and the caption font.

use std::path::PathBuf;

use image::Rgb;

pub const DEFAULT_FONT_SIZE: f32 = 18.0;

/// Colours for one accepted label. Objects whose name matches `name` exactly are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub name: String,
    pub outline: Rgb<u8>,
    pub text: Rgb<u8>,
}

impl LabelStyle {
    /// Same colour for box and caption.
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            outline: Rgb(color),
            text: Rgb(color),
        }
    }
}

/// Where caption glyphs come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// DejaVu Sans embedded in the crate; needs no files.
    Builtin,
    /// TrueType/OpenType file loaded once when the annotator is built.
    TrueType(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatorConfig {
    pub labels: Vec<LabelStyle>,
    pub font: FontSource,
    pub font_size: f32,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::cat_dog()
    }
}

impl AnnotatorConfig {
    /// Cat / Dog / Animal, each with its own colour.
    pub fn cat_dog() -> Self {
        Self {
            labels: vec![
                LabelStyle::new("Cat", [255, 255, 255]),
                LabelStyle::new("Dog", [157, 255, 138]),
                LabelStyle::new("Animal", [255, 255, 130]),
            ],
            font: FontSource::Builtin,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// One dark-red outline and one pink caption colour for every label.
    pub fn mono(labels: &[&str]) -> Self {
        Self {
            labels: labels
                .iter()
                .map(|name| LabelStyle {
                    name: name.to_string(),
                    outline: Rgb([128, 0, 0]),
                    text: Rgb([252, 3, 78]),
                })
                .collect(),
            font: FontSource::Builtin,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn with_font(mut self, font: FontSource, font_size: f32) -> Self {
        self.font = font;
        self.font_size = font_size;
        self
    }

    /// Style for an object name, or `None` if the label is not accepted.
    pub fn style_for(&self, name: &str) -> Option<&LabelStyle> {
        self.labels.iter().find(|s| s.name == name)
    }

    pub fn accepted_labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.name.as_str())
    }

    /// Rejects an empty label set and non-positive or non-finite font sizes.
    pub fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("at least one accepted label is required".to_string());
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(format!("font size must be positive, got {}", self.font_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_dog_palette() {
        let config = AnnotatorConfig::cat_dog();
        assert_eq!(
            config.accepted_labels().collect::<Vec<_>>(),
            vec!["Cat", "Dog", "Animal"]
        );
        assert_eq!(config.style_for("Dog").unwrap().outline, Rgb([157, 255, 138]));
        assert!(config.style_for("Person").is_none());
        assert!(config.style_for("cat").is_none());
    }

    #[test]
    fn test_mono_uses_single_colours() {
        let config = AnnotatorConfig::mono(&["Cat", "Dog", "Animal"]);
        for style in &config.labels {
            assert_eq!(style.outline, Rgb([128, 0, 0]));
            assert_eq!(style.text, Rgb([252, 3, 78]));
        }
    }

    #[test]
    fn test_validate() {
        assert!(AnnotatorConfig::cat_dog().validate().is_ok());
        assert!(AnnotatorConfig::mono(&[]).validate().is_err());
        let bad = AnnotatorConfig::cat_dog().with_font(FontSource::Builtin, 0.0);
        assert!(bad.validate().is_err());
    }
}
