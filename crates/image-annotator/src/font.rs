//! Caption rendering through ab_glyph: the embedded DejaVu Sans or a TrueType file.

use ab_glyph::{FontArc, PxScale};
use image::{Pixel, Rgb, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::config::FontSource;

static BUILTIN_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Font ready to draw captions at a fixed pixel height; built once per annotator.
pub struct CaptionFont {
    font: FontArc,
    scale: PxScale,
}

impl CaptionFont {
    /// Loads the configured font. TrueType files are read and parsed here so a bad path fails early.
    pub fn load(source: &FontSource, size: f32) -> Result<Self, String> {
        let font = match source {
            FontSource::Builtin => FontArc::try_from_slice(BUILTIN_FONT).map_err(|e| e.to_string())?,
            FontSource::TrueType(path) => {
                let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
                FontArc::try_from_vec(bytes).map_err(|e| e.to_string())?
            }
        };
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Draws `text` with its top-left corner at (`x`, `y`); pixels outside the image are skipped.
    pub fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, color: Rgb<u8>, text: &str) {
        draw_text_mut(image, color.to_rgba(), x, y, self.scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn inked(image: &RgbaImage, background: Rgba<u8>) -> usize {
        image.pixels().filter(|p| **p != background).count()
    }

    #[test]
    fn test_builtin_font_uses_requested_size() {
        let font = CaptionFont::load(&FontSource::Builtin, 18.0).unwrap();
        assert_eq!(font.scale(), PxScale::from(18.0));
    }

    #[test]
    fn test_missing_truetype_file_fails() {
        let source = FontSource::TrueType("/definitely/not/here/open_sans.ttf".into());
        assert!(CaptionFont::load(&source, 18.0).is_err());
    }

    #[test]
    fn test_invalid_truetype_bytes_fail() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a font").unwrap();
        let source = FontSource::TrueType(file.path().to_path_buf());
        assert!(CaptionFont::load(&source, 18.0).is_err());
    }

    /// **Test: the embedded font inks the caption area; a blank caption inks nothing.**
    #[test]
    fn test_builtin_font_draws_caption() {
        let font = CaptionFont::load(&FontSource::Builtin, 18.0).unwrap();
        let background = Rgba([0, 0, 0, 255]);

        let mut image = RgbaImage::from_pixel(120, 30, background);
        font.draw(&mut image, 0, 0, Rgb([255, 255, 255]), "Cat 0.912");
        assert!(inked(&image, background) > 0);

        let mut blank = RgbaImage::from_pixel(120, 30, background);
        font.draw(&mut blank, 0, 0, Rgb([255, 255, 255]), "   ");
        assert_eq!(inked(&blank, background), 0);
    }

    /// **Test: text running off the image edge is clipped instead of panicking.**
    #[test]
    fn test_draw_clips_at_edges() {
        let font = CaptionFont::load(&FontSource::Builtin, 24.0).unwrap();
        let mut image = RgbaImage::new(8, 8);
        font.draw(&mut image, -4, 5, Rgb([1, 2, 3]), "Dog 0.5");
        font.draw(&mut image, 100, 100, Rgb([1, 2, 3]), "x");
    }
}
