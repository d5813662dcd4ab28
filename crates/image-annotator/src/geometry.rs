//! Normalized polygon → pixel rectangle.

use thiserror::Error;
use vision_client::NormalizedVertex;

#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("expected 4 polygon vertices, got {0}")]
    VertexCount(usize),

    #[error("polygon vertex is not a finite number")]
    NonFinite,
}

/// Axis-aligned rectangle in absolute pixels; both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Scales a 4-vertex normalized polygon to `width` x `height` pixels.
    ///
    /// The corners are the min and max over all four vertices, which equals the vertex[0]/vertex[2]
    /// pair for the usual clockwise-from-top-left order and stays correct for any other winding.
    pub fn from_normalized(
        vertices: &[NormalizedVertex],
        width: u32,
        height: u32,
    ) -> Result<Self, GeometryError> {
        if vertices.len() != 4 {
            return Err(GeometryError::VertexCount(vertices.len()));
        }
        if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(GeometryError::NonFinite);
        }

        let to_px = |v: f32, size: u32| (v * size as f32).round() as i32;
        let xs = vertices.iter().map(|v| to_px(v.x, width));
        let ys = vertices.iter().map(|v| to_px(v.y, height));

        Ok(Self {
            left: xs.clone().min().unwrap_or(0),
            right: xs.max().unwrap_or(0),
            top: ys.clone().min().unwrap_or(0),
            bottom: ys.max().unwrap_or(0),
        })
    }

    /// Clips the rectangle to an image of the given size. `None` if nothing of it is visible.
    pub fn clamped(&self, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let (max_x, max_y) = (width as i32 - 1, height as i32 - 1);
        if self.right < 0 || self.bottom < 0 || self.left > max_x || self.top > max_y {
            return None;
        }
        Some(Self {
            left: self.left.clamp(0, max_x),
            top: self.top.clamp(0, max_y),
            right: self.right.clamp(0, max_x),
            bottom: self.bottom.clamp(0, max_y),
        })
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left + 1).max(1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top + 1).max(1) as u32
    }
}
