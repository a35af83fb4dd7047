//! Glyph bounding boxes, overlap and wall bounce
//!
//! Positions are glyph anchors in screen space: `x` is the left edge of the
//! text and `y` its baseline, with y growing downward. A glyph therefore
//! covers `[x, x + width)` horizontally and `(y - ascent, y]` vertically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kind::Kind;

/// Measured extent of a glyph relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Advance width
    pub width: f32,
    /// Distance from baseline to the top of the glyph
    pub ascent: f32,
    /// Distance from baseline to the bottom of the glyph
    pub descent: f32,
    /// Distance the glyph extends left of its anchor
    pub left: f32,
}

impl BoundingBox {
    pub fn new(width: f32, ascent: f32, descent: f32, left: f32) -> Self {
        Self {
            width,
            ascent,
            descent,
            left,
        }
    }

    /// True if `point` (another glyph's anchor) lies inside this box placed at `anchor`
    #[inline]
    pub fn contains(&self, anchor: Vec2, point: Vec2) -> bool {
        point.x >= anchor.x
            && point.x < anchor.x + self.width
            && point.y <= anchor.y
            && point.y > anchor.y - self.ascent
    }
}

/// Source of glyph bounding boxes.
///
/// Renderers measure their font once at setup and hand the result to the
/// simulation through this trait.
pub trait GlyphMetrics {
    fn measure(&self, kind: Kind) -> BoundingBox;
}

/// Metrics derived from a font pixel size, for running without a display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedMetrics {
    pub font_px: f32,
}

impl FixedMetrics {
    pub fn new(font_px: f32) -> Self {
        Self { font_px }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_FONT_PX)
    }
}

impl GlyphMetrics for FixedMetrics {
    fn measure(&self, _kind: Kind) -> BoundingBox {
        // Emoji in a serif face: square advance, most of the box above baseline
        let px = self.font_px.max(0.0);
        BoundingBox::new(px, px * 0.86, px * 0.14, 0.0)
    }
}

/// The drawing surface tokens bounce around in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface with no usable area
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Does the winner's anchor fall inside the loser's box?
#[inline]
pub fn overlaps(winner: Vec2, loser: Vec2, loser_box: &BoundingBox) -> bool {
    loser_box.contains(loser, winner)
}

/// Reflect velocity off the surface edges.
///
/// An axis flips only while the glyph is past an edge and still heading
/// outward, so a token that overshoots is turned back once instead of
/// flipping every tick.
pub fn bounce(pos: Vec2, vel: Vec2, bbox: &BoundingBox, surface: &Surface) -> Vec2 {
    let mut vel = vel;

    if (pos.x + bbox.width > surface.width && vel.x > 0.0) || (pos.x < 0.0 && vel.x < 0.0) {
        vel.x = -vel.x;
    }
    if (pos.y > surface.height && vel.y > 0.0) || (pos.y < bbox.ascent && vel.y < 0.0) {
        vel.y = -vel.y;
    }

    vel
}
