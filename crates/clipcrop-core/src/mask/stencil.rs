//! Per-shape coverage stencils.
//!
//! A [`ShapeStencil`] is the geometric realization of a [`ClipShape`] on a
//! concrete surface: the hole cut into the overlay, or the opaque region
//! kept by the extractor. Coverage is evaluated per pixel from the signed
//! distance to the shape edge.

use super::edge_coverage;
use crate::ClipShape;

/// A concrete shape placed on a surface, evaluated per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeStencil {
    Rect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
    RoundRect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        radius: f32,
    },
}

impl ShapeStencil {
    /// The clip-window hole, centered on a `surface_w` x `surface_h`
    /// surface.
    ///
    /// The circle is centered on the *surface* (not on the clip rectangle)
    /// with radius `min(clip_w, clip_h) / 2`, matching the overlay's
    /// upstream behavior.
    pub fn centered(
        shape: ClipShape,
        surface_w: u32,
        surface_h: u32,
        clip_w: u32,
        clip_h: u32,
        round_radius: f32,
    ) -> Self {
        let left = (surface_w as f32 - clip_w as f32) / 2.0;
        let top = (surface_h as f32 - clip_h as f32) / 2.0;
        let right = left + clip_w as f32;
        let bottom = top + clip_h as f32;
        match shape {
            ClipShape::Rect => ShapeStencil::Rect {
                left,
                top,
                right,
                bottom,
            },
            ClipShape::Circle => ShapeStencil::Circle {
                cx: surface_w as f32 / 2.0,
                cy: surface_h as f32 / 2.0,
                radius: clip_w.min(clip_h) as f32 / 2.0,
            },
            ClipShape::RoundRect => ShapeStencil::RoundRect {
                left,
                top,
                right,
                bottom,
                radius: round_radius,
            },
        }
    }

    /// The extraction stencil covering a whole `width` x `height` buffer.
    ///
    /// The circle is centered on the *buffer* with diameter
    /// `min(width, height)`; the rounded rectangle spans the full bounds.
    pub fn covering(shape: ClipShape, width: u32, height: u32, round_radius: f32) -> Self {
        Self::centered(shape, width, height, width, height, round_radius)
    }

    /// Coverage of the shape at a point, 0.0 (outside) to 1.0 (inside),
    /// with a one-pixel antialiased edge.
    pub fn coverage(&self, x: f32, y: f32) -> f32 {
        edge_coverage(self.signed_distance(x, y))
    }

    /// Signed distance to the shape edge, negative inside.
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        match *self {
            ShapeStencil::Rect {
                left,
                top,
                right,
                bottom,
            } => {
                let dx = (left - x).max(x - right);
                let dy = (top - y).max(y - bottom);
                dx.max(dy)
            }
            ShapeStencil::Circle { cx, cy, radius } => {
                let dx = x - cx;
                let dy = y - cy;
                (dx * dx + dy * dy).sqrt() - radius
            }
            ShapeStencil::RoundRect {
                left,
                top,
                right,
                bottom,
                radius,
            } => {
                let half_w = (right - left) / 2.0;
                let half_h = (bottom - top) / 2.0;
                // A radius past the half-extent degenerates; cap it.
                let radius = radius.min(half_w).min(half_h).max(0.0);
                let cx = (left + right) / 2.0;
                let cy = (top + bottom) / 2.0;
                let qx = (x - cx).abs() - (half_w - radius);
                let qy = (y - cy).abs() - (half_h - radius);
                let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
                qx.max(qy).min(0.0) + outside - radius
            }
        }
    }
}
