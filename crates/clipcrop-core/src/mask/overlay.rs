//! The dimmed overlay mask.
//!
//! A pure function of the view size and the clip configuration: fill the
//! whole surface with the mask color, then erase a hole matching the clip
//! shape (a destination-out composite), leaving the image visible through
//! it. No gesture state is involved; the host recomputes the overlay on
//! every invalidation.

use super::stencil::ShapeStencil;
use crate::buffer::PixelBuffer;
use crate::transform::Viewport;
use crate::ClipConfig;

/// Render the overlay mask surface.
///
/// The result is an RGBA buffer of the viewport's size: the mask color
/// everywhere, with its alpha erased inside the centered clip-shape hole
/// (`alpha * (1 - coverage)` per pixel, the destination-out rule).
pub fn render_overlay(viewport: Viewport, config: &ClipConfig) -> PixelBuffer {
    let stencil = ShapeStencil::centered(
        config.shape,
        viewport.width,
        viewport.height,
        config.clip_width,
        config.clip_height,
        config.round_radius,
    );
    let color = config.mask_color;

    let mut pixels = Vec::with_capacity((viewport.width as usize) * (viewport.height as usize) * 4);
    for py in 0..viewport.height {
        for px in 0..viewport.width {
            // Sample at the pixel center
            let coverage = stencil.coverage(px as f32 + 0.5, py as f32 + 0.5);
            let alpha = (color.a as f32 * (1.0 - coverage)).round() as u8;
            pixels.extend_from_slice(&[color.r, color.g, color.b, alpha]);
        }
    }

    PixelBuffer::new(viewport.width, viewport.height, pixels)
}
