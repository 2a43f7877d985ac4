//! Shape extraction: turn the rectangular clip-window crop into the final
//! output buffer.
//!
//! A rect crop passes through unchanged. Circle and rounded-rect crops are
//! composited source-in against a stencil covering the buffer: crop pixels
//! survive only where the stencil is opaque, so corners outside the shape
//! become transparent while the buffer keeps its pixel dimensions.

use crate::buffer::PixelBuffer;
use crate::mask::ShapeStencil;
use crate::ClipShape;

/// Apply the configured clip shape to a rectangular crop.
///
/// The circle stencil has diameter `min(width, height)` and is centered on
/// the crop buffer; the rounded-rect stencil spans the full buffer with the
/// given corner radius. Output dimensions always equal the input's.
pub fn apply_shape(crop: &PixelBuffer, shape: ClipShape, round_radius: f32) -> PixelBuffer {
    // Identity for plain rectangles: no alpha modification at all.
    if shape == ClipShape::Rect {
        return crop.clone();
    }

    let stencil = ShapeStencil::covering(shape, crop.width, crop.height, round_radius);
    let mut output = PixelBuffer::blank(crop.width, crop.height);

    for py in 0..crop.height {
        for px in 0..crop.width {
            let coverage = stencil.coverage(px as f32 + 0.5, py as f32 + 0.5);
            if coverage <= 0.0 {
                continue; // stays transparent black
            }
            let [r, g, b, a] = crop.pixel(px, py);
            let idx = ((py as usize * crop.width as usize) + px as usize) * 4;
            output.pixels[idx] = r;
            output.pixels[idx + 1] = g;
            output.pixels[idx + 2] = b;
            output.pixels[idx + 3] = (a as f32 * coverage).round() as u8;
        }
    }

    output
}
