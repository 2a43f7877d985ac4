//! Shape masking: the dimmed overlay with its shaped hole, and the
//! per-shape stencils shared with the crop extractor.
//!
//! Shapes are evaluated per pixel as signed-distance coverage with a
//! one-pixel antialiased edge, so the overlay hole and the shaped crop get
//! smooth boundaries without a rasterizer dependency.

pub mod overlay;
pub mod stencil;

pub use overlay::render_overlay;
pub use stencil::ShapeStencil;

/// Convert a signed distance to a shape edge into pixel coverage.
///
/// Negative distances are inside the shape. The ramp spans one pixel
/// centered on the edge: fully covered half a pixel inside, fully clear
/// half a pixel outside.
#[inline]
pub fn edge_coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}
