//! Render-frame geometry: centering, pan clamping, and crop derivation.
//!
//! The frame computation is a pure function so the geometry can be tested
//! without rasterizing anything. Pixel rasterization (scaling the source and
//! copying the crop rectangle) happens in the engine, driven by the values
//! computed here.

use super::state::TransformState;

/// Dimensions of the view surface the image is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The rectangle of scaled-image pixels currently aligned with the clip
/// window. Recomputed every frame; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable result of one render-frame computation.
///
/// `pan_x`/`pan_y` carry the clamped pan so the caller can fold it back
/// into the transform state; the clamp bounds depend on the scaled-bitmap
/// size and are only known here.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderFrame {
    /// Width of the source image after scaling.
    pub scaled_width: u32,
    /// Height of the source image after scaling.
    pub scaled_height: u32,
    /// Draw position of the scaled image in view coordinates.
    pub draw_x: f32,
    pub draw_y: f32,
    /// Pan after clamping to the edge bounds.
    pub pan_x: f32,
    pub pan_y: f32,
    /// Crop rectangle in scaled-bitmap pixel space.
    pub crop: CropRegion,
}

/// Compute the render frame for the current transform.
///
/// Geometry, with `scaled = round(image * scale)`:
///
/// - centering offset: `(view - scaled) / 2`
/// - pan clamp edges: `left_edge = (scaled_w - clip_w) / 2`,
///   `right_edge = -left_edge` (and the same vertically); the pan is first
///   capped at the upper edge, then raised to the lower edge
/// - draw position: centering offset + clamped pan
/// - crop origin: `max(0, edge - pan)`, truncated to whole pixels
///
/// The crop rectangle always has the clip window's dimensions while the
/// scaled image covers the clip window. When it does not (possible only if
/// the load-time upscale invariant was bypassed), the crop shrinks to what
/// the scaled bitmap can supply instead of reading out of bounds.
pub fn compute_render_frame(
    state: &TransformState,
    viewport: Viewport,
    clip_width: u32,
    clip_height: u32,
    image_width: u32,
    image_height: u32,
) -> RenderFrame {
    let scaled_width = ((image_width as f32 * state.scale).round() as u32).max(1);
    let scaled_height = ((image_height as f32 * state.scale).round() as u32).max(1);

    let bw = scaled_width as f32;
    let bh = scaled_height as f32;

    let left = (viewport.width as f32 - bw) / 2.0;
    let top = (viewport.height as f32 - bh) / 2.0;

    // Horizontal clamp. Upper edge first, then lower, preserving the
    // original's resolution of the degenerate scaled < clip case.
    let left_edge = (bw - clip_width as f32) / 2.0;
    let right_edge = -left_edge;
    let pan_x = state.pan_x.min(left_edge).max(right_edge);

    // Vertical clamp.
    let top_edge = (bh - clip_height as f32) / 2.0;
    let bottom_edge = -top_edge;
    let pan_y = state.pan_y.min(top_edge).max(bottom_edge);

    let crop_width = clip_width.min(scaled_width);
    let crop_height = clip_height.min(scaled_height);

    let crop_x = ((left_edge - pan_x).max(0.0) as u32).min(scaled_width - crop_width);
    let crop_y = ((top_edge - pan_y).max(0.0) as u32).min(scaled_height - crop_height);

    RenderFrame {
        scaled_width,
        scaled_height,
        draw_x: left + pan_x,
        draw_y: top + pan_y,
        pan_x,
        pan_y,
        crop: CropRegion {
            x: crop_x,
            y: crop_y,
            width: crop_width,
            height: crop_height,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::state::TransformState;

    fn state(scale: f32, pan_x: f32, pan_y: f32) -> TransformState {
        TransformState {
            scale,
            pan_x,
            pan_y,
            ..TransformState::default()
        }
    }

    #[test]
    fn test_no_gesture_crop_is_centered() {
        // 1000x2000 source at scale 1.0 in a 1000x1000 view, 702x702 clip.
        let frame = compute_render_frame(
            &state(1.0, 0.0, 0.0),
            Viewport::new(1000, 1000),
            702,
            702,
            1000,
            2000,
        );

        assert_eq!(frame.scaled_width, 1000);
        assert_eq!(frame.scaled_height, 2000);
        // (1000 - 702) / 2 and (2000 - 702) / 2
        assert_eq!(frame.crop, CropRegion { x: 149, y: 649, width: 702, height: 702 });
        // Image centered in the view
        assert_eq!(frame.draw_x, 0.0);
        assert_eq!(frame.draw_y, -500.0);
    }

    #[test]
    fn test_crop_dimensions_equal_clip_window() {
        for scale in [0.8, 1.0, 1.7, 3.0] {
            let frame = compute_render_frame(
                &state(scale, 33.0, -21.0),
                Viewport::new(1080, 1920),
                702,
                500,
                1000,
                1000,
            );
            assert_eq!(frame.crop.width, 702);
            assert_eq!(frame.crop.height, 500);
        }
    }

    #[test]
    fn test_pan_clamped_to_edges() {
        // 1000x1000 image at scale 1.0, clip 702: edges at +/- 149.
        let frame = compute_render_frame(
            &state(1.0, 10_000.0, -10_000.0),
            Viewport::new(1000, 1000),
            702,
            702,
            1000,
            1000,
        );
        assert_eq!(frame.pan_x, 149.0);
        assert_eq!(frame.pan_y, -149.0);
        // Pan fully left: crop starts at 0. Pan fully up: crop at far edge.
        assert_eq!(frame.crop.x, 0);
        assert_eq!(frame.crop.y, 298);
    }

    #[test]
    fn test_crop_stays_inside_scaled_bitmap() {
        let frame = compute_render_frame(
            &state(1.0, -500.0, 500.0),
            Viewport::new(1000, 1000),
            702,
            702,
            1000,
            1000,
        );
        assert!(frame.crop.x + frame.crop.width <= frame.scaled_width);
        assert!(frame.crop.y + frame.crop.height <= frame.scaled_height);
    }

    #[test]
    fn test_fractional_edge_truncates() {
        // 703x703 scaled bitmap, clip 702: edge = 0.5, crop origin truncates
        // to 0 like the original's float-to-int cast.
        let frame = compute_render_frame(
            &state(1.0, 0.0, 0.0),
            Viewport::new(1000, 1000),
            702,
            702,
            703,
            703,
        );
        assert_eq!(frame.crop.x, 0);
        assert_eq!(frame.crop.y, 0);
    }

    #[test]
    fn test_undersized_bitmap_edge_case() {
        // Scaled image smaller than the clip window: should not panic or
        // read out of bounds; the crop shrinks to the bitmap.
        let frame = compute_render_frame(
            &state(0.5, 37.0, -99.0),
            Viewport::new(1000, 1000),
            702,
            702,
            400,
            400,
        );
        assert_eq!(frame.scaled_width, 200);
        assert_eq!(frame.crop.x, 0);
        assert_eq!(frame.crop.y, 0);
        assert_eq!(frame.crop.width, 200);
        assert_eq!(frame.crop.height, 200);
    }

    #[test]
    fn test_draw_position_includes_pan() {
        let frame = compute_render_frame(
            &state(1.0, 50.0, -30.0),
            Viewport::new(1000, 1000),
            702,
            702,
            1000,
            1000,
        );
        assert_eq!(frame.draw_x, 50.0);
        assert_eq!(frame.draw_y, -30.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
