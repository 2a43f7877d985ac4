//! The clip view container.
//!
//! [`ClipView`] owns the single [`ClipConfig`] and fans it out read-only to
//! the transform engine, the overlay renderer, and the shape extractor, so
//! the components can never hold diverging copies of the clip geometry. It
//! exposes the full public surface: configuration setters, image loading,
//! gesture forwarding, per-frame computation, and crop retrieval.
//!
//! # Ordering
//!
//! `compute_render_frame` must run at least once after loading before
//! `cropped_image` returns anything; that read-after-render dependency is
//! the only ordering callers must respect. Everything is single-threaded
//! and synchronous.

use crate::buffer::PixelBuffer;
use crate::error::ClipError;
use crate::extract::apply_shape;
use crate::mask::render_overlay;
use crate::source::ImageSource;
use crate::transform::{ClipEngine, GestureEvent, LoadOutcome, RenderFrame, Viewport};
use crate::{ClipConfig, ClipShape, MaskColor};

/// Interactive crop session: configuration, transform engine, and the
/// renderers composed behind one interface.
#[derive(Debug, Default)]
pub struct ClipView {
    config: ClipConfig,
    engine: ClipEngine,
}

impl ClipView {
    /// Create a view with validated configuration.
    pub fn new(config: ClipConfig) -> Result<Self, ClipError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: ClipEngine::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    // ---- configuration setters (each validates, geometry changes drop the
    // cached frame so a stale crop is never served) ----

    /// Set the clip window dimensions in pixels.
    pub fn set_clip_size(&mut self, width: u32, height: u32) -> Result<(), ClipError> {
        let mut next = self.config.clone();
        next.clip_width = width;
        next.clip_height = height;
        next.validate()?;
        self.config = next;
        self.engine.invalidate();
        Ok(())
    }

    /// Set the overlay mask color.
    pub fn set_mask_color(&mut self, color: MaskColor) {
        self.config.mask_color = color;
    }

    /// Set the maximum zoom factor.
    pub fn set_max_scale(&mut self, max: f32) -> Result<(), ClipError> {
        let mut next = self.config.clone();
        next.scale_bounds.max = max;
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Set the configured minimum zoom factor. Overwritten by the derived
    /// minimum once an image is loaded.
    pub fn set_min_scale(&mut self, min: f32) -> Result<(), ClipError> {
        let mut next = self.config.clone();
        next.scale_bounds.min = min;
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Set the clip shape.
    pub fn set_clip_shape(&mut self, shape: ClipShape) {
        self.config.shape = shape;
        self.engine.invalidate();
    }

    /// Set the corner radius used when the shape is `RoundRect`.
    pub fn set_round_radius(&mut self, radius: f32) -> Result<(), ClipError> {
        let mut next = self.config.clone();
        next.round_radius = radius;
        next.validate()?;
        self.config = next;
        self.engine.invalidate();
        Ok(())
    }

    /// Supply or update the view surface dimensions.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.engine.set_viewport(Viewport::new(width, height), &self.config);
    }

    // ---- image loading ----

    /// Decode and load an image source.
    ///
    /// Follows the configured [`crate::LoadPolicy`] when an image is
    /// already held. A decode failure leaves all prior state untouched.
    pub fn load_image(&mut self, source: ImageSource) -> Result<LoadOutcome, ClipError> {
        let buffer = source.decode()?;
        self.engine.load_image(buffer, &self.config)
    }

    // ---- gesture forwarding ----

    /// A pointer went down outside of a pinch.
    pub fn on_pan_start(&mut self) {
        self.engine.apply_gesture(GestureEvent::PanStart, &self.config);
    }

    /// Pointer movement in view pixels. Ignored while a pinch is active.
    pub fn on_pan_delta(&mut self, dx: f32, dy: f32) {
        self.engine
            .apply_gesture(GestureEvent::PanDelta { dx, dy }, &self.config);
    }

    /// The panning pointer lifted.
    pub fn on_pan_end(&mut self) {
        self.engine.apply_gesture(GestureEvent::PanEnd, &self.config);
    }

    /// A pinch started; pan deltas are suppressed until it ends.
    pub fn on_scale_begin(&mut self) {
        self.engine.apply_gesture(GestureEvent::ScaleBegin, &self.config);
    }

    /// A pinch update with the detector's scale factor.
    pub fn on_scale_factor(&mut self, factor: f32) {
        self.engine
            .apply_gesture(GestureEvent::ScaleStep { factor }, &self.config);
    }

    /// The pinch ended.
    pub fn on_scale_end(&mut self) {
        self.engine.apply_gesture(GestureEvent::ScaleEnd, &self.config);
    }

    // ---- rendering and retrieval ----

    /// Compute the frame for the current transform, caching the clip-window
    /// crop. Call once per draw, before blitting the scaled image at the
    /// frame's draw position.
    pub fn compute_render_frame(&mut self) -> Result<RenderFrame, ClipError> {
        self.engine.render(&self.config)
    }

    /// Render the dimmed overlay for the current viewport and shape.
    ///
    /// Independent of the gesture state; only the viewport and the clip
    /// configuration matter.
    pub fn render_overlay(&self) -> Result<PixelBuffer, ClipError> {
        let viewport = self.engine.viewport().ok_or(ClipError::ViewportNotSet)?;
        Ok(render_overlay(viewport, &self.config))
    }

    /// The loaded source image, if any.
    pub fn original_image(&self) -> Option<&PixelBuffer> {
        self.engine.original()
    }

    /// The cropped image in the configured shape.
    ///
    /// `None` until an image has been loaded and rendered at least once.
    /// Without intervening gestures or renders, repeated calls return
    /// pixel-identical buffers.
    pub fn cropped_image(&self) -> Option<PixelBuffer> {
        let crop = self.engine.raw_crop()?;
        Some(apply_shape(crop, self.config.shape, self.config.round_radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadPolicy, ScaleBounds};

    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    fn view_with(config: ClipConfig, image: PixelBuffer) -> ClipView {
        let mut view = ClipView::new(config).unwrap();
        view.set_viewport(1000, 1000);
        view.load_image(ImageSource::Buffer(image)).unwrap();
        view
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ClipConfig::default();
        config.scale_bounds = ScaleBounds::new(5.0, 1.0);
        assert!(ClipView::new(config).is_err());
    }

    #[test]
    fn test_setters_validate() {
        let mut view = ClipView::new(ClipConfig::default()).unwrap();
        assert!(view.set_clip_size(0, 100).is_err());
        assert!(view.set_max_scale(0.1).is_err()); // below min 0.65
        assert!(view.set_round_radius(-3.0).is_err());
        // Failed setters leave the config untouched
        assert_eq!(view.config().clip_width, 702);
        assert_eq!(view.config().scale_bounds.max, 3.0);

        assert!(view.set_clip_size(400, 300).is_ok());
        assert_eq!(view.config().clip_width, 400);
    }

    #[test]
    fn test_cropped_image_none_before_render() {
        let view = view_with(ClipConfig::default(), test_image(1000, 1000));
        assert!(view.cropped_image().is_none());
    }

    #[test]
    fn test_cropped_image_idempotent() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 2000));
        view.compute_render_frame().unwrap();

        let a = view.cropped_image().unwrap();
        let b = view.cropped_image().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rect_round_trip_matches_raw_crop() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 2000));
        let frame = view.compute_render_frame().unwrap();

        let cropped = view.cropped_image().unwrap();
        let source = view.original_image().unwrap();
        // Rect shape: raw rectangular pixels, no alpha modification
        assert_eq!(cropped.width, 702);
        assert_eq!(cropped.height, 702);
        assert_eq!(
            cropped.pixel(0, 0),
            source.pixel(frame.crop.x, frame.crop.y)
        );
        assert_eq!(
            cropped.pixel(701, 701),
            source.pixel(frame.crop.x + 701, frame.crop.y + 701)
        );
        assert!(cropped.pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_no_gesture_circle_scenario() {
        // Clip 702x702, source 1000x2000, no gesture: centered crop; the
        // circle output is 702x702 with transparent corners and an opaque
        // center matching the source.
        let mut config = ClipConfig::default();
        config.shape = ClipShape::Circle;
        let mut view = view_with(config, test_image(1000, 2000));

        let frame = view.compute_render_frame().unwrap();
        assert_eq!(frame.crop.x, 149);
        assert_eq!(frame.crop.y, 649);

        let cropped = view.cropped_image().unwrap();
        assert_eq!(cropped.width, 702);
        assert_eq!(cropped.height, 702);
        for (x, y) in [(0, 0), (701, 0), (0, 701), (701, 701)] {
            assert_eq!(cropped.pixel(x, y)[3], 0, "corner ({x}, {y})");
        }
        let center = cropped.pixel(351, 351);
        let source = view.original_image().unwrap();
        assert_eq!(center, source.pixel(149 + 351, 649 + 351));
        assert_eq!(center[3], 255);
    }

    #[test]
    fn test_shape_change_invalidates_cached_crop() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 1000));
        view.compute_render_frame().unwrap();
        assert!(view.cropped_image().is_some());

        view.set_clip_shape(ClipShape::Circle);
        // The cached rect crop would not match the new shape's geometry;
        // a fresh render is required.
        assert!(view.cropped_image().is_none());
        view.compute_render_frame().unwrap();
        let cropped = view.cropped_image().unwrap();
        assert_eq!(cropped.pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_overlay_requires_viewport() {
        let view = ClipView::new(ClipConfig::default()).unwrap();
        assert!(matches!(
            view.render_overlay(),
            Err(ClipError::ViewportNotSet)
        ));
    }

    #[test]
    fn test_overlay_matches_viewport() {
        let mut view = ClipView::new(ClipConfig::default()).unwrap();
        view.set_viewport(900, 800);
        let overlay = view.render_overlay().unwrap();
        assert_eq!(overlay.width, 900);
        assert_eq!(overlay.height, 800);
        // Hole center transparent, far corner dimmed
        assert_eq!(overlay.pixel(450, 400)[3], 0);
        assert_eq!(overlay.pixel(0, 0)[3], 0x8F);
    }

    #[test]
    fn test_gesture_flow_through_view() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 1000));

        view.on_scale_begin();
        view.on_pan_delta(500.0, 500.0); // suppressed by the pinch
        view.on_scale_factor(1.5);
        view.on_scale_end();
        view.on_pan_start();
        view.on_pan_delta(100.0, 0.0);
        view.on_pan_end();

        let frame = view.compute_render_frame().unwrap();
        assert_eq!(frame.scaled_width, 1250);
        assert_eq!(frame.pan_x, 10.0);
        assert_eq!(frame.pan_y, 0.0);
    }

    #[test]
    fn test_keep_first_policy_through_view() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 1000));
        let outcome = view
            .load_image(ImageSource::Buffer(test_image(800, 800)))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::KeptExisting);
        assert_eq!(view.original_image().unwrap().width, 1000);

        // Opting into replacement is explicit configuration
        let mut config = ClipConfig::default();
        config.load_policy = LoadPolicy::Replace;
        let mut view = view_with(config, test_image(1000, 1000));
        let outcome = view
            .load_image(ImageSource::Buffer(test_image(800, 800)))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Replaced);
        assert_eq!(view.original_image().unwrap().width, 800);
    }

    #[test]
    fn test_failed_load_keeps_prior_state() {
        let mut view = view_with(ClipConfig::default(), test_image(1000, 1000));
        let result = view.load_image(ImageSource::Bytes(vec![1, 2, 3]));
        assert!(result.is_err());
        assert_eq!(view.original_image().unwrap().width, 1000);
    }
}
