//! The stateful transform engine.
//!
//! [`ClipEngine`] owns the source image and the live transform state. It
//! consumes gesture events, runs the per-frame geometry, and caches the
//! clip-window crop so extraction can be requested at any time after a
//! successful render. Configuration is *not* owned here; the container
//! passes it read-only into every call that needs it.

use tracing::debug;

use super::frame::{compute_render_frame, RenderFrame, Viewport};
use super::state::{reduce, GestureEvent, TransformState};
use crate::buffer::{FilterType, PixelBuffer};
use crate::error::ClipError;
use crate::{ClipConfig, LoadPolicy, ScaleBounds};

/// What a load request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image was loaded into an empty engine.
    Loaded,
    /// An image was already loaded and `LoadPolicy::KeepFirst` kept it;
    /// the new image was discarded and no state changed.
    KeptExisting,
    /// An image was already loaded and `LoadPolicy::Replace` swapped it,
    /// resetting the transform.
    Replaced,
}

/// Owns the transform state and the source image for one crop session.
#[derive(Debug, Default)]
pub struct ClipEngine {
    source: Option<PixelBuffer>,
    state: TransformState,
    viewport: Option<Viewport>,
    /// Min scale derived at load time (image width == clip width).
    /// `None` until an image is loaded; the configured minimum applies.
    min_scale: Option<f32>,
    last_frame: Option<RenderFrame>,
    last_crop: Option<PixelBuffer>,
}

impl ClipEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective zoom bounds: the load-derived minimum when present,
    /// otherwise the configured one; the maximum is always configuration.
    pub fn bounds(&self, config: &ClipConfig) -> ScaleBounds {
        ScaleBounds {
            min: self.min_scale.unwrap_or(config.scale_bounds.min),
            max: config.scale_bounds.max,
        }
    }

    /// Current transform state.
    pub fn state(&self) -> TransformState {
        self.state
    }

    /// The loaded source image, if any.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    /// The view surface dimensions, if supplied.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The clip-window crop cached by the last successful render.
    pub fn raw_crop(&self) -> Option<&PixelBuffer> {
        self.last_crop.as_ref()
    }

    /// The frame produced by the last successful render.
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Drop the cached frame and crop. Called when configuration that
    /// affects the geometry changes.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
        self.last_crop = None;
    }

    /// Supply or update the view surface dimensions.
    ///
    /// When an image is loaded this re-derives the scale so the image fills
    /// the view width again, mirroring the host re-measuring its surface.
    pub fn set_viewport(&mut self, viewport: Viewport, config: &ClipConfig) {
        self.viewport = Some(viewport);
        if self.source.is_some() {
            self.fit_to_viewport(config);
            self.invalidate();
        }
    }

    /// Load a decoded image into the engine.
    ///
    /// If the image is narrower than the clip window it is upscaled
    /// uniformly until its width equals the clip width, so the clip window
    /// can always be covered. The initial scale makes the image fill the
    /// view width; the minimum scale is pinned to the tightest legal
    /// zoom-out (image width equals clip width).
    ///
    /// A second load while an image is held follows the configured
    /// [`LoadPolicy`]: `KeepFirst` discards the new image untouched,
    /// `Replace` swaps it in and resets the transform.
    pub fn load_image(
        &mut self,
        buffer: PixelBuffer,
        config: &ClipConfig,
    ) -> Result<LoadOutcome, ClipError> {
        if buffer.is_empty() {
            return Err(ClipError::EmptySource);
        }

        let outcome = if self.source.is_some() {
            match config.load_policy {
                LoadPolicy::KeepFirst => return Ok(LoadOutcome::KeptExisting),
                LoadPolicy::Replace => LoadOutcome::Replaced,
            }
        } else {
            LoadOutcome::Loaded
        };

        let buffer = if buffer.width < config.clip_width {
            let factor = config.clip_width as f32 / buffer.width as f32;
            buffer.scale_uniform(factor, FilterType::Bilinear)?
        } else {
            buffer
        };

        debug!(
            width = buffer.width,
            height = buffer.height,
            ?outcome,
            "image loaded"
        );

        self.source = Some(buffer);
        self.state = TransformState::default();
        self.fit_to_viewport(config);
        self.invalidate();
        Ok(outcome)
    }

    /// Fold one gesture event into the transform state.
    pub fn apply_gesture(&mut self, event: GestureEvent, config: &ClipConfig) {
        let bounds = self.bounds(config);
        self.state = reduce(self.state, bounds, event);
    }

    /// Compute the render frame for the current state and cache the
    /// clip-window crop for extraction.
    ///
    /// The clamped pan is folded back into the transform state so pan
    /// accumulation picks up from the rendered position. Must run at least
    /// once before a crop can be retrieved.
    pub fn render(&mut self, config: &ClipConfig) -> Result<RenderFrame, ClipError> {
        let source = self.source.as_ref().ok_or(ClipError::NoImage)?;
        let viewport = self.viewport.ok_or(ClipError::ViewportNotSet)?;

        let scaled = source.scale_uniform(self.state.scale, FilterType::Bilinear)?;
        let frame = compute_render_frame(
            &self.state,
            viewport,
            config.clip_width,
            config.clip_height,
            source.width,
            source.height,
        );
        debug_assert_eq!(scaled.width, frame.scaled_width);
        debug_assert_eq!(scaled.height, frame.scaled_height);

        self.state.pan_x = frame.pan_x;
        self.state.pan_y = frame.pan_y;

        debug!(
            crop_x = frame.crop.x,
            crop_y = frame.crop.y,
            scaled_width = frame.scaled_width,
            scaled_height = frame.scaled_height,
            "render frame"
        );

        self.last_crop = Some(scaled.crop_rect(
            frame.crop.x,
            frame.crop.y,
            frame.crop.width,
            frame.crop.height,
        ));
        self.last_frame = Some(frame);
        Ok(frame)
    }

    /// Derive scale and min scale from the viewport and the loaded image.
    fn fit_to_viewport(&mut self, config: &ClipConfig) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let min = config.clip_width as f32 / source.width as f32;
        self.min_scale = Some(min);
        self.state.scale = match self.viewport {
            Some(viewport) => viewport.width as f32 / source.width as f32,
            // No surface yet: start at the tightest zoom-out until the host
            // supplies its dimensions.
            None => min,
        };
    }
}
