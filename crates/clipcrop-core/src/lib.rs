//! Clipcrop Core - pan/zoom image cropping library
//!
//! This crate provides the core logic for an interactive crop widget: the
//! host pans and pinch-zooms a source image behind a fixed clip window
//! (rectangle, circle, or rounded rectangle) overlaid by a dimmed mask, and
//! the crate extracts the pixels visible inside that window as the cropped
//! result.
//!
//! The host UI owns input delivery and rasterization to the screen; this
//! crate owns the transform math, the overlay mask, and the shaped
//! extraction.

pub mod buffer;
pub mod error;
pub mod extract;
pub mod mask;
pub mod source;
pub mod transform;
pub mod view;

pub use buffer::{FilterType, PixelBuffer};
pub use error::ClipError;
pub use extract::apply_shape;
pub use mask::render_overlay;
pub use source::ImageSource;
pub use transform::{
    reduce, ClipEngine, CropRegion, GestureEvent, GesturePhase, LoadOutcome, RenderFrame,
    TransformState, Viewport,
};
pub use view::ClipView;

/// Shape of the clip window and of the extracted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ClipShape {
    /// Plain rectangular crop.
    #[default]
    Rect,
    /// Circular crop inscribed in the clip window.
    Circle,
    /// Rectangular crop with rounded corners.
    RoundRect,
}

/// ARGB mask color for the dimmed overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaskColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MaskColor {
    /// Build from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack back into `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl Default for MaskColor {
    fn default() -> Self {
        // Semi-transparent black, the stock dimming color.
        Self::from_argb(0x8F00_0000)
    }
}

/// Zoom bounds for the transform.
///
/// `min` is re-derived when an image is loaded (the tightest zoom-out keeps
/// the image width equal to the clip width); `max` is configuration.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl ScaleBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a scale value into the bounds.
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }

    /// Check the `0 < min < max` invariant.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            min: 0.65,
            max: 3.0,
        }
    }
}

/// Policy for loading an image while another is already loaded.
///
/// The upstream behavior silently ignores a second load; `KeepFirst`
/// preserves that as the default, `Replace` makes the swap explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum LoadPolicy {
    /// Keep the already-loaded source untouched (first load wins).
    #[default]
    KeepFirst,
    /// Replace the source and reset the transform.
    Replace,
}

/// Shared configuration for the clip view.
///
/// Owned by [`ClipView`] and passed read-only to the transform engine, the
/// mask renderer, and the shape extractor, so the three components can never
/// disagree about the clip geometry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipConfig {
    /// Clip window width in pixels.
    pub clip_width: u32,
    /// Clip window height in pixels.
    pub clip_height: u32,
    /// Color of the dimmed overlay outside the clip window.
    pub mask_color: MaskColor,
    /// Zoom bounds; `min` is overwritten at image-load time.
    pub scale_bounds: ScaleBounds,
    /// Shape of the clip window hole and of the extracted crop.
    pub shape: ClipShape,
    /// Corner radius, used only when `shape` is `RoundRect`.
    pub round_radius: f32,
    /// What to do when an image is loaded over an existing one.
    pub load_policy: LoadPolicy,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            clip_width: 702,
            clip_height: 702,
            mask_color: MaskColor::default(),
            scale_bounds: ScaleBounds::default(),
            shape: ClipShape::default(),
            round_radius: 20.0,
            load_policy: LoadPolicy::default(),
        }
    }
}

impl ClipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// Rejects zero clip dimensions, inverted or non-finite scale bounds,
    /// and a negative or non-finite corner radius, so invalid values never
    /// reach the transform math where they would produce inverted clamp
    /// ranges.
    pub fn validate(&self) -> Result<(), ClipError> {
        if self.clip_width == 0 || self.clip_height == 0 {
            return Err(ClipError::InvalidConfig(format!(
                "clip window must be non-empty, got {}x{}",
                self.clip_width, self.clip_height
            )));
        }
        if !self.scale_bounds.is_valid() {
            return Err(ClipError::InvalidConfig(format!(
                "scale bounds must satisfy 0 < min < max, got min={} max={}",
                self.scale_bounds.min, self.scale_bounds.max
            )));
        }
        if !self.round_radius.is_finite() || self.round_radius < 0.0 {
            return Err(ClipError::InvalidConfig(format!(
                "round radius must be finite and non-negative, got {}",
                self.round_radius
            )));
        }
        Ok(())
    }
}
