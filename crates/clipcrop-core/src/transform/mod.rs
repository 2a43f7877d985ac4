//! The transform engine: gesture state, render-frame geometry, and the
//! stateful engine that ties them to a loaded image.
//!
//! # Pipeline
//!
//! 1. Gesture events fold into [`TransformState`] through the pure
//!    [`reduce`] function (pan damping, scale stepping, phase tracking).
//! 2. [`compute_render_frame`] turns the state plus the viewport and clip
//!    geometry into an immutable [`RenderFrame`]: clamped pan, draw
//!    position, and the crop rectangle in scaled-bitmap space.
//! 3. [`ClipEngine`] owns the source image and the state, runs the frame
//!    computation per draw, and caches the clip-window crop for extraction.
//!
//! # Coordinate System
//!
//! - The viewport origin is the top-left corner, y grows downward.
//! - Pan offsets are relative to the centered position of the scaled image.
//! - The crop rectangle is expressed in scaled-bitmap pixels: crop quality
//!   is bounded by the current zoom level, not the source resolution.

mod engine;
mod frame;
mod state;

pub use engine::{ClipEngine, LoadOutcome};
pub use frame::{compute_render_frame, CropRegion, RenderFrame, Viewport};
pub use state::{reduce, GestureEvent, GesturePhase, TransformState};
