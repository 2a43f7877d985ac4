//! Gesture state and the pure reducer that folds gesture events into it.
//!
//! Pointer handling is deliberately free of any UI toolkit: the host feeds
//! [`GestureEvent`] values in delivery order and the reducer returns the
//! next state, which makes every gesture sequence unit-testable without
//! simulating real touch input.

use crate::ScaleBounds;

/// Pan deltas are divided by this before accumulating, making panning
/// deliberately slower than raw finger travel. Behavioral parity constant.
const PAN_DAMPING: f32 = 10.0;

/// Pinch factors are divided by this to produce a scale step per update.
const SCALE_STEP_DIVISOR: f32 = 6.0;

/// Which gesture is currently in progress.
///
/// Panning and scaling are mutually exclusive: while a scale gesture is
/// active, pan deltas are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum GesturePhase {
    #[default]
    Idle,
    Panning,
    Scaling,
}

/// A single gesture input, as delivered by the host's input source.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GestureEvent {
    /// A pointer went down outside of a scale gesture.
    PanStart,
    /// Pointer movement in view pixels since the last event.
    PanDelta { dx: f32, dy: f32 },
    /// The panning pointer lifted.
    PanEnd,
    /// A second pointer started a pinch.
    ScaleBegin,
    /// A pinch update with the detector's scale factor (>1 zooms in).
    ScaleStep { factor: f32 },
    /// The pinch ended.
    ScaleEnd,
}

/// The live pan/zoom transform of the source image.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    /// Uniform zoom factor applied to the source image.
    pub scale: f32,
    /// Accumulated horizontal pan, unclamped until render time.
    pub pan_x: f32,
    /// Accumulated vertical pan, unclamped until render time.
    pub pan_y: f32,
    /// Current gesture phase.
    pub phase: GesturePhase,
}

impl TransformState {
    /// State with the given initial scale and no pan.
    pub fn at_scale(scale: f32) -> Self {
        Self {
            scale,
            pan_x: 0.0,
            pan_y: 0.0,
            phase: GesturePhase::Idle,
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::at_scale(1.0)
    }
}

/// Fold one gesture event into the transform state.
///
/// - Pan deltas accumulate damped (`delta / 10`) and are *not* clamped
///   here: the clamp bounds depend on the scaled-bitmap size, which is only
///   known at render time (see `compute_render_frame`).
/// - Scale steps add or subtract `factor / 6` depending on pinch direction
///   and clamp into `bounds` immediately, so the scale invariant holds
///   after every event.
/// - A scale gesture in progress suppresses pan updates.
pub fn reduce(state: TransformState, bounds: ScaleBounds, event: GestureEvent) -> TransformState {
    let mut next = state;
    match event {
        GestureEvent::PanStart => {
            if next.phase != GesturePhase::Scaling {
                next.phase = GesturePhase::Panning;
            }
        }
        GestureEvent::PanDelta { dx, dy } => {
            if next.phase != GesturePhase::Scaling {
                next.pan_x += dx / PAN_DAMPING;
                next.pan_y += dy / PAN_DAMPING;
            }
        }
        GestureEvent::PanEnd => {
            if next.phase == GesturePhase::Panning {
                next.phase = GesturePhase::Idle;
            }
        }
        GestureEvent::ScaleBegin => {
            next.phase = GesturePhase::Scaling;
        }
        GestureEvent::ScaleStep { factor } => {
            if factor > 1.0 {
                next.scale += factor / SCALE_STEP_DIVISOR;
            } else {
                next.scale -= factor / SCALE_STEP_DIVISOR;
            }
            next.scale = bounds.clamp(next.scale);
        }
        GestureEvent::ScaleEnd => {
            next.phase = GesturePhase::Idle;
        }
    }
    next
}


// ============================================================================
// Property-Based Tests
// ============================================================================
