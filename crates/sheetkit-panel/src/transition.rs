#![forbid(unsafe_code)]

//! Tick-driven eased height animation for the snap.
//!
//! While a drag is active the sheet height is a direct pixel value; when a
//! drag commits, [`HeightTransition`] carries the height to the snap target
//! with an eased curve. The transition is advanced by explicit
//! [`tick`](HeightTransition::tick) calls so tests stay deterministic.
//!
//! # Invariants
//!
//! 1. Progress is always in `[0.0, 1.0]`.
//! 2. `current_px` equals the target exactly once the animation completes.
//! 3. Zero-duration transitions complete instantly.
//! 4. `jump_to` never animates; it is the drag/cancel path.

use std::time::Duration;

/// Easing curve for the snap animation.
///
/// `Settle` is the sheet's signature curve: a cubic bézier with control
/// points (0.32, 0.72) and (0.0, 1.0) — fast start, long soft landing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SheetEasing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-out.
    EaseOut,
    /// Cubic S-curve.
    EaseInOut,
    /// Bézier settle curve used for the snap.
    #[default]
    Settle,
}

impl SheetEasing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Settle => cubic_bezier(0.32, 0.72, 0.0, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bézier easing at progress `x`.
///
/// Control points are `(x1, y1)` and `(x2, y2)`; the endpoints are fixed at
/// (0, 0) and (1, 1). Solves the parametric x-curve for `t` by Newton
/// iteration, falling back to bisection when the derivative flattens out.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |t: f64, a: f64, b: f64| {
        // Polynomial form of the one-dimensional bézier component.
        let inv = 1.0 - t;
        3.0 * inv * inv * t * a + 3.0 * inv * t * t * b + t * t * t
    };
    let derivative = |t: f64, a: f64, b: f64| {
        let inv = 1.0 - t;
        3.0 * inv * inv * a + 6.0 * inv * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };

    let mut t = x;
    for _ in 0..8 {
        let error = sample(t, x1, x2) - x;
        if error.abs() < 1e-7 {
            return sample(t, y1, y2);
        }
        let slope = derivative(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
        t = t.clamp(0.0, 1.0);
    }

    // Bisection fallback: x(t) is monotone for valid control points.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..32 {
        let error = sample(t, x1, x2) - x;
        if error.abs() < 1e-7 {
            break;
        }
        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = (lo + hi) / 2.0;
    }
    sample(t, y1, y2)
}

/// Eased height animation between snap targets.
///
/// State machine: at rest at a height, or animating from one height to
/// another. `animate_to` while animating retargets from the current
/// interpolated height, so an interrupted snap never jumps.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightTransition {
    from_px: f64,
    to_px: f64,
    progress: f64,
    animating: bool,
    duration: Duration,
    easing: SheetEasing,
}

impl HeightTransition {
    /// Default snap animation duration.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    /// Create a transition at rest at `initial_px`.
    #[must_use]
    pub fn new(initial_px: f64) -> Self {
        Self {
            from_px: initial_px,
            to_px: initial_px,
            progress: 1.0,
            animating: false,
            duration: Self::DEFAULT_DURATION,
            easing: SheetEasing::default(),
        }
    }

    /// Override the animation duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: SheetEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    /// The height the transition is settling at (or resting at).
    #[must_use]
    pub const fn target_px(&self) -> f64 {
        self.to_px
    }

    /// Current interpolated height.
    #[must_use]
    pub fn current_px(&self) -> f64 {
        if !self.animating {
            return self.to_px;
        }
        self.from_px + (self.to_px - self.from_px) * self.easing.apply(self.progress)
    }

    /// Stop any animation and rest at `px` immediately.
    ///
    /// This is the drag path (live pixel heights bypass the animation) and
    /// the cancel path (revert without easing).
    pub fn jump_to(&mut self, px: f64) {
        self.from_px = px;
        self.to_px = px;
        self.progress = 1.0;
        self.animating = false;
    }

    /// Start animating from the current height toward `target_px`.
    ///
    /// A zero duration or an already-settled target completes instantly.
    pub fn animate_to(&mut self, target_px: f64) {
        let current = self.current_px();
        if self.duration.is_zero() || current == target_px {
            self.jump_to(target_px);
            return;
        }
        self.from_px = current;
        self.to_px = target_px;
        self.progress = 0.0;
        self.animating = true;
    }

    /// Advance the animation.
    ///
    /// Returns `true` on the tick that completes the animation.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.animating {
            return false;
        }
        let step = delta.as_secs_f64() / self.duration.as_secs_f64();
        self.progress = (self.progress + step.max(0.0)).min(1.0);
        if self.progress >= 1.0 {
            self.animating = false;
            self.from_px = self.to_px;
            return true;
        }
        false
    }
}
