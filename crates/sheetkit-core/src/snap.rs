#![forbid(unsafe_code)]

//! Two-state hysteresis snap machine.
//!
//! [`SnapController`] decides, from a released drag height or a direct toggle,
//! which of the two snap positions is active next.
//!
//! # State Machine
//!
//! ```text
//! Collapsed <-> Expanded
//! ```
//!
//! Cyclic, no terminal state. On release, the commit threshold is measured
//! from the *opposite* bound of the current position: a small accidental
//! movement never flips the state, while a deliberate drag past the hysteresis
//! margin does. A direct toggle bypasses the threshold entirely.
//!
//! # Invariants
//!
//! 1. Exactly one position at any time; initial position is `Collapsed`.
//! 2. Every outcome carries the pixel target the height must settle at.
//! 3. `toggle` twice returns to the original position.

use serde::{Deserialize, Serialize};

use crate::config::SheetMetrics;

/// Committed snap position of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetPosition {
    /// Resting at the lower snap bound.
    #[default]
    Collapsed,
    /// Resting at the upper snap bound.
    Expanded,
}

impl SheetPosition {
    /// The opposite position.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Why a snap decision landed where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapReason {
    /// The release height crossed the hysteresis margin; the position flipped.
    CrossedThreshold,
    /// The release height stayed within the margin; the position was retained
    /// and the height reverts to its bound.
    RetainedCurrent,
    /// A direct toggle, bypassing the threshold check.
    Toggled,
}

/// Result of one snap decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapOutcome {
    /// The committed position after the decision.
    pub position: SheetPosition,
    /// Pixel height the sheet must settle at.
    pub target_px: f64,
    /// Whether the position changed.
    pub changed: bool,
    /// Decision category, for diagnostics.
    pub reason: SnapReason,
}

/// Snap position state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapController {
    position: SheetPosition,
}

impl SnapController {
    /// Create a controller resting at `Collapsed`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current committed position.
    #[must_use]
    pub const fn position(&self) -> SheetPosition {
        self.position
    }

    /// Decide the next position from a released drag height.
    ///
    /// The threshold is measured from the opposite bound of the current
    /// position: starting `Expanded`, the sheet collapses only once the
    /// release height has dropped more than `threshold_px` below `max_px`;
    /// starting `Collapsed`, it expands only once the release height has risen
    /// more than `threshold_px` above `min_px`.
    pub fn on_release(&mut self, final_height_px: f64, metrics: &SheetMetrics) -> SnapOutcome {
        let next = match self.position {
            SheetPosition::Expanded if final_height_px < metrics.max_px - metrics.threshold_px => {
                SheetPosition::Collapsed
            }
            SheetPosition::Collapsed if final_height_px > metrics.min_px + metrics.threshold_px => {
                SheetPosition::Expanded
            }
            current => current,
        };
        let changed = next != self.position;
        self.position = next;
        SnapOutcome {
            position: next,
            target_px: metrics.target_px(next),
            changed,
            reason: if changed {
                SnapReason::CrossedThreshold
            } else {
                SnapReason::RetainedCurrent
            },
        }
    }

    /// Flip the position unconditionally (a tap on the handle).
    pub fn toggle(&mut self, metrics: &SheetMetrics) -> SnapOutcome {
        self.position = self.position.flipped();
        SnapOutcome {
            position: self.position,
            target_px: metrics.target_px(self.position),
            changed: true,
            reason: SnapReason::Toggled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    // 40% / 88% of 800px: min=320, max=704, threshold=96.
    fn metrics() -> SheetMetrics {
        SheetConfig::default().resolve(800.0).unwrap()
    }

    fn expanded() -> SnapController {
        let mut controller = SnapController::new();
        controller.toggle(&metrics());
        controller
    }

    #[test]
    fn starts_collapsed() {
        assert_eq!(SnapController::new().position(), SheetPosition::Collapsed);
    }

    #[test]
    fn collapsed_release_past_threshold_expands() {
        let mut controller = SnapController::new();
        let outcome = controller.on_release(450.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Expanded);
        assert_eq!(outcome.target_px, 704.0);
        assert!(outcome.changed);
        assert_eq!(outcome.reason, SnapReason::CrossedThreshold);
    }

    #[test]
    fn collapsed_release_within_threshold_reverts() {
        let mut controller = SnapController::new();
        // 416 = min + threshold; not strictly above, so no flip.
        let outcome = controller.on_release(416.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Collapsed);
        assert_eq!(outcome.target_px, 320.0);
        assert!(!outcome.changed);
        assert_eq!(outcome.reason, SnapReason::RetainedCurrent);
    }

    #[test]
    fn expanded_release_past_threshold_collapses() {
        let mut controller = expanded();
        let outcome = controller.on_release(550.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Collapsed);
        assert_eq!(outcome.target_px, 320.0);
        assert!(outcome.changed);
    }

    #[test]
    fn expanded_release_within_threshold_reverts() {
        let mut controller = expanded();
        // 650 >= 704 - 96 = 608: stays expanded, height reverts to the bound.
        let outcome = controller.on_release(650.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Expanded);
        assert_eq!(outcome.target_px, 704.0);
        assert!(!outcome.changed);
    }

    #[test]
    fn expanded_release_exactly_at_boundary_reverts() {
        let mut controller = expanded();
        let outcome = controller.on_release(608.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Expanded);
        assert!(!outcome.changed);
    }

    #[test]
    fn toggle_bypasses_threshold() {
        let mut controller = SnapController::new();
        let outcome = controller.toggle(&metrics());
        assert_eq!(outcome.position, SheetPosition::Expanded);
        assert!(outcome.changed);
        assert_eq!(outcome.reason, SnapReason::Toggled);
    }

    #[test]
    fn toggle_twice_returns_to_original() {
        for start in [SheetPosition::Collapsed, SheetPosition::Expanded] {
            let mut controller = SnapController::new();
            if start == SheetPosition::Expanded {
                controller.toggle(&metrics());
            }
            controller.toggle(&metrics());
            controller.toggle(&metrics());
            assert_eq!(controller.position(), start);
        }
    }

    #[test]
    fn release_far_below_min_keeps_collapsed() {
        let mut controller = SnapController::new();
        let outcome = controller.on_release(100.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Collapsed);
        assert!(!outcome.changed);
    }

    #[test]
    fn release_far_above_max_keeps_expanded() {
        let mut controller = expanded();
        let outcome = controller.on_release(900.0, &metrics());
        assert_eq!(outcome.position, SheetPosition::Expanded);
        assert!(!outcome.changed);
    }

    #[test]
    fn position_serializes_snake_case() {
        let json = serde_json::to_string(&SheetPosition::Collapsed).unwrap();
        assert_eq!(json, "\"collapsed\"");
    }
}
