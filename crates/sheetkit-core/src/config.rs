#![forbid(unsafe_code)]

//! Validated interaction tuning for the bottom sheet.
//!
//! [`SheetConfig`] holds the percentage-space tuning that is fixed for the
//! panel's lifetime; [`SheetMetrics`] is its pixel-space resolution against a
//! single viewport sample, taken once at the start of each drag.
//!
//! # Failure Modes
//!
//! Misconfiguration is a programmer error and fails fast at construction:
//! inverted bounds, negative resistance, a threshold fraction outside
//! `[0, 1]`, or any non-finite value. Resolving against a non-positive
//! viewport also fails — the panel treats that as an ignorable event, not a
//! panic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snap::SheetPosition;

/// Interaction tuning for the sheet, in viewport-percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Lower snap bound, percent of viewport height (default: 40).
    pub min_height_percent: f64,
    /// Upper snap bound, percent of viewport height (default: 88).
    pub max_height_percent: f64,
    /// Damping ratio applied to drag overshoot beyond bounds (default: 0.2).
    pub resistance_factor: f64,
    /// Hysteresis margin as a fraction of the min–max range (default: 0.25).
    pub snap_threshold_fraction: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            min_height_percent: 40.0,
            max_height_percent: 88.0,
            resistance_factor: 0.2,
            snap_threshold_fraction: 0.25,
        }
    }
}

impl SheetConfig {
    /// Build a validated config.
    pub fn new(
        min_height_percent: f64,
        max_height_percent: f64,
        resistance_factor: f64,
        snap_threshold_fraction: f64,
    ) -> Result<Self, SheetConfigError> {
        let config = Self {
            min_height_percent,
            max_height_percent,
            resistance_factor,
            snap_threshold_fraction,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all construction-time preconditions.
    pub fn validate(&self) -> Result<(), SheetConfigError> {
        for (field, value) in [
            ("min_height_percent", self.min_height_percent),
            ("max_height_percent", self.max_height_percent),
            ("resistance_factor", self.resistance_factor),
            ("snap_threshold_fraction", self.snap_threshold_fraction),
        ] {
            if !value.is_finite() {
                return Err(SheetConfigError::NonFinite { field });
            }
        }
        if self.min_height_percent <= 0.0 || self.max_height_percent > 100.0 {
            return Err(SheetConfigError::PercentOutOfRange {
                min: self.min_height_percent,
                max: self.max_height_percent,
            });
        }
        if self.min_height_percent >= self.max_height_percent {
            return Err(SheetConfigError::InvertedBounds {
                min: self.min_height_percent,
                max: self.max_height_percent,
            });
        }
        if self.resistance_factor < 0.0 {
            return Err(SheetConfigError::NegativeResistance {
                value: self.resistance_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.snap_threshold_fraction) {
            return Err(SheetConfigError::ThresholdFractionOutOfRange {
                value: self.snap_threshold_fraction,
            });
        }
        Ok(())
    }

    /// Resolve the config against one viewport height sample.
    pub fn resolve(&self, viewport_px: f64) -> Result<SheetMetrics, SheetConfigError> {
        if !viewport_px.is_finite() || viewport_px <= 0.0 {
            return Err(SheetConfigError::InvalidViewport { value: viewport_px });
        }
        let min_px = viewport_px * (self.min_height_percent / 100.0);
        let max_px = viewport_px * (self.max_height_percent / 100.0);
        Ok(SheetMetrics {
            min_px,
            max_px,
            threshold_px: (max_px - min_px) * self.snap_threshold_fraction,
            resistance_factor: self.resistance_factor,
        })
    }
}

/// Pixel-space resolution of a [`SheetConfig`] against one viewport sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetMetrics {
    /// Collapsed snap height in pixels.
    pub min_px: f64,
    /// Expanded snap height in pixels.
    pub max_px: f64,
    /// Hysteresis margin in pixels, measured from the opposite bound.
    pub threshold_px: f64,
    /// Damping ratio carried through for the clamp.
    pub resistance_factor: f64,
}

impl SheetMetrics {
    /// Snap target height for a position.
    #[must_use]
    pub const fn target_px(&self, position: SheetPosition) -> f64 {
        match position {
            SheetPosition::Collapsed => self.min_px,
            SheetPosition::Expanded => self.max_px,
        }
    }
}

/// Construction/resolution failures for sheet tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetConfigError {
    InvertedBounds { min: f64, max: f64 },
    PercentOutOfRange { min: f64, max: f64 },
    NegativeResistance { value: f64 },
    ThresholdFractionOutOfRange { value: f64 },
    NonFinite { field: &'static str },
    InvalidViewport { value: f64 },
}

impl fmt::Display for SheetConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBounds { min, max } => {
                write!(f, "min_height_percent {min} must be below max_height_percent {max}")
            }
            Self::PercentOutOfRange { min, max } => {
                write!(f, "height percents must lie in (0, 100]: min={min} max={max}")
            }
            Self::NegativeResistance { value } => {
                write!(f, "resistance_factor must be non-negative, got {value}")
            }
            Self::ThresholdFractionOutOfRange { value } => {
                write!(f, "snap_threshold_fraction must lie in [0, 1], got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::InvalidViewport { value } => {
                write!(f, "viewport height must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SheetConfigError {}
