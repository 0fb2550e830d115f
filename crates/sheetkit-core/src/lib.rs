#![forbid(unsafe_code)]

//! Deterministic interaction primitives for a draggable bottom sheet.
//!
//! This crate has no host or rendering dependency. It provides:
//!
//! - [`SheetConfig`] / [`SheetMetrics`]: validated tuning and its pixel-space
//!   resolution against a viewport sample.
//! - [`resist`]: the pure rubber-band clamp applied to drag heights.
//! - [`SnapController`]: the two-state hysteresis snap machine.
//! - [`GestureSession`]: the exclusively-owned drag lifecycle with explicit
//!   pointer-capture acquire/release commands.
//!
//! The `sheetkit-panel` crate binds these into a panel that consumes host
//! pointer events.

pub mod clamp;
pub mod config;
pub mod session;
pub mod snap;

pub use clamp::resist;
pub use config::{SheetConfig, SheetConfigError, SheetMetrics};
pub use session::{CaptureCommand, GestureSession, SessionError};
pub use snap::{SheetPosition, SnapController, SnapOutcome, SnapReason};
