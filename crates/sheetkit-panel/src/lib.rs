#![forbid(unsafe_code)]

//! Host binding for the sheetkit bottom sheet.
//!
//! [`SheetPanel`] consumes raw pointer lifecycle events from a host (pointer
//! down/move/up/cancel, capture loss, taps) and drives the interaction
//! primitives from `sheetkit-core`: the drag session, the rubber-band clamp,
//! and the snap machine. [`HeightTransition`] supplies the eased settle
//! animation between snap targets.
//!
//! The host's obligations are small: forward pointer events, forward
//! [`sheetkit_core::CaptureCommand`]s to platform pointer capture, call
//! [`SheetPanel::tick`] each frame, and render [`SheetPanel::height_px`].

pub mod panel;
pub mod transition;

pub use panel::{
    SheetDispatch, SheetIgnoredReason, SheetLifecyclePhase, SheetLogEntry, SheetLogOutcome,
    SheetPanel,
};
pub use transition::{HeightTransition, SheetEasing};

pub use sheetkit_core::{
    CaptureCommand, GestureSession, SessionError, SheetConfig, SheetConfigError, SheetMetrics,
    SheetPosition, SnapController, SnapOutcome, SnapReason, resist,
};
