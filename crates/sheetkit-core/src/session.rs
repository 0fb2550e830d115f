#![forbid(unsafe_code)]

//! Exclusively-owned drag session lifecycle.
//!
//! [`GestureSession`] owns the lifetime of one active drag: pointer identity,
//! origin coordinate, and the height baseline the drag measures against. It
//! also owns the pointer-capture contract with the host: `begin` hands back an
//! [`CaptureCommand::Acquire`] the host must forward to platform pointer
//! capture, and every exit path (`end`, `cancel`) hands back the matching
//! release.
//!
//! # Invariants
//!
//! 1. At most one session is alive at any time; a second `begin` fails with
//!    [`SessionError::SessionAlreadyActive`] and leaves the existing session
//!    untouched.
//! 2. A session is mutated only by the pointer id that created it; `update`
//!    and `end` for any other pointer are no-ops.
//! 3. Capture is released on every exit path, including cancellation.
//!
//! # Failure Modes
//!
//! Stray `update`/`end` calls after teardown return `None` and are otherwise
//! silent — the caller logs them, nothing here is fatal.

use std::fmt;

/// Host command for platform pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Route subsequent events for `pointer_id` exclusively to the sheet.
    Acquire { pointer_id: u32 },
    /// Release exclusive routing for `pointer_id`.
    Release { pointer_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    pointer_id: u32,
    start_client_y: f64,
    start_height_px: f64,
}

/// Lifecycle owner for one active drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSession {
    active: Option<DragOrigin>,
}

impl GestureSession {
    /// Create an idle session holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer id owning the active session, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|origin| origin.pointer_id)
    }

    /// Height baseline recorded at `begin`, if a session is active.
    #[must_use]
    pub fn start_height_px(&self) -> Option<f64> {
        self.active.map(|origin| origin.start_height_px)
    }

    /// Open a session for `pointer_id` at the given origin and baseline.
    ///
    /// Returns the capture-acquire command the host must forward. Fails if a
    /// session is already active; the caller treats that as a no-op and the
    /// existing session is untouched.
    pub fn begin(
        &mut self,
        pointer_id: u32,
        client_y: f64,
        current_height_px: f64,
    ) -> Result<CaptureCommand, SessionError> {
        if let Some(origin) = self.active {
            return Err(SessionError::SessionAlreadyActive {
                active_pointer_id: origin.pointer_id,
                pointer_id,
            });
        }
        self.active = Some(DragOrigin {
            pointer_id,
            start_client_y: client_y,
            start_height_px: current_height_px,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(pointer_id, client_y, current_height_px, "drag session opened");
        Ok(CaptureCommand::Acquire { pointer_id })
    }

    /// Raw drag delta for a move event.
    ///
    /// Dragging up yields a positive delta (growing height). Returns `None`
    /// when no session is active or the pointer id mismatches.
    #[must_use]
    pub fn update(&self, pointer_id: u32, client_y: f64) -> Option<f64> {
        let origin = self.active?;
        if origin.pointer_id != pointer_id {
            return None;
        }
        Some(origin.start_client_y - client_y)
    }

    /// Close the session on pointer-up.
    ///
    /// Returns the capture-release command, or `None` when no session is
    /// active or the pointer id mismatches (the session stays alive).
    pub fn end(&mut self, pointer_id: u32) -> Option<CaptureCommand> {
        let origin = self.active?;
        if origin.pointer_id != pointer_id {
            return None;
        }
        self.active = None;
        #[cfg(feature = "tracing")]
        tracing::trace!(pointer_id, "drag session closed");
        Some(CaptureCommand::Release { pointer_id })
    }

    /// Tear down unconditionally on platform-initiated capture loss.
    ///
    /// Returns the capture-release command for the owning pointer, or `None`
    /// if the session was already idle. The caller must commit the panel back
    /// to its last stable snap height, never the mid-drag pixel value.
    pub fn cancel(&mut self) -> Option<CaptureCommand> {
        let origin = self.active.take()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(pointer_id = origin.pointer_id, "drag session canceled");
        Some(CaptureCommand::Release {
            pointer_id: origin.pointer_id,
        })
    }
}

/// Session lifecycle failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `begin` was called while a session is already active.
    SessionAlreadyActive {
        active_pointer_id: u32,
        pointer_id: u32,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionAlreadyActive {
                active_pointer_id,
                pointer_id,
            } => write!(
                f,
                "pointer {pointer_id} cannot begin a drag: pointer {active_pointer_id} owns the active session"
            ),
        }
    }
}

impl std::error::Error for SessionError {}
