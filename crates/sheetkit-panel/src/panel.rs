#![forbid(unsafe_code)]

//! Host-facing bottom-sheet panel.
//!
//! [`SheetPanel`] bridges host pointer lifecycle signals into the sheet's
//! drag, clamp, and snap primitives while enforcing:
//! - one active pointer at a time,
//! - explicit capture acquire/release commands for the host, and
//! - reversion to the last committed snap height on interruption paths.
//!
//! Every entry point returns a [`SheetDispatch`] carrying the height to
//! render, any capture command to forward, and a structured log record. The
//! panel never panics on stray or out-of-order events; it ignores them with a
//! deterministic reason.

use std::time::Duration;

use sheetkit_core::{
    CaptureCommand, GestureSession, SessionError, SheetConfig, SheetConfigError, SheetMetrics,
    SheetPosition, SnapController, SnapOutcome, resist,
};

use crate::transition::HeightTransition;

/// Lifecycle phase recorded for one panel dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    LostCapture,
    Toggle,
}

/// Deterministic reason why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetIgnoredReason {
    /// A drag is already in progress; second pointers are dropped.
    SessionAlreadyActive,
    /// Move/up/cancel arrived with no drag in progress.
    NoActiveSession,
    /// The event's pointer id is not the one that started the drag.
    PointerMismatch,
    /// The viewport sample at pointer-down was non-finite or non-positive.
    InvalidViewport,
}

/// Outcome category for one panel dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLogOutcome {
    Applied,
    Ignored(SheetIgnoredReason),
}

/// Structured log record for one panel dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLogEntry {
    pub phase: SheetLifecyclePhase,
    pub pointer_id: Option<u32>,
    pub height_px: f64,
    pub capture_command: Option<CaptureCommand>,
    pub outcome: SheetLogOutcome,
}

/// Result of one panel dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetDispatch {
    /// Height to render after this dispatch.
    pub height_px: f64,
    /// Committed snap position after this dispatch.
    pub position: SheetPosition,
    /// Snap decision, present on release and toggle dispatches.
    pub snap: Option<SnapOutcome>,
    /// Capture command the host must forward, if any.
    pub capture_command: Option<CaptureCommand>,
    pub log: SheetLogEntry,
}

impl SheetDispatch {
    fn ignored(
        phase: SheetLifecyclePhase,
        reason: SheetIgnoredReason,
        pointer_id: Option<u32>,
        height_px: f64,
        position: SheetPosition,
    ) -> Self {
        Self {
            height_px,
            position,
            snap: None,
            capture_command: None,
            log: SheetLogEntry {
                phase,
                pointer_id,
                height_px,
                capture_command: None,
                outcome: SheetLogOutcome::Ignored(reason),
            },
        }
    }

    fn applied(
        phase: SheetLifecyclePhase,
        pointer_id: Option<u32>,
        height_px: f64,
        position: SheetPosition,
        snap: Option<SnapOutcome>,
        capture_command: Option<CaptureCommand>,
    ) -> Self {
        Self {
            height_px,
            position,
            snap,
            capture_command,
            log: SheetLogEntry {
                phase,
                pointer_id,
                height_px,
                capture_command,
                outcome: SheetLogOutcome::Applied,
            },
        }
    }
}

/// Draggable bottom-sheet panel hosting a list of items.
///
/// The panel owns the full interaction state: the committed snap position,
/// the eased height transition, and at most one drag session. Hosts feed it
/// pointer events and periodic ticks, render `height_px()`, and forward any
/// [`CaptureCommand`] to platform pointer capture.
#[derive(Debug, Clone)]
pub struct SheetPanel<T> {
    config: SheetConfig,
    metrics: SheetMetrics,
    controller: SnapController,
    session: GestureSession,
    transition: HeightTransition,
    drag_height_px: Option<f64>,
    items: Vec<T>,
}

impl<T> SheetPanel<T> {
    /// Create a panel resting collapsed against an initial viewport sample.
    pub fn new(config: SheetConfig, viewport_px: f64) -> Result<Self, SheetConfigError> {
        config.validate()?;
        let metrics = config.resolve(viewport_px)?;
        Ok(Self {
            config,
            metrics,
            controller: SnapController::new(),
            session: GestureSession::new(),
            transition: HeightTransition::new(metrics.min_px),
            drag_height_px: None,
            items: Vec::new(),
        })
    }

    /// Panel tuning.
    #[must_use]
    pub const fn config(&self) -> SheetConfig {
        self.config
    }

    /// Pixel metrics from the most recent viewport sample.
    #[must_use]
    pub const fn metrics(&self) -> SheetMetrics {
        self.metrics
    }

    /// Committed snap position.
    #[must_use]
    pub const fn position(&self) -> SheetPosition {
        self.controller.position()
    }

    /// Height to render right now.
    ///
    /// During a drag this is the live damped pixel value; otherwise it is the
    /// transition's interpolated height.
    #[must_use]
    pub fn height_px(&self) -> f64 {
        match self.drag_height_px {
            Some(height) => height,
            None => self.transition.current_px(),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// Whether a snap animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    /// Hosted items, in display order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the hosted items.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Begin a drag on the sheet handle.
    ///
    /// The viewport is re-sampled here and the resulting metrics are frozen
    /// for the whole drag; a mid-drag viewport change has no effect until the
    /// next pointer-down. Any in-flight snap animation is frozen at its
    /// current height, which becomes the drag baseline.
    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        client_y: f64,
        viewport_px: f64,
    ) -> SheetDispatch {
        let metrics = match self.config.resolve(viewport_px) {
            Ok(metrics) => metrics,
            Err(_) => {
                return SheetDispatch::ignored(
                    SheetLifecyclePhase::PointerDown,
                    SheetIgnoredReason::InvalidViewport,
                    Some(pointer_id),
                    self.height_px(),
                    self.position(),
                );
            }
        };
        let baseline = self.height_px();
        let command = match self.session.begin(pointer_id, client_y, baseline) {
            Ok(command) => command,
            Err(SessionError::SessionAlreadyActive { .. }) => {
                return SheetDispatch::ignored(
                    SheetLifecyclePhase::PointerDown,
                    SheetIgnoredReason::SessionAlreadyActive,
                    Some(pointer_id),
                    self.height_px(),
                    self.position(),
                );
            }
        };
        self.metrics = metrics;
        self.transition.jump_to(baseline);
        self.drag_height_px = Some(baseline);
        #[cfg(feature = "tracing")]
        tracing::debug!(pointer_id, baseline, "sheet drag started");
        SheetDispatch::applied(
            SheetLifecyclePhase::PointerDown,
            Some(pointer_id),
            baseline,
            self.position(),
            None,
            Some(command),
        )
    }

    /// Track a pointer move during an active drag.
    ///
    /// The candidate height is the drag baseline plus the raw upward delta,
    /// passed through the rubber-band clamp. Within bounds the sheet follows
    /// the finger exactly.
    pub fn pointer_move(&mut self, pointer_id: u32, client_y: f64) -> SheetDispatch {
        let Some(delta) = self.session.update(pointer_id, client_y) else {
            return SheetDispatch::ignored(
                SheetLifecyclePhase::PointerMove,
                self.mismatch_reason(),
                Some(pointer_id),
                self.height_px(),
                self.position(),
            );
        };
        // update() only answers for an active session, so the baseline exists.
        let baseline = self.session.start_height_px().unwrap_or(self.metrics.min_px);
        let height = resist(
            baseline + delta,
            self.metrics.min_px,
            self.metrics.max_px,
            self.metrics.resistance_factor,
        );
        self.drag_height_px = Some(height);
        SheetDispatch::applied(
            SheetLifecyclePhase::PointerMove,
            Some(pointer_id),
            height,
            self.position(),
            None,
            None,
        )
    }

    /// Finish a drag and snap.
    ///
    /// The release height is the last damped drag height; the snap decision
    /// flips the position only past the hysteresis margin, otherwise the
    /// height animates back to its current bound.
    pub fn pointer_up(&mut self, pointer_id: u32) -> SheetDispatch {
        let Some(command) = self.session.end(pointer_id) else {
            return SheetDispatch::ignored(
                SheetLifecyclePhase::PointerUp,
                self.mismatch_reason(),
                Some(pointer_id),
                self.height_px(),
                self.position(),
            );
        };
        let released = self.drag_height_px.take().unwrap_or_else(|| self.height_px());
        let snap = self.controller.on_release(released, &self.metrics);
        self.transition.jump_to(released);
        self.transition.animate_to(snap.target_px);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            pointer_id,
            released,
            position = ?snap.position,
            changed = snap.changed,
            "sheet drag released"
        );
        SheetDispatch::applied(
            SheetLifecyclePhase::PointerUp,
            Some(pointer_id),
            released,
            snap.position,
            Some(snap),
            Some(command),
        )
    }

    /// Handle a host pointer-cancel.
    ///
    /// Pass `None` for interruptions with no pointer id (focus loss). The
    /// sheet reverts immediately to the last committed snap height; the
    /// mid-drag pixel value never survives an unconfirmed gesture.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> SheetDispatch {
        self.cancel_active(SheetLifecyclePhase::PointerCancel, pointer_id)
    }

    /// Handle platform-initiated capture loss; same reversion as cancel.
    pub fn lost_capture(&mut self, pointer_id: u32) -> SheetDispatch {
        self.cancel_active(SheetLifecyclePhase::LostCapture, Some(pointer_id))
    }

    /// Flip the snap position directly (a tap on the handle).
    ///
    /// Ignored while a drag is in progress; the drag owns the sheet until it
    /// resolves.
    pub fn toggle(&mut self) -> SheetDispatch {
        if self.session.is_active() {
            return SheetDispatch::ignored(
                SheetLifecyclePhase::Toggle,
                SheetIgnoredReason::SessionAlreadyActive,
                self.session.active_pointer_id(),
                self.height_px(),
                self.position(),
            );
        }
        let snap = self.controller.toggle(&self.metrics);
        self.transition.animate_to(snap.target_px);
        #[cfg(feature = "tracing")]
        tracing::debug!(position = ?snap.position, "sheet toggled");
        SheetDispatch::applied(
            SheetLifecyclePhase::Toggle,
            None,
            self.height_px(),
            snap.position,
            Some(snap),
            None,
        )
    }

    /// Advance the snap animation.
    ///
    /// Returns `true` on the tick that settles the sheet at its target. Ticks
    /// during a drag are no-ops; the drag height is authoritative.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.session.is_active() {
            return false;
        }
        self.transition.tick(delta)
    }

    fn cancel_active(
        &mut self,
        phase: SheetLifecyclePhase,
        pointer_id: Option<u32>,
    ) -> SheetDispatch {
        if !self.session.is_active() {
            return SheetDispatch::ignored(
                phase,
                SheetIgnoredReason::NoActiveSession,
                pointer_id,
                self.height_px(),
                self.position(),
            );
        }
        if let Some(id) = pointer_id
            && self.session.active_pointer_id() != Some(id)
        {
            return SheetDispatch::ignored(
                phase,
                SheetIgnoredReason::PointerMismatch,
                Some(id),
                self.height_px(),
                self.position(),
            );
        }
        let command = self.session.cancel();
        self.drag_height_px = None;
        let committed = self.metrics.target_px(self.position());
        self.transition.jump_to(committed);
        #[cfg(feature = "tracing")]
        tracing::debug!(?phase, committed, "sheet drag canceled");
        SheetDispatch::applied(
            phase,
            pointer_id.or(command.map(|c| match c {
                CaptureCommand::Acquire { pointer_id } | CaptureCommand::Release { pointer_id } => {
                    pointer_id
                }
            })),
            committed,
            self.position(),
            None,
            command,
        )
    }

    const fn mismatch_reason(&self) -> SheetIgnoredReason {
        if self.session.is_active() {
            SheetIgnoredReason::PointerMismatch
        } else {
            SheetIgnoredReason::NoActiveSession
        }
    }
}
