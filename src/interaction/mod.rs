mod scroll;

pub use scroll::ScrollState;

use serde::{Deserialize, Serialize};

/// Quiet period after the last wheel event before segments take pointer input again.
pub const POINTER_SUPPRESSION_QUIET_MS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollActivity {
    AtRest,
    /// Wheel scrolling happened within the quiet period; segment pointer
    /// events are suppressed.
    ActivelyScrolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollSource {
    Wheel,
    Drag,
    Api,
}

/// Result of feeding one wheel event through the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelOutcome {
    pub scroll_distance: f64,
    /// The host must cancel the event's default (page) scroll.
    pub prevent_default: bool,
}

/// Debounced pointer-event suppression on the segment layer.
///
/// Every wheel event pushes the release deadline to `now + quiet period`,
/// so suppression lasts until the input has been quiet for the full period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSuppression {
    release_at_ms: Option<f64>,
}

impl PointerSuppression {
    pub fn arm(&mut self, now_ms: f64) {
        self.release_at_ms = Some(now_ms + POINTER_SUPPRESSION_QUIET_MS);
    }

    /// Releases suppression once the deadline passed; returns `true` on release.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.release_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.release_at_ms = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.release_at_ms.is_some()
    }

    #[must_use]
    pub fn release_at_ms(self) -> Option<f64> {
        self.release_at_ms
    }
}

/// Normalizes wheel and drag input into scroll deltas.
///
/// Owns the engine clock used by the suppression timer; the clock only
/// moves through `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputAdapter {
    now_ms: f64,
    suppression: PointerSuppression,
}

impl InputAdapter {
    #[must_use]
    pub fn now_ms(self) -> f64 {
        self.now_ms
    }

    #[must_use]
    pub fn activity(self) -> ScrollActivity {
        if self.suppression.is_active() {
            ScrollActivity::ActivelyScrolling
        } else {
            ScrollActivity::AtRest
        }
    }

    #[must_use]
    pub fn segments_accept_pointer(self) -> bool {
        !self.suppression.is_active()
    }

    #[must_use]
    pub fn suppression(self) -> PointerSuppression {
        self.suppression
    }

    pub fn on_wheel(&mut self, scroll: &mut ScrollState, delta_y: f64) -> WheelOutcome {
        let scroll_distance = scroll.apply_delta(delta_y);
        self.suppression.arm(self.now_ms);
        WheelOutcome {
            scroll_distance,
            prevent_default: scroll.is_mid_range(),
        }
    }

    pub fn on_drag(&mut self, scroll: &mut ScrollState, pointer_dy: f64) -> f64 {
        let delta = scroll.drag_delta(pointer_dy);
        scroll.apply_delta(delta)
    }

    /// Moves the clock forward; returns `true` when pointer suppression was lifted.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.now_ms += dt_ms.max(0.0);
        self.suppression.poll(self.now_ms)
    }
}
