use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;
use crate::interaction::{ScrollSource, WheelOutcome};
use crate::reconcile::SegmentKey;
use crate::render::Renderer;

use super::TimelineEngine;
use super::validation::{validate_scroll_delta, validate_tick};

/// Outcome of advancing the engine clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub removed_segments: Vec<SegmentKey>,
    pub pointer_events_restored: bool,
    /// At least one transition is still running.
    pub animating: bool,
}

impl<D, R: Renderer> TimelineEngine<D, R> {
    /// Scrolls by `delta` pixels, clamped to `[0, max_scroll]`, and re-presents.
    pub fn apply_scroll_delta(&mut self, delta: f64) -> TimelineResult<f64> {
        let delta = validate_scroll_delta(delta, "scroll delta")?;
        let distance = self.scroll.apply_delta(delta);
        self.emit_event(TimelineEvent::Scrolled {
            distance,
            source: ScrollSource::Api,
        });
        self.present()?;
        Ok(distance)
    }

    /// Feeds one wheel event.
    ///
    /// Segments stop receiving pointer events until the wheel has been quiet
    /// for the suppression period. The returned outcome tells the host whether
    /// to cancel the page scroll.
    pub fn wheel(&mut self, delta_y: f64) -> TimelineResult<WheelOutcome> {
        let delta_y = validate_scroll_delta(delta_y, "wheel delta")?;
        let outcome = self.input.on_wheel(&mut self.scroll, delta_y);
        if let Some(on_scroll) = self.on_scroll.as_mut() {
            on_scroll(outcome.scroll_distance);
        }
        self.emit_event(TimelineEvent::Scrolled {
            distance: outcome.scroll_distance,
            source: ScrollSource::Wheel,
        });
        self.present()?;
        Ok(outcome)
    }

    /// Moves the scrollbar handle by `pointer_dy` pixels.
    pub fn drag_scroll_handle(&mut self, pointer_dy: f64) -> TimelineResult<f64> {
        let pointer_dy = validate_scroll_delta(pointer_dy, "drag delta")?;
        let distance = self.input.on_drag(&mut self.scroll, pointer_dy);
        self.emit_event(TimelineEvent::Scrolled {
            distance,
            source: ScrollSource::Drag,
        });
        self.present()?;
        Ok(distance)
    }

    /// Advances the engine clock by `dt_ms`: runs transitions, removes
    /// finished exits and lifts pointer suppression when due.
    pub fn tick(&mut self, dt_ms: f64) -> TimelineResult<TickReport> {
        let dt_ms = validate_tick(dt_ms)?;
        let was_animating = self.layers.segments.is_animating();

        self.layers.segments.advance(dt_ms);
        let removed_segments = self.layers.segments.drain_finished_exits();
        let pointer_events_restored = self.input.advance(dt_ms);
        let animating = self.layers.segments.is_animating();

        for key in &removed_segments {
            self.emit_event(TimelineEvent::SegmentRemoved { key: key.clone() });
        }
        if pointer_events_restored {
            trace!(now_ms = self.input.now_ms(), "segment pointer events restored");
            self.emit_event(TimelineEvent::PointerEventsRestored);
        }
        if was_animating && !animating {
            self.emit_event(TimelineEvent::TransitionsSettled);
        }

        if was_animating || pointer_events_restored || !removed_segments.is_empty() {
            self.present()?;
        }

        Ok(TickReport {
            removed_segments,
            pointer_events_restored,
            animating,
        })
    }
}
