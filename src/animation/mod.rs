//! Clock-driven property tweens.
//!
//! Each animated element keeps its current interpolated value plus an
//! optional tween toward a target. Starting a new transition restarts the
//! clock from the current value, so the latest scheduled transition wins
//! without any cancellation handles.

use serde::{Deserialize, Serialize};

use crate::render::Color;

pub trait Interpolate: Copy {
    #[must_use]
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(self, to: Self, t: f64) -> Self {
        Color::rgba(
            self.red.interpolate(to.red, t),
            self.green.interpolate(to.green, t),
            self.blue.interpolate(to.blue, t),
            self.alpha.interpolate(to.alpha, t),
        )
    }
}

/// Cubic in-out easing on `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween<T> {
    from: T,
    to: T,
    elapsed_ms: f64,
    duration_ms: f64,
}

/// A value that eases toward its latest target as time advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated<T: Interpolate> {
    current: T,
    tween: Option<Tween<T>>,
}

impl<T: Interpolate> Animated<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            tween: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> T {
        self.current
    }

    /// Value the element settles on once the running tween finishes.
    #[must_use]
    pub fn target(&self) -> T {
        self.tween.map_or(self.current, |tween| tween.to)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts a transition from the current interpolated value.
    ///
    /// A non-positive duration applies the target immediately.
    pub fn transition_to(&mut self, target: T, duration_ms: f64) {
        if duration_ms.is_nan() || duration_ms <= 0.0 {
            self.current = target;
            self.tween = None;
            return;
        }
        self.tween = Some(Tween {
            from: self.current,
            to: target,
            elapsed_ms: 0.0,
            duration_ms,
        });
    }

    /// Advances the clock; returns `true` when a tween finished during this step.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let Some(mut tween) = self.tween else {
            return false;
        };
        tween.elapsed_ms += dt_ms.max(0.0);
        if tween.elapsed_ms >= tween.duration_ms {
            self.current = tween.to;
            self.tween = None;
            return true;
        }
        let t = ease_cubic_in_out(tween.elapsed_ms / tween.duration_ms);
        self.current = tween.from.interpolate(tween.to, t);
        self.tween = Some(tween);
        false
    }
}

/// Animated visual state of one bar segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentVisual {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub translate_y: f64,
    pub opacity: f64,
    pub fill: Color,
}

impl Interpolate for SegmentVisual {
    fn interpolate(self, to: Self, t: f64) -> Self {
        Self {
            x: self.x.interpolate(to.x, t),
            y: self.y.interpolate(to.y, t),
            width: self.width.interpolate(to.width, t),
            height: self.height.interpolate(to.height, t),
            corner_radius: self.corner_radius.interpolate(to.corner_radius, t),
            translate_y: self.translate_y.interpolate(to.translate_y, t),
            opacity: self.opacity.interpolate(to.opacity, t),
            fill: self.fill.interpolate(to.fill, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Animated, ease_cubic_in_out};

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_relative_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_relative_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_relative_eq!(ease_cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn zero_duration_applies_target_immediately() {
        let mut value = Animated::new(0.0);
        value.transition_to(10.0, 0.0);
        assert_eq!(value.current(), 10.0);
        assert!(!value.is_animating());
    }

    #[test]
    fn tween_reaches_target_and_reports_completion_once() {
        let mut value = Animated::new(0.0);
        value.transition_to(10.0, 100.0);
        assert!(!value.advance(50.0));
        assert_relative_eq!(value.current(), 5.0);
        assert!(value.advance(50.0));
        assert_eq!(value.current(), 10.0);
        assert!(!value.advance(50.0));
    }

    #[test]
    fn retarget_mid_flight_starts_from_interpolated_value() {
        let mut value = Animated::new(0.0);
        value.transition_to(10.0, 100.0);
        value.advance(50.0);
        value.transition_to(0.0, 100.0);
        assert_relative_eq!(value.current(), 5.0);
        assert_eq!(value.target(), 0.0);
        value.advance(100.0);
        assert_eq!(value.current(), 0.0);
    }
}
