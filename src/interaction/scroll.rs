use serde::{Deserialize, Serialize};

/// Virtual scroll offset of the row content and the derived handle metrics.
///
/// Invariant: `0 <= scroll_distance <= max_scroll`. Bounds are refreshed on
/// every full render; the distance itself is only ever clamped, never reset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub scroll_distance: f64,
    pub max_scroll: f64,
    pub handle_height: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollState {
    pub fn update_bounds(&mut self, viewport_height: f64, content_height: f64) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.handle_height = if content_height > 0.0 {
            viewport_height * viewport_height / content_height
        } else {
            0.0
        };
        self.max_scroll = (content_height - viewport_height).max(0.0);
    }

    /// Shifts the offset by `delta` and clamps it into `[0, max_scroll]`.
    pub fn apply_delta(&mut self, delta: f64) -> f64 {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.scroll_distance = (self.scroll_distance + delta).clamp(0.0, self.max_scroll);
        self.scroll_distance
    }

    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.max_scroll > 0.0
    }

    /// Handle track travel in pixels.
    #[must_use]
    pub fn handle_travel(&self) -> f64 {
        self.viewport_height - self.handle_height
    }

    /// Top of the scrollbar handle relative to the track.
    #[must_use]
    pub fn handle_position(&self) -> f64 {
        if self.max_scroll > 0.0 {
            self.scroll_distance / self.max_scroll * self.handle_travel()
        } else {
            0.0
        }
    }

    /// Converts handle movement in pixels into content scroll distance.
    #[must_use]
    pub fn drag_delta(&self, pointer_dy: f64) -> f64 {
        let travel = self.handle_travel();
        if travel > 0.0 {
            pointer_dy * self.max_scroll / travel
        } else {
            0.0
        }
    }

    /// Offset strictly inside the scroll range, where wheel input is consumed.
    #[must_use]
    pub fn is_mid_range(&self) -> bool {
        self.scroll_distance > 0.0 && self.scroll_distance < self.max_scroll
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::ScrollState;

    #[test]
    fn bounds_follow_content_and_viewport() {
        let mut scroll = ScrollState::default();
        scroll.update_bounds(100.0, 300.0);
        assert_eq!(scroll.max_scroll, 200.0);
        assert_relative_eq!(scroll.handle_height, 100.0 / 3.0, epsilon = 1e-9);

        scroll.update_bounds(100.0, 0.0);
        assert_eq!(scroll.max_scroll, 0.0);
        assert_eq!(scroll.handle_height, 0.0);
    }

    #[test]
    fn drag_maps_handle_travel_onto_scroll_range() {
        let mut scroll = ScrollState::default();
        scroll.update_bounds(100.0, 300.0);
        let travel = scroll.handle_travel();
        assert_relative_eq!(scroll.drag_delta(travel), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn drag_without_travel_is_inert() {
        let mut scroll = ScrollState::default();
        scroll.update_bounds(100.0, 100.0);
        assert_eq!(scroll.drag_delta(25.0), 0.0);
    }
}
