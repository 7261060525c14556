use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::layout::LayoutMetrics;

/// Continuous linear mapping from a domain interval to a pixel range.
///
/// A degenerate domain (`start == end`) maps every value to the middle of
/// the range instead of failing, so a data set whose segments all share one
/// instant still renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> TimelineResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(TimelineError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> TimelineResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(TimelineError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return (self.range_start + self.range_end) / 2.0;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Coordinate source consumed by geometry resolution.
///
/// Only the horizontal scale is continuous; vertical placement is derived
/// from the vertical range start and the configured row height.
pub trait ScaleProvider {
    fn x(&self, value: f64) -> f64;
    fn x_range(&self) -> (f64, f64);
    fn y_range(&self) -> (f64, f64);

    fn y_start(&self) -> f64 {
        let (a, b) = self.y_range();
        a.min(b)
    }

    fn y_height(&self) -> f64 {
        let (a, b) = self.y_range();
        (b - a).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XYScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl XYScales {
    /// Builds scales ranged to the viewport minus bleed on every side.
    pub fn for_plot(
        viewport: Viewport,
        metrics: LayoutMetrics,
        x_domain: (f64, f64),
    ) -> TimelineResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let x = LinearScale::new(x_domain.0, x_domain.1)?
            .with_range(metrics.left, viewport.width_px() - metrics.right)?;
        let y = LinearScale::new(0.0, 1.0)?
            .with_range(metrics.top, viewport.height_px() - metrics.bottom)?;
        Ok(Self { x, y })
    }
}

impl ScaleProvider for XYScales {
    fn x(&self, value: f64) -> f64 {
        self.x.domain_to_pixel(value)
    }

    fn x_range(&self) -> (f64, f64) {
        self.x.range()
    }

    fn y_range(&self) -> (f64, f64) {
        self.y.range()
    }
}
