use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Record, ScaleProvider};

/// Resting rectangle of one bar segment in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPolicy {
    pub row_height: f64,
    pub show_empty_segments: bool,
    pub line_cap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    pub geometry: SegmentGeometry,
    /// The raw scaled width was negative and had to be clamped.
    pub clamped: bool,
}

/// Top edge of a row band.
#[must_use]
pub fn row_top(scales: &impl ScaleProvider, row_index: usize, row_height: f64) -> f64 {
    scales.y_start() + row_index as f64 * row_height
}

/// Converts a record placed on `row_index` into bar geometry.
///
/// A negative scaled width is never emitted: it is clamped to 0, or to the
/// minimum visible width (1px, or the thickness for rounded caps) when empty
/// segments are shown.
#[must_use]
pub fn resolve_segment_geometry(
    record: &Record,
    row_index: usize,
    scales: &impl ScaleProvider,
    policy: GeometryPolicy,
) -> ResolvedGeometry {
    let x = scales.x(record.start);
    let raw_width = scales.x(record.start + record.length) - x;
    let height = record.thickness;

    let clamped = raw_width < 0.0;
    if clamped {
        warn!(
            key = %record.key,
            raw_width,
            "timeline segment has a negative length, clamping its width"
        );
    }

    let width = if policy.show_empty_segments {
        let min_visible = if policy.line_cap { height } else { 1.0 };
        raw_width.max(min_visible)
    } else {
        raw_width.max(0.0)
    };

    let y = row_top(scales, row_index, policy.row_height) + (policy.row_height - height) / 2.0;

    ResolvedGeometry {
        geometry: SegmentGeometry {
            x,
            y,
            width,
            height,
            corner_radius: policy.line_cap.then_some(height / 2.0),
        },
        clamped,
    }
}
