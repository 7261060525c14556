use serde::{Deserialize, Serialize};

use crate::animation::SegmentVisual;
use crate::core::Viewport;
use crate::interaction::ScrollState;
use crate::layout::LayoutMetrics;
use crate::reconcile::SegmentKey;
use crate::render::Renderer;

use super::TimelineEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub viewport: Viewport,
    pub layout_metrics: LayoutMetrics,
    pub x_domain: (f64, f64),
    pub scroll: ScrollState,
    pub rows: Vec<RowSnapshot>,
    pub segments: Vec<SegmentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub index: usize,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub key: SegmentKey,
    pub record_index: usize,
    /// Resting state the segment is heading to.
    pub target: SegmentVisual,
    pub exiting: bool,
}

impl<D, R: Renderer> TimelineEngine<D, R> {
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            viewport: self.config.viewport,
            layout_metrics: self.view.metrics,
            x_domain: self.view.scales.x.domain(),
            scroll: self.scroll,
            rows: self
                .view
                .rows
                .iter()
                .map(|(index, key, label)| RowSnapshot {
                    index,
                    key: key.to_owned(),
                    label: label.to_owned(),
                })
                .collect(),
            segments: self
                .layers
                .segments
                .iter()
                .map(|(key, element)| SegmentSnapshot {
                    key: key.clone(),
                    record_index: element.record_index,
                    target: element.visual.target(),
                    exiting: element.exiting,
                })
                .collect(),
        }
    }
}
