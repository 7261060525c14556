use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::SegmentVisual;
use crate::core::{
    GeometryPolicy, RowAssignment, ScaleProvider, XYScales, max_thickness,
    resolve_segment_geometry, row_top, x_extent,
};
use crate::error::TimelineResult;
use crate::extensions::TimelineEvent;
use crate::layout::{
    LABEL_MARGIN_PX, LabelLayoutOptions, measure_label_bleed, resolve_layout_metrics, trim_text,
};
use crate::reconcile::{
    JoinPartition, LabelElement, RowBackground, SegmentKey, SegmentTarget, segment_keys,
};
use crate::render::{Renderer, palette_color};

use super::TimelineEngine;
use super::validation::validate_custom_duration;

/// Horizontal domain used when there is no data and no override.
const EMPTY_X_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Outcome of one full render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub duration_ms: f64,
    pub labels: JoinPartition<String>,
    pub rows: JoinPartition<usize>,
    pub segments: JoinPartition<SegmentKey>,
    /// Segments whose scaled width was negative and got clamped.
    pub negative_width_segments: usize,
    /// Exiting segments dropped right away because the duration was 0.
    pub removed_segments: Vec<SegmentKey>,
}

impl<D, R: Renderer> TimelineEngine<D, R> {
    /// Runs the full pipeline: rows, bleed, scales, the three joins and the
    /// scrollbar, then presents a frame.
    ///
    /// `custom_duration_ms` overrides the configured transition duration for
    /// this pass only.
    pub fn render(&mut self, custom_duration_ms: Option<f64>) -> TimelineResult<RenderReport> {
        let duration_ms =
            validate_custom_duration(custom_duration_ms)?.unwrap_or(self.config.duration_ms);

        let rows = RowAssignment::assign(&self.records);
        let max_thickness = max_thickness(&self.records);

        let measurement = measure_label_bleed(
            rows.labels(),
            self.label_layout_options(),
            self.measurer.as_ref(),
        );
        let metrics = resolve_layout_metrics(measurement, max_thickness);

        let x_domain = self
            .config
            .x_domain
            .or_else(|| x_extent(&self.records))
            .unwrap_or(EMPTY_X_DOMAIN);
        let scales = XYScales::for_plot(self.config.viewport, metrics, x_domain)?;
        trace!(?metrics, ?x_domain, rows = rows.len(), "resolved timeline layout");

        let labels = self.join_labels(&rows, &scales, max_thickness);
        let row_partition = self.join_rows(&rows, &scales, max_thickness);
        let (segments, negative_width_segments) = self.join_segments(&rows, &scales, duration_ms);
        let removed_segments = self.layers.segments.drain_finished_exits();

        self.view.rows = rows;
        self.view.metrics = metrics;
        self.view.scales = scales;
        self.view.max_thickness = max_thickness;

        self.scroll
            .update_bounds(scales.y_height(), self.layers.rows.content_height());
        self.scroll.apply_delta(0.0);

        let report = RenderReport {
            duration_ms,
            labels,
            rows: row_partition,
            segments,
            negative_width_segments,
            removed_segments,
        };
        debug!(
            labels = ?report.labels.counts(),
            rows = ?report.rows.counts(),
            segments = ?report.segments.counts(),
            negative_width_segments,
            max_scroll = self.scroll.max_scroll,
            "rendered timeline"
        );

        self.emit_event(TimelineEvent::Rendered {
            labels: report.labels.counts(),
            rows: report.rows.counts(),
            segments: report.segments.counts(),
        });
        for key in &report.removed_segments {
            self.emit_event(TimelineEvent::SegmentRemoved { key: key.clone() });
        }

        self.present()?;
        Ok(report)
    }

    fn label_layout_options(&self) -> LabelLayoutOptions {
        LabelLayoutOptions {
            show_labels: self.config.show_labels,
            label_width: self.config.label_width,
            max_label_width: self.config.max_label_width,
            font_size_px: self.config.label_font_size_px,
        }
    }

    fn join_labels(
        &mut self,
        rows: &RowAssignment,
        scales: &XYScales,
        max_thickness: f64,
    ) -> JoinPartition<String> {
        if !self.config.show_labels {
            return self.layers.labels.reconcile(Vec::new());
        }

        let trim_width = self
            .config
            .label_width
            .filter(|width| *width > 0.0)
            .unwrap_or(self.config.max_label_width);
        let font_size = self.config.label_font_size_px;
        let x = scales.x_range().0 - max_thickness / 2.0 - LABEL_MARGIN_PX;
        let row_height = self.config.row_height;

        // Synthetic labels can repeat a real type's text; repeats get `#n`.
        let keys = segment_keys(rows.iter().map(|(_, _, label)| label));
        let targets = rows
            .iter()
            .zip(keys)
            .map(|((index, _, label), key)| {
                let element = LabelElement {
                    text: trim_text(label, trim_width, font_size, self.measurer.as_ref()),
                    x,
                    y: row_top(scales, index, row_height) + row_height / 2.0,
                };
                (key.to_string(), element)
            })
            .collect();
        self.layers.labels.reconcile(targets)
    }

    fn join_rows(
        &mut self,
        rows: &RowAssignment,
        scales: &XYScales,
        max_thickness: f64,
    ) -> JoinPartition<usize> {
        let row_height = self.config.row_height;
        let fitting = (scales.y_height() / row_height).floor().max(0.0) as usize;
        let count = fitting.max(rows.len());

        let (x_start, x_end) = scales.x_range();
        let x = x_start - max_thickness / 2.0;
        let width = (x_end - x_start + max_thickness).max(0.0);
        let alternating = self.config.alternating_row_colors;

        let backgrounds = (0..count)
            .map(|index| RowBackground {
                x,
                y: row_top(scales, index, row_height),
                width,
                height: row_height,
                alternate: alternating && index % 2 == 0,
            })
            .collect();
        self.layers.rows.reconcile(backgrounds)
    }

    fn join_segments(
        &mut self,
        rows: &RowAssignment,
        scales: &XYScales,
        duration_ms: f64,
    ) -> (JoinPartition<SegmentKey>, usize) {
        let policy = GeometryPolicy {
            row_height: self.config.row_height,
            show_empty_segments: self.config.show_empty_segments,
            line_cap: self.config.line_cap,
        };
        let alternating = self.config.alternating_row_colors;
        let keys = segment_keys(self.records.iter().map(|record| record.key.as_str()));

        let mut negative_widths = 0;
        let mut targets = Vec::with_capacity(self.records.len());
        for (record, key) in self.records.iter().zip(keys) {
            let Some(row_index) = rows.row_of(&record.row_key) else {
                continue;
            };
            let resolved = resolve_segment_geometry(record, row_index, scales, policy);
            if resolved.clamped {
                negative_widths += 1;
            }
            let geometry = resolved.geometry;

            targets.push(SegmentTarget {
                key,
                record_index: record.index,
                resting: SegmentVisual {
                    x: geometry.x,
                    y: geometry.y,
                    width: geometry.width,
                    height: geometry.height,
                    corner_radius: geometry.corner_radius.unwrap_or(0.0),
                    translate_y: 0.0,
                    opacity: 1.0,
                    fill: record.color.unwrap_or_else(|| palette_color(row_index)),
                },
                enter_fill: record.color.unwrap_or_else(|| palette_color(record.index)),
                alternate: alternating && row_index % 2 == 0,
                cursor: record.cursor.clone(),
            });
        }

        let partition = self.layers.segments.reconcile(targets, duration_ms);
        (partition, negative_widths)
    }
}
