//! Plot-area bleed resolution.
//!
//! Bleed is computed in two explicit phases. The measurement pass trims and
//! measures label text and yields only scalar sizes; the layout pass turns
//! those sizes plus the bar thickness into `LayoutMetrics`. Nothing from the
//! measurement pass is kept as visible output.

mod text;

pub use text::{ELLIPSIS, EstimatedTextMeasurer, TextMeasurer, trim_text};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

/// Gap between the label's right edge and the bar area.
pub const LABEL_MARGIN_PX: f64 = 5.0;
pub const SCROLLBAR_WIDTH_PX: f64 = 5.0;
pub const SCROLLBAR_MARGIN_PX: f64 = 5.0;
/// Compensates per-character width variance of truncated labels.
pub const LABEL_WIDTH_TOLERANCE: f64 = 1.15;

/// Extra margin around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayoutOptions {
    pub show_labels: bool,
    pub label_width: Option<f64>,
    pub max_label_width: f64,
    pub font_size_px: f64,
}

/// Output of the measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelMeasurement {
    /// Widest trimmed label as measured, before tolerance.
    pub widest_label_px: f64,
    /// Horizontal space reserved for labels, margin included.
    pub label_bleed_px: f64,
}

/// Measurement pass: sizes the label column without committing any layout.
#[must_use]
pub fn measure_label_bleed<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    options: LabelLayoutOptions,
    measurer: &dyn TextMeasurer,
) -> LabelMeasurement {
    if !options.show_labels {
        return LabelMeasurement::default();
    }

    if let Some(width) = options.label_width.filter(|width| *width > 0.0) {
        return LabelMeasurement {
            widest_label_px: width,
            label_bleed_px: width + LABEL_MARGIN_PX,
        };
    }

    // Scratch render of every label at the truncation width, dropped after measuring.
    let widths: SmallVec<[f64; 16]> = labels
        .into_iter()
        .map(|label| {
            let trimmed = trim_text(
                label,
                options.max_label_width,
                options.font_size_px,
                measurer,
            );
            measurer.text_width_px(&trimmed, options.font_size_px)
        })
        .collect();
    let widest_label_px = widths
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |value| value.0);

    let label_bleed_px = if widest_label_px > 0.0 {
        LABEL_WIDTH_TOLERANCE * widest_label_px + LABEL_MARGIN_PX
    } else {
        0.0
    };
    trace!(
        labels = widths.len(),
        widest_label_px, label_bleed_px, "measured label bleed"
    );

    LabelMeasurement {
        widest_label_px,
        label_bleed_px,
    }
}

/// Layout pass: combines label bleed with bar stroke half-widths and the scrollbar gutter.
#[must_use]
pub fn resolve_layout_metrics(measurement: LabelMeasurement, max_thickness: f64) -> LayoutMetrics {
    let half_stroke = max_thickness / 2.0;
    LayoutMetrics {
        top: 0.0,
        bottom: 0.0,
        left: half_stroke + measurement.label_bleed_px,
        right: half_stroke + SCROLLBAR_WIDTH_PX + SCROLLBAR_MARGIN_PX,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        EstimatedTextMeasurer, LabelLayoutOptions, LabelMeasurement, TextMeasurer,
        measure_label_bleed, resolve_layout_metrics,
    };

    struct Fixed(f64);

    impl TextMeasurer for Fixed {
        fn text_width_px(&self, text: &str, _font_size_px: f64) -> f64 {
            if text.is_empty() { 0.0 } else { self.0 }
        }
    }

    fn options() -> LabelLayoutOptions {
        LabelLayoutOptions {
            show_labels: true,
            label_width: None,
            max_label_width: 120.0,
            font_size_px: 12.0,
        }
    }

    #[test]
    fn disabled_labels_take_no_space() {
        let options = LabelLayoutOptions {
            show_labels: false,
            ..options()
        };
        let measured = measure_label_bleed(["anything"], options, &EstimatedTextMeasurer);
        assert_eq!(measured, LabelMeasurement::default());
    }

    #[test]
    fn fixed_width_adds_only_the_margin() {
        let options = LabelLayoutOptions {
            label_width: Some(70.0),
            ..options()
        };
        let measured = measure_label_bleed(["a", "b"], options, &Fixed(500.0));
        assert_relative_eq!(measured.label_bleed_px, 75.0);
    }

    #[test]
    fn measured_width_gets_tolerance_and_margin() {
        let measured = measure_label_bleed(["db", "cache"], options(), &Fixed(40.0));
        assert_relative_eq!(measured.widest_label_px, 40.0);
        assert_relative_eq!(measured.label_bleed_px, 40.0 * 1.15 + 5.0);
    }

    #[test]
    fn empty_labels_reserve_nothing() {
        let measured = measure_label_bleed(["", ""], options(), &Fixed(40.0));
        assert_relative_eq!(measured.label_bleed_px, 0.0);
        let none = measure_label_bleed(std::iter::empty(), options(), &Fixed(40.0));
        assert_relative_eq!(none.label_bleed_px, 0.0);
    }

    #[test]
    fn layout_metrics_split_thickness_across_both_sides() {
        let metrics = resolve_layout_metrics(
            LabelMeasurement {
                widest_label_px: 20.0,
                label_bleed_px: 28.0,
            },
            12.0,
        );
        assert_relative_eq!(metrics.left, 34.0);
        assert_relative_eq!(metrics.right, 16.0);
        assert_relative_eq!(metrics.top, 0.0);
    }
}
