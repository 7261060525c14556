use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_ROW_HEIGHT_PX: f64 = 22.0;
pub const DEFAULT_MAX_LABEL_WIDTH_PX: f64 = 120.0;
pub const DEFAULT_LABEL_FONT_SIZE_PX: f64 = 12.0;
pub const DEFAULT_DURATION_MS: f64 = 600.0;

/// Public engine configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup. Per-datum accessors live in `TimelineAccessors` because they are
/// closures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_row_height_px")]
    pub row_height: f64,
    #[serde(default)]
    pub show_labels: bool,
    /// Fixed label column width; when unset the column is sized by measuring labels.
    #[serde(default)]
    pub label_width: Option<f64>,
    #[serde(default = "default_max_label_width_px")]
    pub max_label_width: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_alternating_row_colors")]
    pub alternating_row_colors: bool,
    #[serde(default)]
    pub show_empty_segments: bool,
    /// Rounded segment caps.
    #[serde(default)]
    pub line_cap: bool,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Horizontal domain override; defaults to the data extent.
    #[serde(default)]
    pub x_domain: Option<(f64, f64)>,
}

impl TimelineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            row_height: default_row_height_px(),
            show_labels: false,
            label_width: None,
            max_label_width: default_max_label_width_px(),
            label_font_size_px: default_label_font_size_px(),
            alternating_row_colors: default_alternating_row_colors(),
            show_empty_segments: false,
            line_cap: false,
            duration_ms: default_duration_ms(),
            x_domain: None,
        }
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    #[must_use]
    pub fn with_label_width(mut self, label_width: Option<f64>) -> Self {
        self.label_width = label_width;
        self
    }

    #[must_use]
    pub fn with_max_label_width(mut self, max_label_width: f64) -> Self {
        self.max_label_width = max_label_width;
        self
    }

    #[must_use]
    pub fn with_alternating_row_colors(mut self, enabled: bool) -> Self {
        self.alternating_row_colors = enabled;
        self
    }

    #[must_use]
    pub fn with_empty_segments(mut self, show_empty_segments: bool) -> Self {
        self.show_empty_segments = show_empty_segments;
        self
    }

    #[must_use]
    pub fn with_line_cap(mut self, line_cap: bool) -> Self {
        self.line_cap = line_cap;
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_x_domain(mut self, x_domain: Option<(f64, f64)>) -> Self {
        self.x_domain = x_domain;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_row_height_px() -> f64 {
    DEFAULT_ROW_HEIGHT_PX
}

fn default_max_label_width_px() -> f64 {
    DEFAULT_MAX_LABEL_WIDTH_PX
}

fn default_label_font_size_px() -> f64 {
    DEFAULT_LABEL_FONT_SIZE_PX
}

fn default_alternating_row_colors() -> bool {
    true
}

fn default_duration_ms() -> f64 {
    DEFAULT_DURATION_MS
}
