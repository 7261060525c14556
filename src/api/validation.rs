use crate::error::{TimelineError, TimelineResult};

use super::TimelineConfig;

pub(super) fn validate_config(config: TimelineConfig) -> TimelineResult<TimelineConfig> {
    config.viewport.ensure_valid()?;

    if !config.row_height.is_finite() || config.row_height <= 0.0 {
        return Err(TimelineError::InvalidConfig(
            "row_height must be finite and > 0".to_owned(),
        ));
    }
    if !config.duration_ms.is_finite() || config.duration_ms < 0.0 {
        return Err(TimelineError::InvalidConfig(
            "duration_ms must be finite and >= 0".to_owned(),
        ));
    }
    if !config.max_label_width.is_finite() || config.max_label_width < 0.0 {
        return Err(TimelineError::InvalidConfig(
            "max_label_width must be finite and >= 0".to_owned(),
        ));
    }
    if let Some(label_width) = config.label_width {
        if !label_width.is_finite() || label_width < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "label_width must be finite and >= 0".to_owned(),
            ));
        }
    }
    if !config.label_font_size_px.is_finite() || config.label_font_size_px <= 0.0 {
        return Err(TimelineError::InvalidConfig(
            "label_font_size_px must be finite and > 0".to_owned(),
        ));
    }
    if let Some((start, end)) = config.x_domain {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimelineError::InvalidConfig(
                "x_domain bounds must be finite".to_owned(),
            ));
        }
    }

    Ok(config)
}

/// Rejects non-finite pointer/wheel deltas before they reach scroll state.
pub(super) fn validate_scroll_delta(delta: f64, what: &str) -> TimelineResult<f64> {
    if !delta.is_finite() {
        return Err(TimelineError::InvalidData(format!("{what} must be finite")));
    }
    Ok(delta)
}

pub(super) fn validate_tick(dt_ms: f64) -> TimelineResult<f64> {
    if !dt_ms.is_finite() || dt_ms < 0.0 {
        return Err(TimelineError::InvalidData(
            "tick delta must be finite and >= 0".to_owned(),
        ));
    }
    Ok(dt_ms)
}

pub(super) fn validate_custom_duration(duration_ms: Option<f64>) -> TimelineResult<Option<f64>> {
    match duration_ms {
        Some(duration) if !duration.is_finite() || duration < 0.0 => Err(
            TimelineError::InvalidData("custom duration must be finite and >= 0".to_owned()),
        ),
        other => Ok(other),
    }
}
