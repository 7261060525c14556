use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    pub fn validate(self) -> TimelineResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TimelineError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Categorical fallback palette used when no color accessor resolves.
#[must_use]
pub fn palette_color(index: usize) -> Color {
    match index % 6 {
        0 => Color::rgb8(0x4d, 0x8c, 0xfd),
        1 => Color::rgb8(0xff, 0x6b, 0x7e),
        2 => Color::rgb8(0xf4, 0xb8, 0x3e),
        3 => Color::rgb8(0xa6, 0xcc, 0x74),
        4 => Color::rgb8(0x00, 0xc1, 0x9a),
        _ => Color::rgb8(0x68, 0x59, 0xbe),
    }
}

/// Role of a rectangle inside its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectRole {
    /// Invisible event target covering the whole component.
    Background,
    Row { alternate: bool },
    Segment { alternate: bool },
    ScrollbarTrack,
    ScrollbarHandle,
}

/// Draw command for one rectangle in layer-local pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub role: RectRole,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: Color,
    pub opacity: f64,
    /// Per-element vertical offset, used by the enter nudge of segments.
    pub translate_y: f64,
    pub cursor: Option<String>,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(role: RectRole, x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            role,
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            fill,
            opacity: 1.0,
            translate_y: 0.0,
            cursor: None,
        }
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.translate_y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(TimelineError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(TimelineError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(TimelineError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(TimelineError::InvalidData(
                "rect opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label; `y` is the vertical center of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.text.is_empty() {
            return Err(TimelineError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TimelineError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
