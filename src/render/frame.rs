use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{RectPrimitive, TextPrimitive};

/// Drawing layers in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Background,
    Rows,
    Segments,
    Labels,
    Scrollbar,
}

impl LayerKind {
    pub const CANONICAL_ORDER: [LayerKind; 5] = [
        LayerKind::Background,
        LayerKind::Rows,
        LayerKind::Segments,
        LayerKind::Labels,
        LayerKind::Scrollbar,
    ];
}

/// One translated group of primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFrame {
    pub kind: LayerKind,
    pub translate_x: f64,
    pub translate_y: f64,
    pub opacity: f64,
    pub pointer_events: bool,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerFrame {
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            translate_x: 0.0,
            translate_y: 0.0,
            opacity: 1.0,
            pointer_events: true,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn validate(&self) -> TimelineResult<()> {
        if !self.translate_x.is_finite() || !self.translate_y.is_finite() {
            return Err(TimelineError::InvalidData(
                "layer translation must be finite".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(TimelineError::InvalidData(
                "layer opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerFrame>,
}

impl RenderFrame {
    /// Empty frame with every layer present in canonical order.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: LayerKind::CANONICAL_ORDER
                .into_iter()
                .map(LayerFrame::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&LayerFrame> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut LayerFrame> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.viewport.ensure_valid()?;
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rect_count() == 0 && self.text_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerKind, RenderFrame};
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, RectRole};

    #[test]
    fn new_frame_uses_canonical_layer_order() {
        let frame = RenderFrame::new(Viewport::new(10, 10));
        let kinds: Vec<LayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
        assert_eq!(kinds, LayerKind::CANONICAL_ORDER.to_vec());
        assert!(frame.is_empty());
    }

    #[test]
    fn negative_rect_width_fails_validation() {
        let mut frame = RenderFrame::new(Viewport::new(10, 10));
        if let Some(layer) = frame.layer_mut(LayerKind::Segments) {
            layer.rects.push(RectPrimitive::new(
                RectRole::Segment { alternate: false },
                0.0,
                0.0,
                -1.0,
                4.0,
                Color::rgb(0.0, 0.0, 0.0),
            ));
        }
        assert!(frame.validate().is_err());
    }
}
