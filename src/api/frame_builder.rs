use crate::core::ScaleProvider;
use crate::error::TimelineResult;
use crate::layout::SCROLLBAR_WIDTH_PX;
use crate::render::{
    Color, LayerKind, RectPrimitive, RectRole, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::TimelineEngine;

const BACKGROUND_FILL: Color = Color::rgba(1.0, 1.0, 1.0, 0.0);
const ROW_FILL: Color = Color::rgba(1.0, 1.0, 1.0, 0.0);
const ROW_ALTERNATE_FILL: Color = Color::rgb(0.965, 0.965, 0.973);
const LABEL_COLOR: Color = Color::rgb(0.42, 0.45, 0.5);
const SCROLLBAR_TRACK_FILL: Color = Color::rgb(0.9, 0.9, 0.92);
const SCROLLBAR_HANDLE_FILL: Color = Color::rgb(0.65, 0.66, 0.7);

impl<D, R: Renderer> TimelineEngine<D, R> {
    /// Builds the backend-agnostic scene for the current state.
    ///
    /// Segment visuals are read at their current interpolated value, so a
    /// frame built mid-transition shows the in-between state.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        let content_offset = -self.scroll.scroll_distance;

        if let Some(layer) = frame.layer_mut(LayerKind::Background) {
            layer.rects.push(
                RectPrimitive::new(
                    RectRole::Background,
                    0.0,
                    0.0,
                    viewport.width_px(),
                    viewport.height_px(),
                    BACKGROUND_FILL,
                )
                .with_opacity(0.0),
            );
        }

        if let Some(layer) = frame.layer_mut(LayerKind::Rows) {
            layer.translate_y = content_offset;
            layer.rects = self
                .layers
                .rows
                .rows()
                .iter()
                .map(|row| {
                    let fill = if row.alternate {
                        ROW_ALTERNATE_FILL
                    } else {
                        ROW_FILL
                    };
                    RectPrimitive::new(
                        RectRole::Row {
                            alternate: row.alternate,
                        },
                        row.x,
                        row.y,
                        row.width,
                        row.height,
                        fill,
                    )
                })
                .collect();
        }

        if let Some(layer) = frame.layer_mut(LayerKind::Segments) {
            layer.translate_y = content_offset;
            layer.pointer_events = self.input.segments_accept_pointer();
            layer.rects = self
                .layers
                .segments
                .iter()
                .map(|(_, element)| {
                    let visual = element.visual.current();
                    RectPrimitive {
                        role: RectRole::Segment {
                            alternate: element.alternate,
                        },
                        x: visual.x,
                        y: visual.y,
                        width: visual.width.max(0.0),
                        height: visual.height.max(0.0),
                        corner_radius: visual.corner_radius.max(0.0),
                        fill: visual.fill,
                        opacity: visual.opacity.clamp(0.0, 1.0),
                        translate_y: visual.translate_y,
                        cursor: element.cursor.clone(),
                    }
                })
                .collect();
        }

        if let Some(layer) = frame.layer_mut(LayerKind::Labels) {
            layer.translate_y = content_offset;
            let font_size = self.config.label_font_size_px;
            layer.texts = self
                .layers
                .labels
                .iter()
                .filter(|(_, label)| !label.text.is_empty())
                .map(|(_, label)| {
                    TextPrimitive::new(
                        label.text.clone(),
                        label.x,
                        label.y,
                        font_size,
                        LABEL_COLOR,
                        TextHAlign::Right,
                    )
                })
                .collect();
        }

        if let Some(layer) = frame.layer_mut(LayerKind::Scrollbar) {
            let plot_height = self.view.scales.y_height();
            let radius = SCROLLBAR_WIDTH_PX / 2.0;
            layer.translate_x = viewport.width_px() - SCROLLBAR_WIDTH_PX;
            layer.translate_y = self.view.scales.y_start();
            layer.opacity = if self.scroll.is_scrollable() { 1.0 } else { 0.0 };
            layer.rects.push(
                RectPrimitive::new(
                    RectRole::ScrollbarTrack,
                    0.0,
                    0.0,
                    SCROLLBAR_WIDTH_PX,
                    plot_height,
                    SCROLLBAR_TRACK_FILL,
                )
                .with_corner_radius(radius),
            );
            layer.rects.push(
                RectPrimitive::new(
                    RectRole::ScrollbarHandle,
                    0.0,
                    self.scroll.handle_position(),
                    SCROLLBAR_WIDTH_PX,
                    self.scroll.handle_height,
                    SCROLLBAR_HANDLE_FILL,
                )
                .with_corner_radius(radius),
            );
        }

        frame
    }

    pub(super) fn present(&mut self) -> TimelineResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }
}
