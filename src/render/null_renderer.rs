use crate::error::TimelineResult;
use crate::render::{LayerKind, RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch invalid geometry without
/// a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub last_segment_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rect_count();
        self.last_text_count = frame.text_count();
        self.last_segment_count = frame
            .layer(LayerKind::Segments)
            .map_or(0, |layer| layer.rects.len());
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
