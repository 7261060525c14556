mod frame;
mod null_renderer;
mod primitives;

pub use frame::{LayerFrame, LayerKind, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, RectPrimitive, RectRole, TextHAlign, TextPrimitive, palette_color,
};

use crate::error::TimelineResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` holding the current
/// interpolated state, so drawing code stays isolated from reconciliation
/// and scroll logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer, PangoTextMeasurer};
