use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::warn;

use crate::error::{TimelineError, TimelineResult};
use crate::layout::{EstimatedTextMeasurer, TextMeasurer};
use crate::render::{
    Color, LayerFrame, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub layers_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer backend drawing into an image surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> TimelineResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TimelineError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> TimelineResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Draws `frame` onto a caller-owned context, e.g. a window surface.
    pub fn render_on_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TimelineResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color, 1.0);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            draw_layer(context, layer, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_on_context(&context, frame)
    }
}

/// Measures label text with Pango so bleed matches what the Cairo backend draws.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    surface: ImageSurface,
    font_family: String,
}

impl PangoTextMeasurer {
    pub fn new(font_family: impl Into<String>) -> TimelineResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measurement surface", err))?;
        Ok(Self {
            surface,
            font_family: font_family.into(),
        })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        let context = match Context::new(&self.surface) {
            Ok(context) => context,
            Err(err) => {
                warn!(error = %err, "pango measurement unavailable, using estimate");
                return EstimatedTextMeasurer.text_width_px(text, font_size_px);
            }
        };
        let layout = pangocairo::functions::create_layout(&context);
        let font_description =
            FontDescription::from_string(&format!("{} {}px", self.font_family, font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);
        let (width, _height) = layout.pixel_size();
        f64::from(width)
    }
}

fn draw_layer(
    context: &Context,
    layer: &LayerFrame,
    stats: &mut CairoRenderStats,
) -> TimelineResult<()> {
    if layer.opacity <= 0.0 {
        return Ok(());
    }

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(layer.translate_x, layer.translate_y);

    for rect in &layer.rects {
        let alpha = rect.opacity * layer.opacity;
        if alpha <= 0.0 {
            continue;
        }
        append_rect_path(context, rect);
        apply_color(context, rect.fill, alpha);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_drawn += 1;
    }

    for text in &layer.texts {
        draw_text(context, text, layer.opacity);
        stats.texts_drawn += 1;
    }

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    stats.layers_drawn += 1;
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive, opacity: f64) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = text.y - f64::from(text_height) / 2.0;

    apply_color(context, text.color, opacity);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn append_rect_path(context: &Context, rect: &RectPrimitive) {
    let top = rect.y + rect.translate_y;
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, top, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let right = rect.x + rect.width;
    let bottom = top + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> TimelineError {
    TimelineError::InvalidData(format!("{prefix}: {err}"))
}
