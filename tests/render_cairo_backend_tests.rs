#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use timeline_rs::TimelineError;
use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{TimelineAccessors, Viewport};
use timeline_rs::layout::TextMeasurer;
use timeline_rs::render::{CairoRenderer, PangoTextMeasurer};

#[derive(Debug, Clone)]
struct Shift {
    worker: &'static str,
    start: f64,
    hours: f64,
}

fn accessors() -> TimelineAccessors<Shift> {
    TimelineAccessors::new()
        .with_type(|shift: &Shift, _| Some(shift.worker.to_owned()))
        .with_start(|shift: &Shift, _| Some(shift.start))
        .with_length(|shift: &Shift, _| Some(shift.hours))
}

fn shifts() -> Vec<Shift> {
    vec![
        Shift {
            worker: "ana",
            start: 8.0,
            hours: 8.0,
        },
        Shift {
            worker: "bo",
            start: 12.0,
            hours: 6.0,
        },
        Shift {
            worker: "ana",
            start: 20.0,
            hours: 2.0,
        },
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_rows_segments_and_labels() {
    let renderer = CairoRenderer::new(600, 120).expect("renderer");
    let config = TimelineConfig::new(Viewport::new(600, 120)).with_labels(true);
    let mut engine = TimelineEngine::new(renderer, config, accessors()).expect("engine init");
    engine.set_text_measurer(PangoTextMeasurer::new("Sans").expect("measurer"));
    engine.set_data(shifts());

    engine.render(Some(0.0)).expect("render");
    let stats = engine.renderer().last_stats();

    // scrollbar and background are fully transparent and skipped
    assert_eq!(stats.texts_drawn, 2);
    assert!(stats.rects_drawn >= 3 + 3);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(400, 200).expect("renderer");
    let config = TimelineConfig::new(Viewport::new(400, 200));
    let mut engine = TimelineEngine::new(renderer, config, accessors()).expect("engine init");
    engine.set_data(shifts());
    engine.render(Some(0.0)).expect("render");

    let frame = engine.frame();
    let surface = ImageSurface::create(Format::ARgb32, 400, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = engine.into_renderer();
    renderer
        .render_on_context(&context, &frame)
        .expect("render on external context");
    assert!(renderer.last_stats().layers_drawn >= 3);
}

#[test]
fn pango_measurer_grows_with_text() {
    let measurer = PangoTextMeasurer::new("Sans").expect("measurer");
    let short = measurer.text_width_px("ab", 12.0);
    let long = measurer.text_width_px("abcdefgh", 12.0);
    assert!(short > 0.0);
    assert!(long > short);
}
