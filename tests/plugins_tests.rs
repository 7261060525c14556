use std::cell::RefCell;
use std::rc::Rc;

use timeline_rs::TimelineError;
use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{TimelineAccessors, Viewport};
use timeline_rs::extensions::{PluginContext, TimelineEvent, TimelinePlugin};
use timeline_rs::interaction::ScrollSource;
use timeline_rs::render::NullRenderer;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(TimelineEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(
        id: impl Into<String>,
        events: Rc<RefCell<Vec<(TimelineEvent, PluginContext)>>>,
    ) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl TimelinePlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &TimelineEvent, context: PluginContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &TimelineEvent) -> &'static str {
    match event {
        TimelineEvent::DataUpdated { .. } => "data",
        TimelineEvent::ConfigUpdated => "config",
        TimelineEvent::Rendered { .. } => "rendered",
        TimelineEvent::Scrolled { .. } => "scrolled",
        TimelineEvent::SegmentRemoved { .. } => "removed",
        TimelineEvent::TransitionsSettled => "settled",
        TimelineEvent::PointerEventsRestored => "pointer_restored",
    }
}

#[derive(Debug, Clone)]
struct Span {
    id: u32,
    kind: &'static str,
    start: f64,
}

fn accessors() -> TimelineAccessors<Span> {
    TimelineAccessors::new()
        .with_id(|span: &Span, _| Some(span.id.to_string()))
        .with_type(|span: &Span, _| Some(span.kind.to_owned()))
        .with_start(|span: &Span, _| Some(span.start))
        .with_length(|_: &Span, _| Some(2.0))
}

fn spans(count: u32) -> Vec<Span> {
    (0..count)
        .map(|id| Span {
            id,
            kind: if id % 2 == 0 { "even" } else { "odd" },
            start: f64::from(id),
        })
        .collect()
}

fn engine() -> TimelineEngine<Span, NullRenderer> {
    let config = TimelineConfig::new(Viewport::new(600, 30))
        .with_row_height(20.0)
        .with_duration_ms(100.0);
    TimelineEngine::new(NullRenderer::default(), config, accessors()).expect("engine init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.set_data(spans(4));
    engine.render(None).expect("render");
    engine.wheel(5.0).expect("wheel");
    engine.tick(100.0).expect("tick");
    engine.set_data(spans(2));
    engine.render(None).expect("render");
    engine.tick(300.0).expect("tick");

    let kinds: Vec<&str> = events
        .borrow()
        .iter()
        .map(|(event, _)| event_kind(event))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "data",
            "rendered",
            "scrolled",
            "settled",
            "data",
            "rendered",
            "removed",
            "removed",
            "pointer_restored",
            "settled",
        ]
    );
}

#[test]
fn plugin_context_reflects_engine_state() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.set_data(spans(3));
    engine.render(Some(0.0)).expect("render");
    engine.wheel(4.0).expect("wheel");

    let recorded = events.borrow();
    let (event, context) = recorded.last().expect("scroll event");
    assert_eq!(
        *event,
        TimelineEvent::Scrolled {
            distance: 4.0,
            source: ScrollSource::Wheel,
        }
    );
    assert_eq!(context.records_len, 3);
    assert_eq!(context.rows_len, 2);
    assert_eq!(context.segments_len, 3);
    assert_eq!(context.viewport, Viewport::new(600, 30));
    assert!(context.scroll.is_scrollable());
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events)))
        .expect_err("duplicate id");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    assert!(engine.unregister_plugin("recorder"));
    assert!(!engine.unregister_plugin("recorder"));
}

#[test]
fn config_updates_are_announced() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let config = engine.config().with_labels(true);
    engine.set_config(config).expect("set config");

    let recorded = events.borrow();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, TimelineEvent::ConfigUpdated);
}
