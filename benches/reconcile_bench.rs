use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{TimelineAccessors, Viewport};
use timeline_rs::reconcile::{SegmentKey, keyed_join, segment_keys};
use timeline_rs::render::NullRenderer;

#[derive(Debug, Clone)]
struct Event {
    id: usize,
    lane: usize,
    start: f64,
    length: f64,
}

fn events(count: usize, lanes: usize) -> Vec<Event> {
    (0..count)
        .map(|id| Event {
            id,
            lane: id % lanes,
            start: (id * 7 % 1_000) as f64,
            length: (id % 13 + 1) as f64,
        })
        .collect()
}

fn accessors() -> TimelineAccessors<Event> {
    TimelineAccessors::new()
        .with_id(|event: &Event, _| Some(event.id.to_string()))
        .with_type(|event: &Event, _| Some(format!("lane {}", event.lane)))
        .with_start(|event: &Event, _| Some(event.start))
        .with_length(|event: &Event, _| Some(event.length))
}

fn bench_keyed_join_10k(c: &mut Criterion) {
    let existing_ids: Vec<String> = (0..10_000).map(|i: usize| i.to_string()).collect();
    let existing: indexmap::IndexMap<SegmentKey, ()> =
        segment_keys(existing_ids.iter().map(String::as_str))
            .into_iter()
            .map(|key| (key, ()))
            .collect();
    let incoming_ids: Vec<String> = (5_000..15_000).map(|i: usize| i.to_string()).collect();
    let incoming = segment_keys(incoming_ids.iter().map(String::as_str));

    c.bench_function("keyed_join_10k", |b| {
        b.iter(|| {
            let _ = keyed_join(black_box(&existing), black_box(&incoming));
        })
    });
}

fn bench_full_render_5k(c: &mut Criterion) {
    let config = TimelineConfig::new(Viewport::new(1920, 1080)).with_labels(true);
    let mut engine = TimelineEngine::new(NullRenderer::default(), config, accessors())
        .expect("engine init");
    engine.set_data(events(5_000, 120));
    engine.render(Some(0.0)).expect("warm render");

    c.bench_function("full_render_5k_update", |b| {
        b.iter(|| {
            let _ = engine.render(black_box(Some(0.0))).expect("render");
        })
    });
}

fn bench_wheel_and_tick(c: &mut Criterion) {
    let config = TimelineConfig::new(Viewport::new(1280, 400));
    let mut engine = TimelineEngine::new(NullRenderer::default(), config, accessors())
        .expect("engine init");
    engine.set_data(events(2_000, 200));
    engine.render(None).expect("render");

    c.bench_function("wheel_then_tick_2k", |b| {
        b.iter(|| {
            let _ = engine.wheel(black_box(12.0)).expect("wheel");
            let _ = engine.tick(black_box(16.0)).expect("tick");
        })
    });
}

criterion_group!(
    benches,
    bench_keyed_join_10k,
    bench_full_render_5k,
    bench_wheel_and_tick
);
criterion_main!(benches);
