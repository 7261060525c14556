use timeline_rs::TimelineError;
use timeline_rs::api::{
    DEFAULT_ROW_HEIGHT_PX, TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineConfig, TimelineEngine,
    TimelineSnapshot,
};
use timeline_rs::core::{TimelineAccessors, Viewport};
use timeline_rs::reconcile::SegmentKey;
use timeline_rs::render::NullRenderer;

#[derive(Debug, Clone)]
struct Job {
    name: &'static str,
    queue: &'static str,
    start: f64,
    length: f64,
}

fn accessors() -> TimelineAccessors<Job> {
    TimelineAccessors::new()
        .with_id(|job: &Job, _| Some(job.name.to_owned()))
        .with_type(|job: &Job, _| Some(job.queue.to_owned()))
        .with_start(|job: &Job, _| Some(job.start))
        .with_length(|job: &Job, _| Some(job.length))
}

fn jobs() -> Vec<Job> {
    vec![
        Job {
            name: "ingest",
            queue: "etl",
            start: 0.0,
            length: 12.0,
        },
        Job {
            name: "train",
            queue: "gpu",
            start: 8.0,
            length: 30.0,
        },
        Job {
            name: "report",
            queue: "etl",
            start: 40.0,
            length: 4.0,
        },
    ]
}

fn rendered_engine() -> TimelineEngine<Job, NullRenderer> {
    let config = TimelineConfig::new(Viewport::new(640, 200)).with_labels(true);
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), config, accessors()).expect("engine init");
    engine.set_data(jobs());
    engine.render(Some(0.0)).expect("render");
    engine
}

#[test]
fn timeline_config_json_roundtrip() {
    let config = TimelineConfig::new(Viewport::new(1024, 768))
        .with_row_height(18.0)
        .with_labels(true)
        .with_label_width(Some(64.0))
        .with_line_cap(true)
        .with_x_domain(Some((0.0, 3_600.0)));

    let json = config
        .to_json_pretty()
        .expect("config should serialize to json");
    let restored = TimelineConfig::from_json_str(&json).expect("config should deserialize");

    assert_eq!(restored, config);
}

#[test]
fn timeline_config_json_fills_defaults() {
    let config = TimelineConfig::from_json_str(r#"{"viewport":{"width":300,"height":120}}"#)
        .expect("config should deserialize");

    assert_eq!(config, TimelineConfig::new(Viewport::new(300, 120)));
    assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT_PX);
    assert!(config.alternating_row_colors);
    assert!(!config.show_labels);
}

#[test]
fn invalid_config_is_rejected_on_construction_and_update() {
    let err = TimelineEngine::new(
        NullRenderer::default(),
        TimelineConfig::new(Viewport::new(0, 100)),
        accessors(),
    )
    .err()
    .expect("zero viewport");
    assert!(matches!(
        err,
        TimelineError::InvalidViewport {
            width: 0,
            height: 100
        }
    ));

    let mut engine = rendered_engine();
    let bad_row_height = engine.config().with_row_height(0.0);
    let err = engine.set_config(bad_row_height).expect_err("row height");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let bad_duration = engine.config().with_duration_ms(f64::NAN);
    let err = engine.set_config(bad_duration).expect_err("duration");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let bad_domain = engine.config().with_x_domain(Some((0.0, f64::INFINITY)));
    let err = engine.set_config(bad_domain).expect_err("x domain");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let err = engine.render(Some(-5.0)).expect_err("custom duration");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    assert_eq!(engine.config().row_height, DEFAULT_ROW_HEIGHT_PX);
}

#[test]
fn snapshot_lists_rows_in_first_occurrence_order() {
    let engine = rendered_engine();
    let snapshot = engine.snapshot();

    let rows: Vec<(&str, usize)> = snapshot
        .rows
        .iter()
        .map(|row| (row.key.as_str(), row.index))
        .collect();
    assert_eq!(rows, vec![("etl", 0), ("gpu", 1)]);

    let keys: Vec<SegmentKey> = snapshot
        .segments
        .iter()
        .map(|segment| segment.key.clone())
        .collect();
    assert_eq!(
        keys,
        vec![
            SegmentKey::new("ingest"),
            SegmentKey::new("train"),
            SegmentKey::new("report"),
        ]
    );
    assert_eq!(snapshot.x_domain, (0.0, 44.0));
    assert!(snapshot.segments.iter().all(|segment| !segment.exiting));
}

#[test]
fn snapshot_json_contract_roundtrip() {
    let engine = rendered_engine();
    let snapshot = engine.snapshot();

    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let restored = TimelineSnapshot::from_json_compat_str(&json).expect("contract parses");
    assert_eq!(restored, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare snapshot serializes");
    let restored = TimelineSnapshot::from_json_compat_str(&bare).expect("bare snapshot parses");
    assert_eq!(restored, snapshot);
}

#[test]
fn snapshot_json_contract_rejects_unknown_schema() {
    let engine = rendered_engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    let bumped = json.replace(
        &format!("\"schema_version\": {TIMELINE_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );

    let err = TimelineSnapshot::from_json_compat_str(&bumped).expect_err("unknown schema");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    let err = TimelineSnapshot::from_json_compat_str("not json").expect_err("garbage");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn null_renderer_sees_every_layer() {
    let engine = rendered_engine();
    let renderer = engine.into_renderer();

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_segment_count, 3);
    assert_eq!(renderer.last_text_count, 2);
    let frame = renderer.last_frame.expect("frame");
    assert_eq!(frame.layers.len(), 5);
    // background + 9 rows + 3 segments + track + handle
    assert_eq!(frame.rect_count(), 1 + 9 + 3 + 2);
}
