mod engine;
mod engine_config;
mod engine_snapshot;
mod frame_builder;
mod json_contract;
mod plugin_dispatch;
mod render_pass;
mod scroll_controller;
mod validation;

pub use engine::TimelineEngine;
pub use engine_config::{
    DEFAULT_DURATION_MS, DEFAULT_LABEL_FONT_SIZE_PX, DEFAULT_MAX_LABEL_WIDTH_PX,
    DEFAULT_ROW_HEIGHT_PX, TimelineConfig,
};
pub use engine_snapshot::{RowSnapshot, SegmentSnapshot, TimelineSnapshot};
pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use render_pass::RenderReport;
pub use scroll_controller::TickReport;
