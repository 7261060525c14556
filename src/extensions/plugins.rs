use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::{ScrollActivity, ScrollSource, ScrollState};
use crate::reconcile::{JoinCounts, SegmentKey};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub records_len: usize,
    pub rows_len: usize,
    pub segments_len: usize,
    pub scroll: ScrollState,
    pub scroll_activity: ScrollActivity,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    DataUpdated {
        records_len: usize,
    },
    ConfigUpdated,
    Rendered {
        labels: JoinCounts,
        rows: JoinCounts,
        segments: JoinCounts,
    },
    Scrolled {
        distance: f64,
        source: ScrollSource,
    },
    SegmentRemoved {
        key: SegmentKey,
    },
    /// Every running transition finished during the last tick.
    TransitionsSettled,
    PointerEventsRestored,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals directly.
pub trait TimelinePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &TimelineEvent, context: PluginContext);
}
