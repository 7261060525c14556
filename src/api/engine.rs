use tracing::debug;

use crate::core::{
    Record, RowAssignment, ScaleProvider, TimelineAccessors, Viewport, XYScales, resolve_records,
};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{TimelineEvent, TimelinePlugin};
use crate::interaction::{InputAdapter, ScrollActivity, ScrollState};
use crate::layout::{EstimatedTextMeasurer, LayoutMetrics, TextMeasurer};
use crate::reconcile::{LabelLayer, RowLayer, SegmentLayer};
use crate::render::Renderer;

use super::TimelineConfig;
use super::validation::validate_config;

/// View state derived by the last full render.
#[derive(Debug, Clone)]
pub(super) struct TimelineView {
    pub(super) rows: RowAssignment,
    pub(super) metrics: LayoutMetrics,
    pub(super) scales: XYScales,
    pub(super) max_thickness: f64,
}

#[derive(Debug, Clone, Default)]
pub(super) struct TimelineLayers {
    pub(super) labels: LabelLayer,
    pub(super) rows: RowLayer,
    pub(super) segments: SegmentLayer,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns a copy of the caller's data, derives records, rows,
/// bleed and scales from it on every render, reconciles the three visual
/// layers and keeps the virtual scroll state. All mutation goes through
/// `&mut self`, so a render can never be re-entered while one is running.
pub struct TimelineEngine<D, R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineConfig,
    pub(super) accessors: TimelineAccessors<D>,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) data: Vec<D>,
    pub(super) records: Vec<Record>,
    pub(super) view: TimelineView,
    pub(super) layers: TimelineLayers,
    pub(super) scroll: ScrollState,
    pub(super) input: InputAdapter,
    pub(super) on_scroll: Option<Box<dyn FnMut(f64)>>,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
}

impl<D, R: Renderer> TimelineEngine<D, R> {
    pub fn new(
        renderer: R,
        config: TimelineConfig,
        accessors: TimelineAccessors<D>,
    ) -> TimelineResult<Self> {
        let config = validate_config(config)?;
        let scales = XYScales::for_plot(config.viewport, LayoutMetrics::default(), (0.0, 1.0))?;

        Ok(Self {
            renderer,
            config,
            accessors,
            measurer: Box::new(EstimatedTextMeasurer),
            data: Vec::new(),
            records: Vec::new(),
            view: TimelineView {
                rows: RowAssignment::default(),
                metrics: LayoutMetrics::default(),
                scales,
                max_thickness: 0.0,
            },
            layers: TimelineLayers::default(),
            scroll: ScrollState::default(),
            input: InputAdapter::default(),
            on_scroll: None,
            plugins: Vec::new(),
        })
    }

    /// Replaces the data set. Takes effect on the next `render`.
    pub fn set_data(&mut self, data: Vec<D>) {
        self.data = data;
        self.refresh_records();
        debug!(
            data_len = self.data.len(),
            records_len = self.records.len(),
            "set timeline data"
        );
        self.emit_event(TimelineEvent::DataUpdated {
            records_len: self.records.len(),
        });
    }

    /// Replaces the configuration. Takes effect on the next `render`.
    pub fn set_config(&mut self, config: TimelineConfig) -> TimelineResult<()> {
        self.config = validate_config(config)?;
        debug!(?config, "set timeline config");
        self.emit_event(TimelineEvent::ConfigUpdated);
        Ok(())
    }

    pub fn set_accessors(&mut self, accessors: TimelineAccessors<D>) {
        self.accessors = accessors;
        self.refresh_records();
        self.emit_event(TimelineEvent::DataUpdated {
            records_len: self.records.len(),
        });
    }

    /// Swaps the text measurer used by the label measurement pass.
    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measurer = Box::new(measurer);
    }

    /// Registers the callback notified with the new distance after wheel scrolling.
    pub fn set_on_scroll(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_scroll = Some(Box::new(callback));
    }

    pub fn clear_on_scroll(&mut self) {
        self.on_scroll = None;
    }

    pub fn register_plugin(&mut self, plugin: Box<dyn TimelinePlugin>) -> TimelineResult<()> {
        if self
            .plugins
            .iter()
            .any(|existing| existing.id() == plugin.id())
        {
            return Err(TimelineError::InvalidData(format!(
                "plugin with id `{}` is already registered",
                plugin.id()
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn unregister_plugin(&mut self, id: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|plugin| plugin.id() != id);
        self.plugins.len() != before
    }

    fn refresh_records(&mut self) {
        self.records = resolve_records(&self.data, &self.accessors);
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn data(&self) -> &[D] {
        &self.data
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn rows(&self) -> &RowAssignment {
        &self.view.rows
    }

    #[must_use]
    pub fn layout_metrics(&self) -> LayoutMetrics {
        self.view.metrics
    }

    #[must_use]
    pub fn scales(&self) -> XYScales {
        self.view.scales
    }

    #[must_use]
    pub fn max_thickness(&self) -> f64 {
        self.view.max_thickness
    }

    /// Vertical extent of the plotting area.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.view.scales.y_height()
    }

    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    #[must_use]
    pub fn scroll_distance(&self) -> f64 {
        self.scroll.scroll_distance
    }

    #[must_use]
    pub fn scroll_activity(&self) -> ScrollActivity {
        self.input.activity()
    }

    #[must_use]
    pub fn segments_accept_pointer(&self) -> bool {
        self.input.segments_accept_pointer()
    }

    #[must_use]
    pub fn label_layer(&self) -> &LabelLayer {
        &self.layers.labels
    }

    #[must_use]
    pub fn row_layer(&self) -> &RowLayer {
        &self.layers.rows
    }

    #[must_use]
    pub fn segment_layer(&self) -> &SegmentLayer {
        &self.layers.segments
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
