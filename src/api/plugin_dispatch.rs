use crate::extensions::{PluginContext, TimelineEvent};
use crate::render::Renderer;

use super::TimelineEngine;

impl<D, R: Renderer> TimelineEngine<D, R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.config.viewport,
            records_len: self.records.len(),
            rows_len: self.view.rows.len(),
            segments_len: self.layers.segments.len(),
            scroll: self.scroll,
            scroll_activity: self.input.activity(),
        }
    }

    pub(super) fn emit_event(&mut self, event: TimelineEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, context);
        }
    }
}
