//! Observer hooks for host applications.

mod plugins;

pub use plugins::{PluginContext, TimelineEvent, TimelinePlugin};
