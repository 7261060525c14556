//! timeline-rs: headless timeline engine.
//!
//! Records are laid out as horizontal segments in rows keyed by a type
//! value. Every render recomputes rows, label bleed and scales, then
//! reconciles labels, row backgrounds and segments by key with animated
//! transitions. Rows beyond the plot height are reached through a virtual
//! scroll with a proportional scrollbar.
//!
//! Output is a backend-agnostic `RenderFrame` handed to a `Renderer`; the
//! optional `cairo-backend` feature provides a Cairo/Pango implementation.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod layout;
pub mod reconcile;
pub mod render;
pub mod telemetry;

pub use api::{RenderReport, TickReport, TimelineConfig, TimelineEngine, TimelineSnapshot};
pub use crate::core::{Accessor, TimelineAccessors, Viewport};
pub use error::{TimelineError, TimelineResult};
