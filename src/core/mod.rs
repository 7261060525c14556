pub mod geometry;
pub mod record;
pub mod rows;
pub mod scale;
pub mod types;

pub use geometry::{
    GeometryPolicy, ResolvedGeometry, SegmentGeometry, resolve_segment_geometry, row_top,
};
pub use record::{
    Accessor, AccessorFn, DEFAULT_THICKNESS_PX, Record, TimelineAccessors, max_thickness,
    resolve_records, x_extent,
};
pub use rows::RowAssignment;
pub use scale::{LinearScale, ScaleProvider, XYScales};
pub use types::Viewport;
