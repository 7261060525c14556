use std::fmt;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::render::Color;

/// Default bar thickness in pixels when no thickness accessor is configured.
pub const DEFAULT_THICKNESS_PX: f64 = 8.0;

pub type AccessorFn<D, T> = Arc<dyn Fn(&D, usize) -> Option<T> + Send + Sync>;

/// Per-datum or constant value source.
///
/// `Field` closures receive the datum and its position in the input slice.
pub enum Accessor<D, T> {
    Unset,
    Constant(T),
    Field(AccessorFn<D, T>),
}

impl<D, T: Clone> Accessor<D, T> {
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    #[must_use]
    pub fn field(f: impl Fn(&D, usize) -> Option<T> + Send + Sync + 'static) -> Self {
        Self::Field(Arc::new(f))
    }

    #[must_use]
    pub fn resolve(&self, datum: &D, index: usize) -> Option<T> {
        match self {
            Self::Unset => None,
            Self::Constant(value) => Some(value.clone()),
            Self::Field(f) => f(datum, index),
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl<D, T: Clone> Clone for Accessor<D, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Constant(value) => Self::Constant(value.clone()),
            Self::Field(f) => Self::Field(Arc::clone(f)),
        }
    }
}

impl<D, T: fmt::Debug> fmt::Debug for Accessor<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Field(_) => f.write_str("Field(..)"),
        }
    }
}

/// Accessor set turning caller data into timeline records.
#[derive(Debug)]
pub struct TimelineAccessors<D> {
    pub id: Accessor<D, String>,
    pub record_type: Accessor<D, String>,
    pub start: Accessor<D, f64>,
    pub length: Accessor<D, f64>,
    pub thickness: Accessor<D, f64>,
    pub color: Accessor<D, Color>,
    pub cursor: Accessor<D, String>,
}

impl<D> Default for TimelineAccessors<D> {
    fn default() -> Self {
        Self {
            id: Accessor::Unset,
            record_type: Accessor::Unset,
            start: Accessor::Unset,
            length: Accessor::Unset,
            thickness: Accessor::Constant(DEFAULT_THICKNESS_PX),
            color: Accessor::Unset,
            cursor: Accessor::Unset,
        }
    }
}

impl<D> Clone for TimelineAccessors<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            record_type: self.record_type.clone(),
            start: self.start.clone(),
            length: self.length.clone(),
            thickness: self.thickness.clone(),
            color: self.color.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

impl<D> TimelineAccessors<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(
        mut self,
        f: impl Fn(&D, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.id = Accessor::field(f);
        self
    }

    #[must_use]
    pub fn with_type(
        mut self,
        f: impl Fn(&D, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.record_type = Accessor::field(f);
        self
    }

    #[must_use]
    pub fn with_start(
        mut self,
        f: impl Fn(&D, usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.start = Accessor::field(f);
        self
    }

    #[must_use]
    pub fn with_length(
        mut self,
        f: impl Fn(&D, usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.length = Accessor::field(f);
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: Accessor<D, f64>) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Accessor<D, Color>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: Accessor<D, String>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// One input datum with every accessor resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position in the caller's data slice.
    pub index: usize,
    /// Identity used by the segment join.
    pub key: String,
    /// Grouping key; one row per distinct value.
    pub row_key: String,
    /// Text shown in the row label.
    pub label: String,
    pub start: f64,
    pub length: f64,
    pub thickness: f64,
    pub color: Option<Color>,
    pub cursor: Option<String>,
}

impl Record {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// Resolves every datum through the accessors.
///
/// Missing identity falls back to the positional index, missing or empty
/// type falls back to a synthetic per-index row. Records without a finite
/// start cannot be placed and are dropped. Colors with a channel outside
/// `[0, 1]` are discarded so the row palette applies instead.
pub fn resolve_records<D>(data: &[D], accessors: &TimelineAccessors<D>) -> Vec<Record> {
    let mut dropped = 0_usize;
    let mut invalid_colors = 0_usize;
    let records: Vec<Record> = data
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| {
            let Some(start) = accessors
                .start
                .resolve(datum, index)
                .filter(|value| value.is_finite())
            else {
                dropped += 1;
                return None;
            };

            let key = accessors
                .id
                .resolve(datum, index)
                .unwrap_or_else(|| index.to_string());
            let record_type = accessors
                .record_type
                .resolve(datum, index)
                .filter(|value| !value.is_empty());
            let (row_key, label) = match record_type {
                Some(value) => (value.clone(), value),
                None => (format!("__{index}"), (index + 1).to_string()),
            };
            let length = accessors
                .length
                .resolve(datum, index)
                .filter(|value| value.is_finite())
                .unwrap_or(0.0);
            let thickness = accessors
                .thickness
                .resolve(datum, index)
                .filter(|value| value.is_finite())
                .map_or(0.0, |value| value.max(0.0));
            let color = accessors.color.resolve(datum, index).filter(|color| {
                let valid = color.validate().is_ok();
                if !valid {
                    invalid_colors += 1;
                }
                valid
            });

            Some(Record {
                index,
                key,
                row_key,
                label,
                start,
                length,
                thickness,
                color,
                cursor: accessors.cursor.resolve(datum, index),
            })
        })
        .collect();

    if dropped > 0 {
        warn!(
            dropped,
            kept = records.len(),
            "dropping timeline records without a finite start"
        );
    }
    if invalid_colors > 0 {
        warn!(
            invalid_colors,
            "ignoring record colors outside [0, 1], using the row palette"
        );
    }
    records
}

/// Largest resolved thickness, 0 for an empty set.
#[must_use]
pub fn max_thickness(records: &[Record]) -> f64 {
    records
        .iter()
        .map(|record| OrderedFloat(record.thickness))
        .max()
        .map_or(0.0, |value| value.0)
}

/// Horizontal data extent `[min(start), max(start + length)]`.
#[must_use]
pub fn x_extent(records: &[Record]) -> Option<(f64, f64)> {
    let min = records.iter().map(|r| OrderedFloat(r.start)).min()?;
    let max = records.iter().map(|r| OrderedFloat(r.end())).max()?;
    Some((min.0, max.0))
}
