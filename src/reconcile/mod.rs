//! Keyed enter/update/exit reconciliation.
//!
//! Each visual layer is an ordered map from key to plain element state. A
//! render compares the existing key set against the incoming keys and
//! partitions them; the layers then apply their own enter/update/exit rules.

mod layers;

pub use layers::{
    ENTER_OFFSET_PX, LabelElement, LabelLayer, RowBackground, RowLayer, SegmentElement,
    SegmentLayer, SegmentTarget,
};

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keys of one join, split by lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPartition<K> {
    pub enter: Vec<K>,
    pub update: Vec<K>,
    pub exit: Vec<K>,
}

impl<K> Default for JoinPartition<K> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<K> JoinPartition<K> {
    /// No element appeared or disappeared.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> JoinCounts {
        JoinCounts {
            entered: self.enter.len(),
            updated: self.update.len(),
            exited: self.exit.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinCounts {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Partitions `incoming` against the keys already present in `existing`.
///
/// `incoming` must not contain duplicates; enter and update keep incoming
/// order, exit keeps existing order.
#[must_use]
pub fn keyed_join<K, V>(existing: &IndexMap<K, V>, incoming: &[K]) -> JoinPartition<K>
where
    K: Hash + Eq + Clone,
{
    let mut partition = JoinPartition::default();
    for key in incoming {
        if existing.contains_key(key) {
            partition.update.push(key.clone());
        } else {
            partition.enter.push(key.clone());
        }
    }

    let incoming: HashSet<&K> = incoming.iter().collect();
    partition.exit = existing
        .keys()
        .filter(|key| !incoming.contains(key))
        .cloned()
        .collect();
    partition
}

/// Unkeyed join: slots are matched by position only.
#[must_use]
pub fn count_join(existing: usize, incoming: usize) -> JoinPartition<usize> {
    JoinPartition {
        enter: (existing..incoming).collect(),
        update: (0..existing.min(incoming)).collect(),
        exit: (incoming..existing).collect(),
    }
}

/// Identity of a bar segment across renders.
///
/// `occurrence` separates records that share one identity value inside a
/// single data set; the first holder of a value is occurrence 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentKey {
    pub id: String,
    pub occurrence: u32,
}

impl SegmentKey {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occurrence: 0,
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.occurrence == 0 {
            f.write_str(&self.id)
        } else {
            write!(f, "{}#{}", self.id, self.occurrence)
        }
    }
}

/// Assigns a unique segment key to each identity value, in order.
#[must_use]
pub fn segment_keys<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<SegmentKey> {
    let mut seen: IndexMap<&'a str, u32> = IndexMap::new();
    ids.into_iter()
        .map(|id| {
            let occurrence = seen.entry(id).or_insert(0);
            let key = SegmentKey {
                id: id.to_owned(),
                occurrence: *occurrence,
            };
            *occurrence += 1;
            key
        })
        .collect()
}
