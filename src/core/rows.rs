use indexmap::IndexMap;

use crate::core::Record;

/// Ordinal row slots keyed by row key, in first-occurrence order.
///
/// Recomputed from scratch on every render; nothing about a row survives
/// across renders except what the same keys reproduce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAssignment {
    rows: IndexMap<String, String>,
}

impl RowAssignment {
    #[must_use]
    pub fn assign(records: &[Record]) -> Self {
        let mut rows = IndexMap::with_capacity(records.len());
        for record in records {
            rows.entry(record.row_key.clone())
                .or_insert_with(|| record.label.clone());
        }
        Self { rows }
    }

    #[must_use]
    pub fn row_of(&self, row_key: &str) -> Option<usize> {
        self.rows.get_index_of(row_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates `(row index, row key, label)` in row order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &str)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, (key, label))| (index, key.as_str(), label.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.values().map(String::as_str)
    }
}
