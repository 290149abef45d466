//! One record: an insertion-ordered mapping from column name to [`Cell`].

use std::ops::Index;

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;

use crate::{Cell, CodingKey};

/// Ordered column → cell mapping.
///
/// Lookups are by name; insertion order is kept so that columns can also be
/// addressed positionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets `column` to `cell`, returning the previous cell. An existing column
    /// keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Option<Cell> {
        self.columns.insert(column.into(), cell.into())
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns.get(column)
    }

    /// Column name and cell at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Cell)> {
        self.columns
            .get_index(index)
            .map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Cell> {
        self.columns.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Whether `key` addresses a cell: a named column, or an index within the
    /// column count.
    pub fn contains_key(&self, key: &CodingKey) -> bool {
        match key {
            CodingKey::Str(name) => self.contains(name),
            CodingKey::Index(index) => *index < self.len(),
        }
    }

    /// Cell addressed by `key`; index keys resolve positionally.
    pub fn get_by_key(&self, key: &CodingKey) -> Option<&Cell> {
        match key {
            CodingKey::Str(name) => self.get(name),
            CodingKey::Index(index) => self.get_index(*index).map(|(_, cell)| cell),
        }
    }

    /// Assigns the cell addressed by `key`.
    ///
    /// Index keys overwrite the cell of the existing column at that position;
    /// an index past the end names a new column after the key's display form.
    pub fn set_by_key(&mut self, key: &CodingKey, cell: Cell) {
        match key {
            CodingKey::Str(name) => {
                self.columns.insert(name.clone(), cell);
            }
            CodingKey::Index(index) => match self.columns.get_index_mut(*index) {
                Some((_, slot)) => *slot = cell,
                None => {
                    self.columns.insert(key.to_string(), cell);
                }
            },
        }
    }
}

impl Index<&str> for Row {
    type Output = Cell;

    fn index(&self, column: &str) -> &Cell {
        &self.columns[column]
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Cell>, const N: usize> From<[(K, V); N]> for Row {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Row {
    type Item = (String, Cell);
    type IntoIter = IntoIter<String, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a Cell);
    type IntoIter = Iter<'a, String, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
