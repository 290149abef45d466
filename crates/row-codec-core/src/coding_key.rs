//! Keys addressing row columns and sequence positions, and the persistent
//! coding path built from them.

use std::fmt;
use std::sync::Arc;

/// Addresses a column by name or a position by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodingKey {
    Str(String),
    Index(usize),
}

impl CodingKey {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodingKey::Str(s) => Some(s),
            CodingKey::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            CodingKey::Str(_) => None,
            CodingKey::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for CodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodingKey::Str(s) => f.write_str(s),
            CodingKey::Index(i) => write!(f, "Index {i}"),
        }
    }
}

impl From<&str> for CodingKey {
    fn from(s: &str) -> Self {
        CodingKey::Str(s.to_owned())
    }
}

impl From<String> for CodingKey {
    fn from(s: String) -> Self {
        CodingKey::Str(s)
    }
}

impl From<usize> for CodingKey {
    fn from(i: usize) -> Self {
        CodingKey::Index(i)
    }
}

#[derive(Debug)]
struct Segment {
    parent: CodingPath,
    key: CodingKey,
    len: usize,
}

/// Ordered list of keys locating a traversal position.
///
/// Extending a path shares the existing prefix; nothing is ever mutated in
/// place, so sibling containers can hold diverging paths cheaply.
#[derive(Debug, Clone, Default)]
pub struct CodingPath(Option<Arc<Segment>>);

impl CodingPath {
    pub fn root() -> Self {
        CodingPath(None)
    }

    /// Returns a new path with `key` appended.
    pub fn appending(&self, key: impl Into<CodingKey>) -> Self {
        CodingPath(Some(Arc::new(Segment {
            parent: self.clone(),
            key: key.into(),
            len: self.len() + 1,
        })))
    }

    /// Returns a new path with every key of `suffix` appended.
    pub fn join(&self, suffix: &CodingPath) -> Self {
        suffix
            .to_vec()
            .into_iter()
            .fold(self.clone(), |path, key| path.appending(key))
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |s| s.len)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn last(&self) -> Option<&CodingKey> {
        self.0.as_ref().map(|s| &s.key)
    }

    pub fn to_vec(&self) -> Vec<CodingKey> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = &self.0;
        while let Some(segment) = cursor {
            keys.push(segment.key.clone());
            cursor = &segment.parent.0;
        }
        keys.reverse();
        keys
    }
}

impl PartialEq for CodingPath {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl<K: Into<CodingKey>> FromIterator<K> for CodingPath {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CodingPath::root(), |path, key| path.appending(key))
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.to_vec().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str("]")
    }
}
