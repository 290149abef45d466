use std::sync::Arc;

use serde_json::{Map, Value};

/// Opaque key → value bag handed unchanged to every decoder and encoder of a
/// single top-level call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInfo(Arc<Map<String, Value>>);

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bag with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.0).insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for UserInfo {
    fn from(map: Map<String, Value>) -> Self {
        UserInfo(Arc::new(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_until_written() {
        let base = UserInfo::new().with("tenant", "acme");
        let extended = base.clone().with("version", 2);
        assert_eq!(base.get("tenant"), Some(&json!("acme")));
        assert_eq!(base.get("version"), None);
        assert_eq!(extended.get("version"), Some(&json!(2)));
        assert_eq!(extended.len(), 2);
        assert!(UserInfo::new().is_empty());
    }
}
