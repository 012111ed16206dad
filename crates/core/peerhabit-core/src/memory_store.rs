//! In-process key-value store

use crate::types::KeyValueStore;
use crate::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// Hash-map backed [`KeyValueStore`].
///
/// Each primitive holds the lock for its own duration only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    sets: RwLock<HashMap<String, HashSet<String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_add(&self, set_key: &str, member: &str) -> Result<()> {
        self.sets
            .write()
            .entry(set_key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_is_member(&self, set_key: &str, member: &str) -> Result<bool> {
        Ok(self
            .sets
            .read()
            .get(set_key)
            .is_some_and(|set| set.contains(member)))
    }

    async fn set_members(&self, set_key: &str) -> Result<HashSet<String>> {
        Ok(self.sets.read().get(set_key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scalar_overwrite() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "1").await.unwrap();
        store.set("a", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_sets() {
        let store = MemoryStore::new();
        assert!(store.set_members("s").await.unwrap().is_empty());
        assert!(!store.set_is_member("s", "x").await.unwrap());

        store.set_add("s", "x").await.unwrap();
        store.set_add("s", "x").await.unwrap();
        store.set_add("s", "y").await.unwrap();

        assert!(store.set_is_member("s", "x").await.unwrap());
        assert!(!store.set_is_member("other", "x").await.unwrap());
        assert_eq!(store.set_members("s").await.unwrap().len(), 2);
    }
}
