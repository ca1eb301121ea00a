//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(entries.keys().cloned().collect())
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(entries.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();

        storage.set("project", "{}").unwrap();
        assert_eq!(storage.get("project").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_missing_key() {
        let storage = MemoryStorage::new();
        assert!(storage.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_contains() {
        let storage = MemoryStorage::new();

        assert!(!storage.contains("test").unwrap());
        storage.set("test", "value").unwrap();
        assert!(storage.contains("test").unwrap());
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();

        storage.set("test", "value").unwrap();
        storage.remove("test").unwrap();
        assert!(!storage.contains("test").unwrap());

        // Removing again is fine
        storage.remove("test").unwrap();
    }

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();

        storage.set("key", "first").unwrap();
        storage.set("key", "second").unwrap();

        assert_eq!(storage.get("key").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.keys().unwrap(), vec!["key".to_string()]);
    }
}
