use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::{CacheBackend, CacheError, Result};

/// In-process cache, gone when dropped
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated cache, handy for seeding a store in tests
    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::new();
        if let Ok(mut entries) = cache.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        cache
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("repos").unwrap(), None);

        cache.set("repos", "[]").unwrap();
        assert_eq!(cache.get("repos").unwrap().as_deref(), Some("[]"));

        cache.remove("repos").unwrap();
        assert_eq!(cache.get("repos").unwrap(), None);
    }

    #[test]
    fn test_with_entry() {
        let cache = MemoryCache::with_entry("repos", "garbage");
        assert_eq!(cache.get("repos").unwrap().as_deref(), Some("garbage"));
    }
}
