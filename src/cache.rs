//! Opt-in memoization of category loads.
//!
//! Each entry remembers the storage signature it was built from. A lookup
//! only hits when the caller's fresh signature matches, so edits on disk are
//! picked up on the next call without any explicit invalidation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use naples_content_core::{Category, Document};

#[derive(Debug)]
struct CachedLoad {
    signature: String,
    documents: Arc<Vec<Document>>,
}

/// Validated, draft-inclusive loads keyed by category.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: Mutex<HashMap<Category, CachedLoad>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached load for `category` if it was built from `signature`.
    pub fn get(&self, category: Category, signature: &str) -> Option<Arc<Vec<Document>>> {
        self.lock()
            .get(&category)
            .filter(|entry| entry.signature == signature)
            .map(|entry| Arc::clone(&entry.documents))
    }

    pub fn put(&self, category: Category, signature: String, documents: Arc<Vec<Document>>) {
        self.lock().insert(
            category,
            CachedLoad {
                signature,
                documents,
            },
        );
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Category, CachedLoad>> {
        // A panic mid-insert leaves the map consistent; keep serving it.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_requires_matching_signature() {
        let cache = LoadCache::new();
        cache.put(Category::Map, "abc".to_string(), Arc::new(Vec::new()));
        assert!(cache.get(Category::Map, "abc").is_some());
        assert!(cache.get(Category::Map, "def").is_none());
        assert!(cache.get(Category::Hotel, "abc").is_none());
    }

    #[test]
    fn test_clear_drops_every_category() {
        let cache = LoadCache::new();
        cache.put(Category::Map, "a".to_string(), Arc::new(Vec::new()));
        cache.put(Category::Event, "b".to_string(), Arc::new(Vec::new()));
        cache.clear();
        assert!(cache.get(Category::Map, "a").is_none());
        assert!(cache.get(Category::Event, "b").is_none());
    }
}
