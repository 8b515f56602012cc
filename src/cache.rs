//! Context bundle cache with explicit invalidation
//!
//! Keyed by document identity (content hash), so re-chunking the same
//! document is free. The cache is an explicit object owned by the
//! caller; nothing here is process-global.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::config::CacheConfig;
use crate::types::ContextBundle;

/// A cached context bundle
#[derive(Debug, Clone)]
struct CacheEntry {
    bundle: ContextBundle,
    cached_at: DateTime<Utc>,
    hit_count: u32,
}

/// Cache of parsed context bundles, keyed by document identity
pub struct ContextCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: usize,
    ttl_seconds: u64,
}

impl ContextCache {
    /// Create a new cache
    pub fn new(max_entries: usize, ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            ttl_seconds,
        }
    }

    /// Create a cache from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.ttl_seconds)
    }

    /// Get a cached bundle if present and not expired
    pub fn get(&self, document_id: &str) -> Option<ContextBundle> {
        let mut entries = self.entries.write();

        if let Some(entry) = entries.get_mut(document_id) {
            let age = Utc::now().signed_duration_since(entry.cached_at);
            if age.num_seconds() as u64 > self.ttl_seconds {
                tracing::debug!("cache miss (TTL expired)");
                entries.remove(document_id);
                return None;
            }

            entry.hit_count += 1;
            tracing::debug!(hits = entry.hit_count, "cache hit");
            return Some(entry.bundle.clone());
        }

        None
    }

    /// Store a bundle, evicting the oldest entry at capacity
    pub fn put(&self, document_id: &str, bundle: ContextBundle) {
        let mut entries = self.entries.write();

        if entries.len() >= self.max_entries && !entries.contains_key(document_id) {
            if let Some(oldest_key) = entries
                .iter()
                .min_by_key(|(_, v)| v.cached_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest_key);
            }
        }

        entries.insert(
            document_id.to_string(),
            CacheEntry {
                bundle,
                cached_at: Utc::now(),
                hit_count: 0,
            },
        );
    }

    /// Drop the entry for one document
    ///
    /// Called when the underlying document changes or is deleted.
    pub fn invalidate(&self, document_id: &str) -> bool {
        let removed = self.entries.write().remove(document_id).is_some();
        if removed {
            tracing::info!("invalidated cached context");
        }
        removed
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        CacheStats {
            entries: entries.len(),
            total_hits: entries.values().map(|e| e.hit_count).sum(),
            max_entries: self.max_entries,
            ttl_seconds: self.ttl_seconds,
        }
    }
}

impl Default for ContextCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// Cache statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_hits: u32,
    pub max_entries: usize,
    pub ttl_seconds: u64,
}
