// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The node cache.
//!
//! A bounded, write-time-expiring map from [`NodeId`] to [`UaNode`], shared
//! by every resolve and browse path. Entries expire `expire_after` from the
//! moment they were written; overflow evicts the oldest tenth of the map.
//!
//! Publication is not at-most-once: two concurrent resolves of the same id
//! may both run end-to-end and the later publish wins. Records are immutable
//! and value-equal for the same server state, so the duplicate work is the
//! only cost; no per-key lock is taken.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use uascope_types::NodeId;

use crate::node::UaNode;

// =============================================================================
// NodeCache
// =============================================================================

/// Bounded, write-time-expiring cache of resolved node records.
#[derive(Debug)]
pub struct NodeCache {
    entries: RwLock<HashMap<NodeId, CacheEntry>>,
    max_entries: usize,
    expire_after: Duration,
    stats: CacheStats,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    node: UaNode,
    inserted_at: Instant,
}

impl NodeCache {
    /// Creates a cache holding at most `max_entries` records, each expiring
    /// `expire_after` from its write.
    pub fn new(max_entries: usize, expire_after: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            expire_after,
            stats: CacheStats::default(),
        }
    }

    /// Returns the live record for `node_id`, if present and unexpired.
    pub fn get(&self, node_id: &NodeId) -> Option<UaNode> {
        {
            let entries = self.entries.read();
            match entries.get(node_id) {
                Some(entry) if entry.inserted_at.elapsed() < self.expire_after => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.node.clone());
                }
                Some(_) => {}
                None => {
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // The entry looked expired under the read lock; re-check under the
        // write lock in case a fresh publish raced us.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(node_id) {
            if entry.inserted_at.elapsed() < self.expire_after {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.node.clone());
            }
            entries.remove(node_id);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Publishes `node` under `node_id`, replacing any previous record.
    pub fn put(&self, node_id: NodeId, node: UaNode) {
        let mut entries = self.entries.write();

        if !entries.contains_key(&node_id) && entries.len() >= self.max_entries {
            self.evict(&mut entries);
        }

        entries.insert(
            node_id,
            CacheEntry {
                node,
                inserted_at: Instant::now(),
            },
        );
        self.stats.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops expired entries, then the oldest tenth if the map is still full.
    fn evict(&self, entries: &mut HashMap<NodeId, CacheEntry>) {
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.expire_after);
        let mut evicted = before - entries.len();

        if entries.len() >= self.max_entries {
            let batch = (self.max_entries / 10).max(1);
            let mut oldest: Vec<(NodeId, Instant)> = entries
                .iter()
                .map(|(node_id, entry)| (node_id.clone(), entry.inserted_at))
                .collect();
            oldest.sort_by_key(|(_, inserted_at)| *inserted_at);

            for (node_id, _) in oldest.into_iter().take(batch) {
                entries.remove(&node_id);
                evicted += 1;
            }
        }

        self.stats
            .evictions
            .fetch_add(evicted as u64, Ordering::Relaxed);
    }

    /// Number of records currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every record.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// The cache hit/miss counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

// =============================================================================
// CacheStats
// =============================================================================

/// Counters for cache effectiveness.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    /// Number of reads served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of reads that found no live record.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of records published.
    pub fn insertions(&self) -> u64 {
        self.insertions.load(Ordering::Relaxed)
    }

    /// Number of records dropped by expiry or overflow.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Fraction of reads served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
