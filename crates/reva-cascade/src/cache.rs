// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hash-keyed response cache with per-entry TTL.
//!
//! Entries are keyed by the hash of the normalized question, optionally
//! qualified by a context hash. Lookups prefer the context-specific entry.
//! Cache hits are authoritative regardless of stored confidence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::debug;

/// A cached cascade answer.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub answer: String,
    pub confidence: f64,
    pub token_cost: u64,
}

struct CacheSlot {
    response: CachedResponse,
    expires_at: Instant,
}

/// In-memory response cache.
#[derive(Default)]
pub struct ResponseCache {
    entries: DashMap<String, CacheSlot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Stable hash of arbitrary text, case- and whitespace-insensitive.
pub fn text_hash(text: &str) -> String {
    let normalized = text.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

fn cache_key(question: &str, context_hash: Option<&str>) -> String {
    let qhash = text_hash(question);
    match context_hash {
        Some(ctx) => format!("{qhash}:{ctx}"),
        None => qhash,
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an unexpired entry, preferring the context-specific one.
    pub fn get(&self, question: &str, context_hash: Option<&str>) -> Option<CachedResponse> {
        let candidates = match context_hash {
            Some(ctx) => vec![cache_key(question, Some(ctx)), cache_key(question, None)],
            None => vec![cache_key(question, None)],
        };

        for key in candidates {
            if let Some(slot) = self.entries.get(&key) {
                if slot.expires_at > Instant::now() {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(slot.response.clone());
                }
                drop(slot);
                self.entries.remove(&key);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a response under the question (and context, if given) for `ttl`.
    pub fn put(
        &self,
        question: &str,
        context_hash: Option<&str>,
        response: CachedResponse,
        ttl: Duration,
    ) {
        let key = cache_key(question, context_hash);
        debug!(key = key.as_str(), ttl_secs = ttl.as_secs(), "caching response");
        self.entries.insert(
            key,
            CacheSlot {
                response,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop every expired entry. Intended for periodic housekeeping.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, slot| slot.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
