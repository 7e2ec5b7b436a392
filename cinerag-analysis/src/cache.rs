//! Bounded FIFO cache for analyzer results.
//!
//! Keys are blake3 hashes of the lowercased cleaned query. Eviction is
//! strictly insertion-ordered: when the bound is exceeded the oldest
//! entry goes first. Unsynchronized; callers sharing an instance across
//! threads must lock externally.

use std::collections::{HashMap, VecDeque};

use cinerag_core::models::AnalyzedQuery;

/// Insertion-ordered bounded map.
pub struct QueryCache {
    capacity: usize,
    entries: HashMap<String, AnalyzedQuery>,
    order: VecDeque<String>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Cache key for a cleaned query: blake3 of the lowercased text.
    pub fn key_for(cleaned: &str) -> String {
        blake3::hash(cleaned.to_lowercase().as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<&AnalyzedQuery> {
        self.entries.get(key)
    }

    /// Insert, evicting the oldest entry when full. Re-inserting an
    /// existing key refreshes the value without consuming capacity.
    pub fn insert(&mut self, key: String, value: AnalyzedQuery) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
            while self.entries.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
