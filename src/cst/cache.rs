//! Bounded memo of parsed syntax trees, keyed by source content.
//!
//! One cache is owned by one lint run, so trees do not outlive the run that
//! built them. Entries are immutable once inserted; two callers racing on the
//! same source both parse and the second insert replaces an equal tree.

use super::{parse, SyntaxTree};
use crate::constants;
use crate::error::Error;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Compute SHA-256 hash of content and return as hex string
#[must_use]
pub fn compute_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Least recently used first.
#[derive(Debug, Default)]
struct CacheState {
    trees: IndexMap<String, Arc<SyntaxTree>>,
}

impl CacheState {
    fn get(&mut self, key: &str) -> Option<Arc<SyntaxTree>> {
        let (key, tree) = self.trees.shift_remove_entry(key)?;
        self.trees.insert(key, Arc::clone(&tree));
        Some(tree)
    }

    fn insert(&mut self, key: String, tree: Arc<SyntaxTree>, capacity: usize) {
        self.trees.shift_remove(&key);
        self.trees.insert(key, tree);
        while self.trees.len() > capacity {
            if let Some((evicted, _)) = self.trees.shift_remove_index(0) {
                trace!(target: "oaslint::cst", key = %evicted, "evicted syntax tree");
            }
        }
    }
}

/// Hit and miss counters, mostly useful in tests and trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

#[derive(Debug)]
pub struct CstCache {
    capacity: usize,
    state: Mutex<CacheState>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl CstCache {
    /// Creates a cache holding at most `capacity` trees (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the tree for `source`, parsing it on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::SourceParse`] from the builder. Failures are not cached.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<SyntaxTree>, Error> {
        let key = compute_content_hash(source.as_bytes());

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(tree) = state.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(tree);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let tree = Arc::new(parse(source)?);

        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&tree), self.capacity);

        Ok(tree)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .trees
            .len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Drops every tree. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.trees.clear();
    }
}

impl Default for CstCache {
    fn default() -> Self {
        Self::new(constants::DEFAULT_CST_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_source_reuses_tree() {
        let cache = CstCache::new(4);
        let first = cache.get_or_parse("a: 1").unwrap();
        let second = cache.get_or_parse("a: 1").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = CstCache::new(2);
        let a = cache.get_or_parse("a: 1").unwrap();
        cache.get_or_parse("b: 1").unwrap();
        // Touch "a" so "b" becomes the eviction candidate.
        cache.get_or_parse("a: 1").unwrap();
        cache.get_or_parse("c: 1").unwrap();
        assert_eq!(cache.stats().entries, 2);

        let again = cache.get_or_parse("a: 1").unwrap();
        assert!(Arc::ptr_eq(&a, &again));
        cache.get_or_parse("b: 1").unwrap();
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(CstCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_parse_failure_not_cached() {
        let cache = CstCache::new(2);
        assert!(cache.get_or_parse("a: [").is_err());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_clear() {
        let cache = CstCache::new(2);
        cache.get_or_parse("a: 1").unwrap();
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(
            compute_content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
