//! Memoization of search and load outcomes.
//!
//! Each key owns a [`OnceLock`] cell. The map lock is held only long enough to
//! fetch or insert the cell; the computation runs against the cell itself, so
//! overlapping callers for the same key block until the first one finishes and
//! then share its outcome, while unrelated keys proceed independently.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::Result;
use crate::result::SearchResult;

/// Outcome stored per key. Failures are cached as well as successes.
pub(crate) type Outcome = Result<SearchResult>;

type Cell = Arc<OnceLock<Outcome>>;

/// A lazily populated, never-evicted map from key to outcome.
pub(crate) struct OutcomeCache<K> {
    cells: Mutex<HashMap<K, Cell>>,
}

impl<K: Eq + Hash + Clone> OutcomeCache<K> {
    pub(crate) fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Return the outcome for `key`, running `compute` only if no caller has
    /// done so yet.
    pub(crate) fn get_or_compute(&self, key: &K, compute: impl FnOnce() -> Outcome) -> Outcome {
        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cells.entry(key.clone()).or_default())
        };
        cell.get_or_init(compute).clone()
    }

    /// Drop every entry. In-flight computations finish against their own
    /// cells and are not observed by later callers.
    pub(crate) fn clear(&self) {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of keys with a cell, finished or not.
    pub(crate) fn len(&self) -> usize {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::result::ResolvedConfig;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    fn found(path: &str) -> Outcome {
        Ok(Some(Arc::new(ResolvedConfig::empty(path))))
    }

    #[test]
    fn test_computes_once_per_key() {
        let cache = OutcomeCache::new();
        let calls = AtomicUsize::new(0);
        let key = PathBuf::from("/a");

        let first = cache
            .get_or_compute(&key, || {
                calls.fetch_add(1, Ordering::SeqCst);
                found("/a/.apprc")
            })
            .unwrap();
        let second = cache
            .get_or_compute(&key, || {
                calls.fetch_add(1, Ordering::SeqCst);
                found("/a/other")
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(first.as_ref().unwrap(), second.as_ref().unwrap()));
    }

    #[test]
    fn test_failures_are_cached() {
        let cache = OutcomeCache::new();
        let key = PathBuf::from("/a/app.json");
        let err = cache
            .get_or_compute(&key, || Err(Error::NotFound { path: key.clone() }))
            .unwrap_err();
        assert!(err.is_not_found());

        let again = cache.get_or_compute(&key, || found("/a/app.json"));
        assert!(again.unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_forgets_entries() {
        let cache = OutcomeCache::new();
        let key = PathBuf::from("/a");
        cache.get_or_compute(&key, || Ok(None)).unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);
        let value = cache.get_or_compute(&key, || found("/a/.apprc")).unwrap();
        assert!(value.is_some());
    }

    #[test]
    fn test_concurrent_callers_share_one_computation() {
        let cache = Arc::new(OutcomeCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_compute(&PathBuf::from("/shared"), || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(Duration::from_millis(20));
                            found("/shared/.apprc")
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let first = results[0].as_ref().unwrap();
        for result in &results[1..] {
            assert!(Arc::ptr_eq(first, result.as_ref().unwrap()));
        }
    }
}
