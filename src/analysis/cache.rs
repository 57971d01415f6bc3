use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::core::{CardGroup, GroupName, Result};

use super::Analyzer;

/// What makes two analyzers interchangeable: the same groups (name, size
/// and range) and the same hand size.
///
/// Two separately built analyzers over the same deck produce equal keys, so
/// caches keyed on this don't depend on which instance asks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalyzerKey<N> {
    /// Sorted by name.
    groups: Vec<CardGroup<N>>,
    hand_size: usize,
}

impl<N: GroupName> AnalyzerKey<N> {
    pub fn new(mut groups: Vec<CardGroup<N>>, hand_size: usize) -> Self {
        groups.sort();
        Self { groups, hand_size }
    }

    pub fn groups(&self) -> &[CardGroup<N>] {
        &self.groups
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }
}

/// Memoizes a value derived from an analyzer, usually another analyzer
/// such as an excavation or an optimized view.
///
/// Lookup and insertion happen under one lock, so concurrent first access
/// for the same key runs the derivation exactly once. The derivation runs
/// while the lock is held, which serializes derivations for different keys
/// too.
///
/// # Example
/// ```
/// use deck_odds::analysis::{Analyzer, DerivedCache};
/// use deck_odds::core::CardGroup;
///
/// let cache = DerivedCache::new();
/// let analyzer = Analyzer::new(
///     "aces",
///     5,
///     vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)],
/// )
/// .unwrap();
///
/// let optimized = cache
///     .get_or_try_insert_with(&analyzer, |a| {
///         a.optimize(&["Ace"], |size| CardGroup::new("Other", size))
///     })
///     .unwrap();
/// assert_eq!(optimized.groups().count(), 2);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct DerivedCache<N, V = Analyzer<N>> {
    entries: Mutex<HashMap<AnalyzerKey<N>, Arc<V>>>,
}

impl<N, V> Default for DerivedCache<N, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<N: GroupName, V> DerivedCache<N, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `source`, deriving and storing it first
    /// if there is none.
    ///
    /// A failed derivation stores nothing and returns the error.
    ///
    /// `derive` runs with the cache locked and the lock is not reentrant:
    /// calling back into this same cache from `derive` deadlocks. Derive
    /// through a second cache, or take the value out first and derive from
    /// it in a separate call.
    pub fn get_or_try_insert_with<F>(&self, source: &Analyzer<N>, derive: F) -> Result<Arc<V>>
    where
        F: FnOnce(&Analyzer<N>) -> Result<V>,
    {
        let key = source.key();
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(&key) {
            trace!(name = source.name(), "Derived cache hit");
            return Ok(Arc::clone(hit));
        }

        trace!(name = source.name(), "Derived cache miss");
        let value = Arc::new(derive(source)?);
        entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    /// The cached value for `source`, if any.
    pub fn get(&self, source: &Analyzer<N>) -> Option<Arc<V>> {
        self.entries.lock().get(&source.key()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Keys currently stored.
    pub fn keys(&self) -> Vec<AnalyzerKey<N>> {
        self.entries.lock().keys().cloned().collect()
    }
}
