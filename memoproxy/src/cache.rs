use crate::key::ArgumentKey;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss counters and size of one method cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Object-safe view of a `MethodCache<K, V>` once its types are erased.
pub trait ErasedCache: Any + Send + Sync {
    fn len(&self) -> usize;
    fn stats(&self) -> CacheStats;
    fn as_any(&self) -> &dyn Any;
}

pub type BoxedCache = Box<dyn ErasedCache>;

/// Unbounded cache of one memoized method of one proxy instance.
pub struct MethodCache<K, V> {
    entries: RwLock<FxHashMap<ArgumentKey<K>, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> Default for MethodCache<K, V> {
    fn default() -> Self {
        MethodCache {
            entries: RwLock::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<K, V> MethodCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache behind the erased interface, used as the cache factory of a method descriptor.
    pub fn erased() -> BoxedCache {
        Box::new(Self::new())
    }

    pub fn get(&self, key: &ArgumentKey<K>) -> Option<V> {
        let found = self.entries.read().get(key).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Stores `value` unless another caller stored one first; returns whatever is stored.
    pub fn insert(&self, key: ArgumentKey<K>, value: V) -> V {
        self.entries.write().entry(key).or_insert(value).clone()
    }

    pub fn contains(&self, key: &ArgumentKey<K>) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> ErasedCache for MethodCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Return types whose failures must not be cached.
///
/// Only the success payload is stored; a failed call is handed back to the caller
/// and the next call with the same arguments runs the base method again.
pub trait Outcome: Sized {
    type Value: Clone + Send + Sync + 'static;

    fn cacheable(&self) -> Option<Self::Value>;

    fn from_cached(value: Self::Value) -> Self;
}

impl<T, E> Outcome for Result<T, E>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    fn cacheable(&self) -> Option<T> {
        self.as_ref().ok().cloned()
    }

    fn from_cached(value: T) -> Self {
        Ok(value)
    }
}
