use crate::cache::{BoxedCache, CacheStats, ErasedCache, MethodCache, Outcome};
use crate::descriptor::MethodId;
use crate::key::ArgumentKey;
use crate::shape::ProxyShape;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// A source value behind its memoizing proxy.
///
/// Every `#[memoized]` trait of `T` is implemented for `Memoized<T>` as well. Memoized
/// methods consult the per-instance caches, everything else behaves exactly like `T`.
/// Fields and inherent methods of `T` are reachable through `Deref`.
pub struct Memoized<T> {
    inner: T,
    shape: Arc<ProxyShape>,
    caches: FxHashMap<MethodId, BoxedCache>,
}

/// Accessors are associated functions, `Memoized::stats(&proxy, ..)`, so they never shadow
/// methods of the proxied traits.
impl<T> Memoized<T> {
    pub(crate) fn from_parts(inner: T, shape: Arc<ProxyShape>) -> Self {
        let caches = shape.allocate();
        Memoized { inner, shape, caches }
    }

    pub fn shape(this: &Self) -> &Arc<ProxyShape> {
        &this.shape
    }

    pub fn inner(this: &Self) -> &T {
        &this.inner
    }

    /// Drops every cache and hands back the source value.
    pub fn into_inner(this: Self) -> T {
        this.inner
    }

    /// Cache statistics of one memoized method, `None` when it is not memoized.
    pub fn stats(this: &Self, method: &MethodId) -> Option<CacheStats> {
        this.caches.get(method).map(|cache| cache.stats())
    }

    /// Number of argument lists cached for methods called `name`, summed over every trait.
    pub fn cached(this: &Self, name: &str) -> usize {
        this.caches.iter().filter(|(id, _)| id.name == name).map(|(_, cache)| cache.len()).sum()
    }

    /// `None` when the shape has no cache of these types for `method`; the call then runs uncached.
    fn method_cache<'a, K, V>(this: &'a Self, method: &MethodId) -> Option<&'a MethodCache<K, V>>
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        this.caches.get(method).and_then(|cache| cache.as_any().downcast_ref::<MethodCache<K, V>>())
    }

    #[doc(hidden)]
    pub fn lookup<K, V>(this: &Self, method: &MethodId, key: &ArgumentKey<K>) -> Option<V>
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        Self::method_cache::<K, V>(this, method)?.get(key)
    }

    #[doc(hidden)]
    pub fn remember<K, V>(this: &Self, method: &MethodId, key: ArgumentKey<K>, value: V) -> V
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        match Self::method_cache::<K, V>(this, method) {
            Some(cache) => cache.insert(key, value),
            None => value,
        }
    }

    #[doc(hidden)]
    pub fn lookup_outcome<K, R>(this: &Self, method: &MethodId, key: &ArgumentKey<K>) -> Option<R>
    where
        K: Eq + Hash + Send + Sync + 'static,
        R: Outcome,
    {
        Self::method_cache::<K, R::Value>(this, method)?.get(key).map(R::from_cached)
    }

    #[doc(hidden)]
    pub fn remember_outcome<K, R>(this: &Self, method: &MethodId, key: ArgumentKey<K>, outcome: R) -> R
    where
        K: Eq + Hash + Send + Sync + 'static,
        R: Outcome,
    {
        match (outcome.cacheable(), Self::method_cache::<K, R::Value>(this, method)) {
            (Some(value), Some(cache)) => R::from_cached(cache.insert(key, value)),
            _ => outcome,
        }
    }
}

impl<T> Deref for Memoized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Memoized<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&MethodId> = self.caches.keys().collect();
        ids.sort();
        let sizes: Vec<(String, usize)> = ids.into_iter().map(|id| (id.to_string(), self.caches[id].len())).collect();
        f.debug_struct("Memoized").field("inner", &self.inner).field("caches", &sizes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::tests::{Sample, SAMPLE};
    use crate::shape::ProxyBuilder;
    use std::any::TypeId;

    const SQUARE: MethodId = MethodId::new("Sample", "square");

    fn sample() -> Memoized<Sample> {
        let shape = ProxyBuilder::build(TypeId::of::<Sample>(), "Sample", &[&SAMPLE]).unwrap();
        Memoized::from_parts(Sample, Arc::new(shape))
    }

    #[test]
    fn remembers_per_method() {
        let proxy = sample();
        let key = ArgumentKey::new((3u32,));
        assert_eq!(Memoized::lookup::<(u32,), u32>(&proxy, &SQUARE, &key), None);
        assert_eq!(Memoized::remember(&proxy, &SQUARE, key.clone(), 9u32), 9);
        assert_eq!(Memoized::lookup::<(u32,), u32>(&proxy, &SQUARE, &key), Some(9));
        assert_eq!(Memoized::cached(&proxy, "square"), 1);
        assert_eq!(Memoized::cached(&proxy, "bump"), 0);
        assert_eq!(Memoized::stats(&proxy, &SQUARE), Some(CacheStats { hits: 1, misses: 1, entries: 1 }));
        assert_eq!(Memoized::stats(&proxy, &MethodId::new("Sample", "plain")), None);
    }

    #[test]
    fn failed_outcomes_are_passed_through_uncached() {
        let proxy = sample();
        let key = ArgumentKey::new((4u32,));
        let failed: Result<u32, String> = Memoized::remember_outcome(&proxy, &SQUARE, key.clone(), Err("nope".to_string()));
        assert_eq!(failed, Err("nope".to_string()));
        assert_eq!(Memoized::lookup_outcome::<(u32,), Result<u32, String>>(&proxy, &SQUARE, &key), None);

        let ok: Result<u32, String> = Memoized::remember_outcome(&proxy, &SQUARE, key.clone(), Ok(16));
        assert_eq!(ok, Ok(16));
        assert_eq!(Memoized::lookup_outcome::<(u32,), Result<u32, String>>(&proxy, &SQUARE, &key), Some(Ok(16)));
    }

    #[test]
    fn instances_do_not_share_caches() {
        let a = sample();
        let b = sample();
        Memoized::remember(&a, &SQUARE, ArgumentKey::new((2u32,)), 4u32);
        assert_eq!(Memoized::cached(&a, "square"), 1);
        assert_eq!(Memoized::cached(&b, "square"), 0);
    }

    #[test]
    fn calls_without_a_matching_cache_run_uncached() {
        let transparent = ProxyBuilder::build(TypeId::of::<Sample>(), "Sample", &[]).unwrap();
        let proxy = Memoized::from_parts(Sample, Arc::new(transparent));
        let key = ArgumentKey::new((3u32,));
        assert_eq!(Memoized::lookup::<(u32,), u32>(&proxy, &SQUARE, &key), None);
        assert_eq!(Memoized::remember(&proxy, &SQUARE, key.clone(), 9u32), 9);
        assert_eq!(Memoized::lookup::<(u32,), u32>(&proxy, &SQUARE, &key), None);
        let ok: Result<u32, String> = Memoized::remember_outcome(&proxy, &SQUARE, key, Ok(9));
        assert_eq!(ok, Ok(9));

        let mistyped = sample();
        let key = ArgumentKey::new((1u32,));
        assert_eq!(Memoized::remember(&mistyped, &SQUARE, key.clone(), "one".to_string()), "one");
        assert_eq!(Memoized::lookup::<(u32,), String>(&mistyped, &SQUARE, &key), None);
        assert_eq!(Memoized::cached(&mistyped, "square"), 0);
    }
}
