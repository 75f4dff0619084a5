use crate::descriptor::MemoizedImpl;
use crate::error::MemoError;
use crate::selector::MethodSelector;
use crate::shape::{ProxyBuilder, ProxyShape};
use crate::{debug, warn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::any::{type_name, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static GLOBAL: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::new);

/// Source type → proxy shape, built lazily at most once per source type and never evicted.
#[derive(Default)]
pub struct TypeRegistry {
    shapes: Mutex<FxHashMap<TypeId, Arc<ProxyShape>>>,
    builds: AtomicUsize,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by `create` and `wrap`.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    pub fn get_or_build<T: 'static>(&self) -> Result<Arc<ProxyShape>, MemoError> {
        let source = TypeId::of::<T>();
        self.get_or_build_with(source, type_name::<T>(), || MethodSelector::impls_for(source))
    }

    /// The lock is held across lookup, build and insert so concurrent callers
    /// never build two shapes for one source type. Crate-private: shapes only ever come
    /// from the registered descriptors.
    pub(crate) fn get_or_build_with<F>(&self, source: TypeId, source_name: &'static str, impls: F) -> Result<Arc<ProxyShape>, MemoError>
    where
        F: FnOnce() -> Vec<&'static MemoizedImpl>,
    {
        let mut shapes = self.shapes.lock();
        if let Some(shape) = shapes.get(&source) {
            return Ok(Arc::clone(shape));
        }
        let shape = match ProxyBuilder::build(source, source_name, &impls()) {
            Ok(shape) => Arc::new(shape),
            Err(e) => {
                warn!("Building proxy for {} failed: {}", source_name, e);
                return Err(e);
            }
        };
        self.builds.fetch_add(1, Ordering::SeqCst);
        debug!("Built proxy for {} with {} memoized method(s)", source_name, shape.methods().len());
        shapes.insert(source, Arc::clone(&shape));
        Ok(shape)
    }

    pub fn get<T: 'static>(&self) -> Option<Arc<ProxyShape>> {
        self.shapes.lock().get(&TypeId::of::<T>()).cloned()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.shapes.lock().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.shapes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.lock().is_empty()
    }

    /// Number of shapes synthesized so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}
