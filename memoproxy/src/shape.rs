use crate::cache::BoxedCache;
use crate::descriptor::{MemoizedImpl, MethodDescriptor, MethodId};
use crate::error::MemoError;
use crate::selector::MethodSelector;
use rustc_hash::{FxHashMap, FxHashSet};
use std::any::TypeId;

/// The proxy type of one source type: which methods carry a cache.
#[derive(Debug)]
pub struct ProxyShape {
    source: TypeId,
    source_name: &'static str,
    methods: Vec<&'static MethodDescriptor>,
}

impl ProxyShape {
    pub fn source(&self) -> TypeId {
        self.source
    }

    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    pub fn methods(&self) -> &[&'static MethodDescriptor] {
        &self.methods
    }

    pub fn method_ids(&self) -> Vec<MethodId> {
        self.methods.iter().map(|m| m.id).collect()
    }

    pub fn is_memoized(&self, method: &MethodId) -> bool {
        self.methods.iter().any(|m| m.id == *method)
    }

    /// Is this shape a plain forwarding proxy without any cache?
    pub fn is_transparent(&self) -> bool {
        self.methods.is_empty()
    }

    /// One empty cache per memoized method, for a fresh instance.
    pub fn allocate(&self) -> FxHashMap<MethodId, BoxedCache> {
        self.methods
            .iter()
            .filter_map(|m| m.new_cache.map(|new_cache| (m.id, new_cache())))
            .collect()
    }
}

pub struct ProxyBuilder;

impl ProxyBuilder {
    pub fn build(source: TypeId, source_name: &'static str, impls: &[&'static MemoizedImpl]) -> Result<ProxyShape, MemoError> {
        let selected = MethodSelector::select(impls);
        let mut seen = FxHashSet::default();
        for method in &selected {
            if !seen.insert(method.id) {
                return Err(MemoError::DuplicateMethod { source_type: source_name, method: method.id });
            }
            Self::check_method(source_name, method)?;
        }
        Ok(ProxyShape { source, source_name, methods: selected })
    }

    fn check_method(source_name: &'static str, method: &MethodDescriptor) -> Result<(), MemoError> {
        if !method.is_overridable() {
            return Err(MemoError::NotOverridable { source_type: source_name, method: method.id });
        }
        if method.generic || method.new_cache.is_none() {
            return Err(MemoError::UnrepresentableReturn { source_type: source_name, method: method.id, returns: method.returns });
        }
        Ok(())
    }
}
