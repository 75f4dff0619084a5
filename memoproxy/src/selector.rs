use crate::descriptor::{MemoizedImpl, MethodDescriptor};
use std::any::TypeId;

/// Decides which methods of a source type get a cache.
pub struct MethodSelector;

impl MethodSelector {
    /// All `#[memoized]` impls registered for `source`, ordered by trait name.
    pub fn impls_for(source: TypeId) -> Vec<&'static MemoizedImpl> {
        let mut impls: Vec<&'static MemoizedImpl> =
            inventory::iter::<MemoizedImpl>.into_iter().filter(|i| i.source_id() == source).collect();
        impls.sort_by(|a, b| a.interface.cmp(b.interface));
        impls
    }

    pub fn is_memoizable(method: &MethodDescriptor) -> bool {
        method.is_overridable() && method.returns_value() && !method.params.is_empty() && method.marked
    }

    /// Memoizable methods in impl order, then declaration order.
    pub fn select<'a>(impls: &[&'a MemoizedImpl]) -> Vec<&'a MethodDescriptor> {
        impls
            .iter()
            .flat_map(|i| i.methods.iter())
            .filter(|m| Self::is_memoizable(m))
            .collect()
    }
}
