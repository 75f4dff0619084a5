use crate::cache::BoxedCache;
use std::any::TypeId;
use std::fmt;

/// How a method receives its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// Associated function without `self`.
    None,
    /// `self` by value.
    Value,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
}

/// Identifies one method of one trait implemented by a source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub interface: &'static str,
    pub name: &'static str,
}

impl MethodId {
    pub const fn new(interface: &'static str, name: &'static str) -> Self {
        MethodId { interface, name }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.interface, self.name)
    }
}

/// Shape of one method as seen by `#[memoized]`.
#[derive(Debug)]
pub struct MethodDescriptor {
    pub id: MethodId,
    pub params: &'static [&'static str],
    /// `"()"` for methods returning nothing.
    pub returns: &'static str,
    pub receiver: Receiver,
    pub generic: bool,
    pub marked: bool,
    /// Creates the empty cache of this method, absent when its key or value cannot be cached.
    pub new_cache: Option<fn() -> BoxedCache>,
}

impl MethodDescriptor {
    pub fn returns_value(&self) -> bool {
        self.returns != "()"
    }

    pub fn is_overridable(&self) -> bool {
        matches!(self.receiver, Receiver::Ref | Receiver::RefMut)
    }
}

/// One `#[memoized]` trait impl, collected at link time through `inventory`.
pub struct MemoizedImpl {
    pub source: fn() -> TypeId,
    pub source_name: &'static str,
    pub interface: &'static str,
    pub methods: &'static [MethodDescriptor],
}

impl MemoizedImpl {
    pub fn source_id(&self) -> TypeId {
        (self.source)()
    }
}

impl fmt::Debug for MemoizedImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedImpl")
            .field("source", &self.source_name)
            .field("interface", &self.interface)
            .field("methods", &self.methods.len())
            .finish()
    }
}

inventory::collect!(MemoizedImpl);

pub fn type_id_of<T: ?Sized + 'static>() -> TypeId {
    TypeId::of::<T>()
}
