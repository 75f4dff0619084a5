use rustc_hash::FxHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tuples usable as the argument list of a memoized call.
pub trait ArgumentList {
    const ARITY: usize;
}

/// Composite cache key holding the arguments of one call, in call order.
///
/// The tuple hash is computed once at construction. Equality compares that hash
/// only to reject quickly, the decision is always made by comparing the arguments
/// pairwise, so two argument lists whose hashes collide remain distinct keys.
#[derive(Clone)]
pub struct ArgumentKey<A> {
    args: A,
    hash: u64,
}

impl<A: Hash> ArgumentKey<A> {
    pub fn new(args: A) -> Self {
        let mut hasher = FxHasher::default();
        args.hash(&mut hasher);
        ArgumentKey { args, hash: hasher.finish() }
    }
}

impl<A> ArgumentKey<A> {
    pub fn args(&self) -> &A {
        &self.args
    }

    pub fn into_args(self) -> A {
        self.args
    }

    pub fn combined_hash(&self) -> u64 {
        self.hash
    }
}

impl<A: ArgumentList> ArgumentKey<A> {
    pub fn arity(&self) -> usize {
        A::ARITY
    }
}

impl<A: PartialEq> PartialEq for ArgumentKey<A> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.args == other.args
    }
}

impl<A: Eq> Eq for ArgumentKey<A> {}

impl<A> Hash for ArgumentKey<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<A: fmt::Debug> fmt::Debug for ArgumentKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgumentKey").field(&self.args).finish()
    }
}
