use crate::error::{BoxError, MemoError};
use crate::proxy::Memoized;
use crate::registry::TypeRegistry;
use std::any::type_name;

/// Builds a source value from the constructor arguments forwarded by `create`.
pub trait Construct<Args>: Sized {
    fn construct(args: Args) -> Result<Self, BoxError>;
}

impl<T: Default> Construct<()> for T {
    fn construct(_args: ()) -> Result<Self, BoxError> {
        Ok(T::default())
    }
}

/// Constructs `T` from `args` and puts it behind its memoizing proxy.
pub fn create<T, A>(args: A) -> Result<Memoized<T>, MemoError>
where
    T: Construct<A> + 'static,
{
    create_in(TypeRegistry::global(), args)
}

pub fn create_in<T, A>(registry: &TypeRegistry, args: A) -> Result<Memoized<T>, MemoError>
where
    T: Construct<A> + 'static,
{
    let shape = registry.get_or_build::<T>()?;
    let inner = T::construct(args).map_err(|cause| MemoError::Construction { source_type: type_name::<T>(), cause })?;
    Ok(Memoized::from_parts(inner, shape))
}

/// Puts an already constructed value behind its memoizing proxy.
pub fn wrap<T: 'static>(inner: T) -> Result<Memoized<T>, MemoError> {
    wrap_in(TypeRegistry::global(), inner)
}

pub fn wrap_in<T: 'static>(registry: &TypeRegistry, inner: T) -> Result<Memoized<T>, MemoError> {
    let shape = registry.get_or_build::<T>()?;
    Ok(Memoized::from_parts(inner, shape))
}
