//! memoproxy reads `#[memoize]` markers on the methods of a `#[memoized]` trait impl and derives a
//! memoizing proxy, [`Memoized<T>`], that implements the same trait as the source type `T`.
//!
//! The proxy keeps one unbounded cache per memoized method and per instance. Repeated calls with
//! equal arguments return the stored result instead of running the method again, recursive calls
//! made from inside a method body go through the proxy as well. Proxy shapes are built once per
//! source type by the [`TypeRegistry`] and reused by every instance.
//!
//! ```ignore
//! use memoproxy::*;
//!
//! pub trait Fibonacci {
//!     fn fibonacci(&self, index: u32) -> u64;
//! }
//!
//! #[derive(Default)]
//! pub struct Plain;
//!
//! #[memoized]
//! impl Fibonacci for Plain {
//!     #[memoize]
//!     fn fibonacci(&self, index: u32) -> u64 {
//!         if index < 2 { index as u64 } else { self.fibonacci(index - 1) + self.fibonacci(index - 2) }
//!     }
//! }
//!
//! let fib = memoproxy::create::<Plain, _>(()).unwrap();
//! assert_eq!(fib.fibonacci(90), 2880067194370816120);
//! ```

extern crate self as memoproxy;

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod instantiate;
pub mod key;
pub mod logger;
pub mod macro_rules;
pub mod proxy;
pub mod registry;
pub mod selector;
pub mod shape;

pub use cache::{CacheStats, MethodCache, Outcome};
pub use descriptor::{type_id_of, MemoizedImpl, MethodDescriptor, MethodId, Receiver};
pub use error::{BoxError, MemoError};
pub use instantiate::{create, create_in, wrap, wrap_in, Construct};
pub use inventory;
pub use key::{ArgumentKey, ArgumentList};
pub use memoproxy_macros::{memoize, memoized};
pub use once_cell;
pub use proxy::Memoized;
pub use registry::TypeRegistry;
pub use selector::MethodSelector;
pub use shape::{ProxyBuilder, ProxyShape};
