extern crate proc_macro;
mod emit;
mod macro_utils;
mod method;
mod proxy;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::{parse_macro_input, ItemImpl};

/// Derives `impl Trait for memoproxy::Memoized<Type>` from `impl Trait for Type`, caching the
/// results of every `#[memoize]` method per argument list.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn memoized(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr: proc_macro2::TokenStream = attr.into();
        return syn::Error::new_spanned(attr, "#[memoized] takes no arguments")
            .to_compile_error()
            .into();
    }
    let item_impl = parse_macro_input!(item as ItemImpl);
    match proxy::new(&item_impl) {
        Ok((name, stream)) => macro_utils::submit_impl_to_stream(stream, "memoized", &name),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Marks a method of a `#[memoized]` impl for memoization; consumed by `#[memoized]`.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn memoize(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let item: proc_macro2::TokenStream = item.into();
    let error = syn::Error::new_spanned(&item, "#[memoize] marks methods of a `#[memoized]` trait impl only")
        .to_compile_error();
    quote::quote!(#error #item).into()
}
