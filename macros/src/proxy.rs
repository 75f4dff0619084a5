use crate::emit;
use crate::macro_utils;
use crate::method::{CacheTypes, MethodDef};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{ImplItem, ItemImpl, Path, Type};

/// Everything `#[memoized]` derives from one `impl Trait for Type` block.
pub struct ProxyMacros {
    pub source_name: String,
    pub interface: String,
    pub base_impl: ItemImpl,
    pub proxy_items: Vec<TokenStream>,
    pub descriptors: Vec<TokenStream>,
    self_ty: Type,
    trait_path: Path,
}

impl ProxyMacros {
    pub fn new(item_impl: &ItemImpl) -> Result<ProxyMacros, syn::Error> {
        let trait_path = match &item_impl.trait_ {
            Some((None, path, _)) => path.clone(),
            Some((Some(bang), _, _)) => {
                return Err(syn::Error::new(bang.span(), "#[memoized] cannot be applied to negative impls"));
            }
            None => {
                return Err(syn::Error::new(
                    item_impl.self_ty.span(),
                    "#[memoized] must be applied to a trait impl, `impl Trait for Type`",
                ));
            }
        };
        if !item_impl.generics.params.is_empty() {
            return Err(syn::Error::new(item_impl.generics.span(), "#[memoized] does not support generic impls"));
        }
        let self_ty = (*item_impl.self_ty).clone();
        let source_name = macro_utils::compact_name(&self_ty);
        let interface = macro_utils::compact_name(&trait_path);

        let mut base_impl = item_impl.clone();
        let mut proxy_items = Vec::new();
        let mut descriptors = Vec::new();

        for item in base_impl.items.iter_mut() {
            match item {
                ImplItem::Fn(item_fn) => {
                    let method = MethodDef::new(item_fn)?;
                    macro_utils::strip_markers(&mut item_fn.attrs);
                    let cache = if method.is_memoizable() { Some(method.cache_types()?) } else { None };
                    proxy_items.push(Self::proxy_method(&method, &interface, &trait_path, &self_ty, cache.as_ref())?);
                    descriptors.push(emit::method_descriptor(&method, &interface, cache.as_ref()));
                }
                ImplItem::Type(item_type) => proxy_items.push(emit::forwarded_type(item_type, &trait_path, &self_ty)?),
                ImplItem::Const(item_const) => proxy_items.push(emit::forwarded_const(item_const, &trait_path, &self_ty)),
                other => {
                    return Err(syn::Error::new(other.span(), "#[memoized] supports only functions, associated types and consts"));
                }
            }
        }

        Ok(ProxyMacros { source_name, interface, base_impl, proxy_items, descriptors, self_ty, trait_path })
    }

    fn proxy_method(
        method: &MethodDef,
        interface: &str,
        trait_path: &Path,
        self_ty: &Type,
        cache: Option<&CacheTypes>,
    ) -> Result<TokenStream, syn::Error> {
        match cache {
            Some(cache) if method.is_memoizable() => Ok(emit::memoized_override(method, interface, self_ty, cache)),
            _ if method.receiver.is_overridable() => Ok(emit::copied_method(method)),
            _ => emit::forwarded_method(method, trait_path, self_ty),
        }
    }

    pub fn expand(&self) -> TokenStream {
        let base_impl = &self.base_impl;
        let unsafety = &self.base_impl.unsafety;
        let attrs = &self.base_impl.attrs;
        let trait_path = &self.trait_path;
        let self_ty = &self.self_ty;
        let proxy_items = &self.proxy_items;
        let registration = emit::registration(self_ty, &self.source_name, &self.interface, &self.descriptors);
        quote! {
            #base_impl

            #(#attrs)*
            #unsafety impl #trait_path for ::memoproxy::Memoized<#self_ty> {
                #(#proxy_items)*
            }

            #registration
        }
    }

    pub fn dump_name(&self) -> String {
        format!("{}_{}", self.source_name, self.interface)
    }
}

pub fn new(item_impl: &ItemImpl) -> Result<(String, TokenStream), syn::Error> {
    let macros = ProxyMacros::new(item_impl)?;
    Ok((macros.dump_name(), macros.expand()))
}
