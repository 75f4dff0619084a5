use crate::macro_utils;
use crate::method::{CacheTypes, MethodDef, ReceiverKind};
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{FnArg, ImplItemConst, ImplItemType, Pat, PatIdent, Path, Type};

/// Trait name prefixed by the module of the impl, so equally named traits of different modules stay apart.
fn qualified(interface: &str) -> TokenStream {
    quote!(::core::concat!(::core::module_path!(), "::", #interface))
}

/// Signature of the proxy method: same types, arguments renamed to `__argN`.
fn proxy_signature(method: &MethodDef) -> syn::Signature {
    let mut sig = method.item.sig.clone();
    let mut params = method.params.iter();
    for input in sig.inputs.iter_mut() {
        if let FnArg::Typed(pat_type) = input {
            if let Some(param) = params.next() {
                pat_type.pat = Box::new(Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident: param.arg.clone(),
                    subpat: None,
                }));
            }
        }
    }
    sig
}

/// Cache-check, compute through the base body, store.
pub fn memoized_override(method: &MethodDef, interface: &str, self_ty: &Type, cache: &CacheTypes) -> TokenStream {
    let attrs = &method.item.attrs;
    let sig = proxy_signature(method);
    let name = method.name_literal();
    let interface = qualified(interface);
    let value = &cache.value;
    let key_tuple = cache.key_tuple();
    let key_exprs = &cache.key_exprs;
    let pats = method.params.iter().map(|p| &p.pat);
    let args = method.params.iter().map(|p| &p.arg);
    let stmts = &method.item.block.stmts;
    let (lookup, remember) = if cache.fallible {
        (quote!(lookup_outcome), quote!(remember_outcome))
    } else {
        (quote!(lookup), quote!(remember))
    };
    quote! {
        #(#attrs)*
        #[allow(clippy::redundant_closure_call)]
        #sig {
            const __METHOD: ::memoproxy::MethodId = ::memoproxy::MethodId::new(#interface, #name);
            let __key = ::memoproxy::ArgumentKey::new((#(#key_exprs,)*));
            if let ::core::option::Option::Some(__hit) =
                ::memoproxy::Memoized::<#self_ty>::#lookup::<#key_tuple, #value>(self, &__METHOD, &__key) {
                return __hit;
            }
            let __value: #value = (|| -> #value {
                #(let #pats = #args;)*
                #(#stmts)*
            })();
            ::memoproxy::Memoized::<#self_ty>::#remember::<#key_tuple, #value>(self, &__METHOD, __key, __value)
        }
    }
}

/// Copies the body so that `self` is the proxy and nested calls dispatch through it.
pub fn copied_method(method: &MethodDef) -> TokenStream {
    let item = &method.item;
    quote!(#item)
}

/// Delegates a method the proxy cannot re-host to the source type's implementation.
pub fn forwarded_method(method: &MethodDef, trait_path: &Path, self_ty: &Type) -> Result<TokenStream, syn::Error> {
    let sig = proxy_signature(method);
    if method.params.iter().any(|p| macro_utils::mentions_self_type(&p.tpe)) || macro_utils::mentions_self_type(&sig.output) {
        return Err(syn::Error::new(
            sig.span(),
            "#[memoized] cannot forward functions whose parameters or return type mention `Self`",
        ));
    }
    let attrs = &method.item.attrs;
    let name = &method.name;
    let args = method.params.iter().map(|p| &p.arg);
    let receiver = match method.receiver {
        ReceiverKind::Value => quote!(::memoproxy::Memoized::<#self_ty>::into_inner(self),),
        _ => quote!(),
    };
    Ok(quote! {
        #(#attrs)*
        #sig {
            <#self_ty as #trait_path>::#name(#receiver #(#args),*)
        }
    })
}

pub fn forwarded_type(item: &ImplItemType, trait_path: &Path, self_ty: &Type) -> Result<TokenStream, syn::Error> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(item.generics.span(), "#[memoized] cannot forward generic associated types"));
    }
    let ident = &item.ident;
    Ok(quote! {
        type #ident = <#self_ty as #trait_path>::#ident;
    })
}

pub fn forwarded_const(item: &ImplItemConst, trait_path: &Path, self_ty: &Type) -> TokenStream {
    let ident = &item.ident;
    let ty = &item.ty;
    quote! {
        const #ident: #ty = <#self_ty as #trait_path>::#ident;
    }
}

/// Static description of one method, read by the runtime selector.
pub fn method_descriptor(method: &MethodDef, interface: &str, cache: Option<&CacheTypes>) -> TokenStream {
    let name = method.name_literal();
    let interface = qualified(interface);
    let params: Vec<String> = method.params.iter().map(|p| macro_utils::compact_name(&p.tpe)).collect();
    let returns = match &method.output {
        Some(ty) => macro_utils::compact_name(ty),
        None => "()".to_string(),
    };
    let receiver = method.receiver.descriptor();
    let generic = method.has_generics();
    let marked = method.marked;
    let new_cache = match cache {
        Some(cache) => {
            let key_tuple = cache.key_tuple();
            let stored = cache.stored_value();
            quote!(::core::option::Option::Some(::memoproxy::MethodCache::<#key_tuple, #stored>::erased))
        }
        None => quote!(::core::option::Option::None),
    };
    quote! {
        ::memoproxy::MethodDescriptor {
            id: ::memoproxy::MethodId::new(#interface, #name),
            params: &[#(#params),*],
            returns: #returns,
            receiver: #receiver,
            generic: #generic,
            marked: #marked,
            new_cache: #new_cache,
        }
    }
}

/// Registers the impl with the runtime through `inventory`.
pub fn registration(self_ty: &Type, source_name: &str, interface: &str, descriptors: &[TokenStream]) -> TokenStream {
    let interface = qualified(interface);
    quote! {
        ::memoproxy::inventory::submit! {
            ::memoproxy::MemoizedImpl {
                source: ::memoproxy::type_id_of::<#self_ty>,
                source_name: #source_name,
                interface: #interface,
                methods: &[#(#descriptors),*],
            }
        }
    }
}
