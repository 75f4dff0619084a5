use crate::macro_utils;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{FnArg, ImplItemFn, Pat, ReturnType, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    None,
    Value,
    Ref,
    RefMut,
}

impl ReceiverKind {
    pub fn is_overridable(self) -> bool {
        matches!(self, ReceiverKind::Ref | ReceiverKind::RefMut)
    }

    pub fn descriptor(self) -> TokenStream {
        match self {
            ReceiverKind::None => quote!(::memoproxy::Receiver::None),
            ReceiverKind::Value => quote!(::memoproxy::Receiver::Value),
            ReceiverKind::Ref => quote!(::memoproxy::Receiver::Ref),
            ReceiverKind::RefMut => quote!(::memoproxy::Receiver::RefMut),
        }
    }
}

pub struct ParamDef {
    pub pat: Pat,
    pub tpe: Type,
    /// Name of the argument inside generated proxy methods.
    pub arg: Ident,
}

/// Types of the cache of one method: argument tuple and stored value.
pub struct CacheTypes {
    pub key_types: Vec<Type>,
    pub key_exprs: Vec<TokenStream>,
    pub value: Type,
    pub fallible: bool,
}

impl CacheTypes {
    pub fn key_tuple(&self) -> TokenStream {
        let key_types = &self.key_types;
        quote!((#(#key_types,)*))
    }

    pub fn stored_value(&self) -> TokenStream {
        let value = &self.value;
        if self.fallible {
            quote!(<#value as ::memoproxy::Outcome>::Value)
        } else {
            quote!(#value)
        }
    }
}

/// One method of a `#[memoized]` impl block, markers already stripped.
pub struct MethodDef {
    pub item: ImplItemFn,
    pub name: Ident,
    pub receiver: ReceiverKind,
    pub params: Vec<ParamDef>,
    pub output: Option<Type>,
    pub marked: bool,
}

impl MethodDef {
    pub fn new(item: &ImplItemFn) -> Result<MethodDef, syn::Error> {
        let mut item = item.clone();
        let marked = macro_utils::strip_markers(&mut item.attrs);
        let receiver = match item.sig.receiver() {
            None => ReceiverKind::None,
            Some(receiver) => match &*receiver.ty {
                Type::Reference(r) if matches!(&*r.elem, Type::Path(p) if p.path.is_ident("Self")) => {
                    if r.mutability.is_some() { ReceiverKind::RefMut } else { ReceiverKind::Ref }
                }
                Type::Path(p) if p.path.is_ident("Self") => ReceiverKind::Value,
                other => {
                    return Err(syn::Error::new(other.span(), "#[memoized] supports `self`, `&self` and `&mut self` receivers only"));
                }
            },
        };
        let params = item.sig.inputs.iter()
            .filter_map(|input| match input {
                FnArg::Typed(pat_type) => Some(pat_type),
                FnArg::Receiver(_) => None,
            })
            .enumerate()
            .map(|(i, pat_type)| ParamDef {
                pat: (*pat_type.pat).clone(),
                tpe: (*pat_type.ty).clone(),
                arg: format_ident!("__arg{}", i),
            })
            .collect();
        let output = match &item.sig.output {
            out if macro_utils::is_unit(out) => None,
            ReturnType::Type(_, ty) => Some((**ty).clone()),
            ReturnType::Default => None,
        };
        Ok(MethodDef { name: item.sig.ident.clone(), item, receiver, params, output, marked })
    }

    /// Marked, overridable, returns a value and takes at least one argument.
    pub fn is_memoizable(&self) -> bool {
        self.receiver.is_overridable() && self.output.is_some() && !self.params.is_empty() && self.marked
    }

    pub fn has_generics(&self) -> bool {
        !self.item.sig.generics.params.is_empty()
    }

    pub fn name_literal(&self) -> String {
        self.name.to_string()
    }

    /// Key and value types of this method's cache, or why it cannot have one.
    pub fn cache_types(&self) -> Result<CacheTypes, syn::Error> {
        let sig = &self.item.sig;
        if self.has_generics() {
            return Err(syn::Error::new(sig.generics.span(), "generic methods cannot be memoized"));
        }
        if let Some(asyncness) = &sig.asyncness {
            return Err(syn::Error::new(asyncness.span(), "async methods cannot be memoized"));
        }
        let mut key_types = Vec::with_capacity(self.params.len());
        let mut key_exprs = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let (key_type, key_expr) = Self::key_part(param)?;
            key_types.push(key_type);
            key_exprs.push(key_expr);
        }
        let value = match &self.output {
            Some(ty) => ty.clone(),
            None => syn::parse_quote!(()),
        };
        let fallible = macro_utils::is_result(&value);
        // failures are never stored, so only the success payload has to be cacheable
        let stored = if fallible { macro_utils::ok_type(&value).unwrap_or(&value) } else { &value };
        if macro_utils::borrows(stored) || macro_utils::has_local_lifetime(stored) {
            return Err(syn::Error::new(value.span(), "return type borrows data and cannot be stored in a cache"));
        }
        if macro_utils::has_impl_trait(stored) || macro_utils::mentions_self_type(stored) {
            return Err(syn::Error::new(value.span(), "return type must be a concrete type to be stored in a cache"));
        }
        // the whole type is still named outside the method, in the registered descriptor
        if macro_utils::has_local_lifetime(&value) || macro_utils::has_opaque_type(&value) || macro_utils::mentions_self_type(&value) {
            return Err(syn::Error::new(value.span(), "error type must be nameable outside the method to be memoized"));
        }
        Ok(CacheTypes { key_types, key_exprs, value, fallible })
    }

    /// Owned key type for one parameter and the expression capturing the argument.
    fn key_part(param: &ParamDef) -> Result<(Type, TokenStream), syn::Error> {
        let arg = &param.arg;
        let tpe = &param.tpe;
        if macro_utils::has_impl_trait(tpe) || macro_utils::mentions_self_type(tpe) {
            return Err(syn::Error::new(tpe.span(), "parameter must have a concrete type to be part of a cache key"));
        }
        match tpe {
            Type::Reference(r) if r.mutability.is_some() => {
                Err(syn::Error::new(tpe.span(), "`&mut` parameters cannot be part of a cache key"))
            }
            Type::Reference(r) if !macro_utils::borrows(&r.elem) && !macro_utils::has_local_lifetime(&r.elem) => {
                let elem = &r.elem;
                Ok((
                    syn::parse_quote!(<#elem as ::std::borrow::ToOwned>::Owned),
                    quote!(::std::borrow::ToOwned::to_owned(#arg)),
                ))
            }
            other if macro_utils::borrows(other) || macro_utils::has_local_lifetime(other) => {
                Err(syn::Error::new(other.span(), "parameter type borrows data and cannot be part of a cache key"))
            }
            other => Ok((other.clone(), quote!(::core::clone::Clone::clone(&#arg)))),
        }
    }
}
