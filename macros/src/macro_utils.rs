use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{quote, ToTokens};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use syn::{Attribute, GenericArgument, PathArguments, ReturnType, Type};

pub fn is_marker(attr: &Attribute) -> bool {
    attr.path().segments.last().is_some_and(|seg| seg.ident == "memoize")
}

/// Removes `#[memoize]` markers, returning whether there was one.
pub fn strip_markers(attrs: &mut Vec<Attribute>) -> bool {
    let before = attrs.len();
    attrs.retain(|attr| !is_marker(attr));
    attrs.len() != before
}

pub fn is_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(t) if t.elems.is_empty()),
    }
}

/// `Result`, `io::Result<T>`, `std::result::Result<T, E>` and local aliases named `Result`.
pub fn is_result(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if tp.qself.is_none() && tp.path.segments.last().is_some_and(|seg| seg.ident == "Result"))
}

/// The `T` of `Result<T, ..>`, the first type argument of the last path segment.
pub fn ok_type(ty: &Type) -> Option<&Type> {
    let Type::Path(tp) = ty else { return None };
    match &tp.path.segments.last()?.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

fn any_token(stream: TokenStream2, pred: &dyn Fn(&TokenTree, Option<&TokenTree>) -> bool) -> bool {
    let tokens: Vec<TokenTree> = stream.into_iter().collect();
    tokens.iter().enumerate().any(|(i, tt)| match tt {
        TokenTree::Group(group) => any_token(group.stream(), pred),
        other => pred(other, tokens.get(i + 1)),
    })
}

pub fn mentions_self_type<T: ToTokens>(item: &T) -> bool {
    any_token(item.to_token_stream(), &|tt, _| matches!(tt, TokenTree::Ident(id) if id == "Self"))
}

pub fn borrows<T: ToTokens>(item: &T) -> bool {
    any_token(item.to_token_stream(), &|tt, _| matches!(tt, TokenTree::Punct(p) if p.as_char() == '&'))
}

pub fn has_impl_trait<T: ToTokens>(item: &T) -> bool {
    any_token(item.to_token_stream(), &|tt, _| matches!(tt, TokenTree::Ident(id) if id == "impl" || id == "dyn"))
}

/// `impl Trait` anywhere in the type; `dyn Trait` is a nameable type and passes.
pub fn has_opaque_type<T: ToTokens>(item: &T) -> bool {
    any_token(item.to_token_stream(), &|tt, _| matches!(tt, TokenTree::Ident(id) if id == "impl"))
}

/// Any lifetime other than `'static`.
pub fn has_local_lifetime<T: ToTokens>(item: &T) -> bool {
    any_token(item.to_token_stream(), &|tt, next| {
        matches!(tt, TokenTree::Punct(p) if p.as_char() == '\'')
            && !matches!(next, Some(TokenTree::Ident(id)) if id == "static")
    })
}

/// Token text without the spacing `quote` puts between tokens.
pub fn compact_name<T: ToTokens>(item: &T) -> String {
    item.to_token_stream().to_string().replace(' ', "")
}

pub fn write_to_local_file(lines: Vec<String>, dir_name: &str, file_name: &str) {
    let dir_path = match env::current_dir() {
        Ok(dir) => dir.join("target").join("macros").join(dir_name),
        Err(e) => {
            eprintln!("Current dir inaccessible: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::create_dir_all(&dir_path) {
        eprintln!("Failed to create directory {:?}: {}", dir_path, e);
        return;
    }
    let full_path = dir_path.join(file_name);

    if let Err(e) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&full_path)
        .and_then(|mut file| file.write_all(lines.join("\n").as_bytes()))
    {
        eprintln!("Failed to write to {:?}: {}", full_path, e);
    }
}

/// Pretty-prints the expansion to `target/macros/<dir>/<name>.rs` when `MEMOPROXY_DUMP` is set.
pub fn submit_impl_to_stream(stream: TokenStream2, dir: &str, name: &str) -> TokenStream {
    if env::var_os("MEMOPROXY_DUMP").is_some() {
        let formatted_token_stream =
            match syn::parse2::<syn::File>(stream.clone()) {
                Ok(ast) => prettyplease::unparse(&ast),
                Err(_) => stream.to_string(),
            };
        let file_name: String = name.chars().map(|c| if c.is_alphanumeric() { c } else { '_' }).collect();
        write_to_local_file(vec![formatted_token_stream], dir, &format!("{}.rs", file_name));
    }

    quote! {
        #stream
    }.into()
}
