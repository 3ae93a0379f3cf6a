//! Lowers lazy argument expressions to calls of the builder methods of the main crate.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, Expr, ExprLit, ExprPath, Lit, Member};

use crate::arguments::ArgumentList;

/// The names of the lazy argument factories of the main crate.
const FACTORIES: &[&str] = &["S", "W"];

/// Returns the factory `expr` names, if it names one.
fn as_factory(expr: &Expr) -> Option<&ExprPath> {
    match expr {
        Expr::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .filter(|segment| {
                segment.arguments.is_empty()
                    && FACTORIES.iter().any(|factory| segment.ident == *factory)
            })
            .map(|_| path),
        Expr::Paren(paren) => as_factory(&paren.expr),
        Expr::Group(group) => as_factory(&group.expr),
        _ => None,
    }
}

/// Checks if `expr` is an access on a lazy argument factory.
pub(crate) fn is_lazy(expr: &Expr) -> bool {
    match expr {
        Expr::Index(index) => as_factory(&index.expr).is_some() || is_lazy(&index.expr),
        Expr::Field(field) => as_factory(&field.base).is_some() || is_lazy(&field.base),
        Expr::MethodCall(call) => as_factory(&call.receiver).is_some() || is_lazy(&call.receiver),
        Expr::Call(call) => is_lazy(&call.func),
        Expr::Paren(paren) => is_lazy(&paren.expr),
        Expr::Group(group) => is_lazy(&group.expr),
        _ => false,
    }
}

/// Renders a lazy argument expression as a chain of builder calls.
///
/// `krate` is the path of the main crate.
pub(crate) fn render_lazy(expr: &Expr, krate: &TokenStream) -> syn::Result<TokenStream> {
    match expr {
        Expr::Paren(paren) => render_lazy(&paren.expr, krate),
        Expr::Group(group) => render_lazy(&group.expr, krate),
        Expr::Index(index) => match as_factory(&index.expr) {
            Some(factory) => render_root_index(factory, &index.index),
            None => {
                let base = render_lazy(&index.expr, krate)?;
                let key = &index.index;

                Ok(quote! { #base.index(#key) })
            }
        },
        Expr::Field(field) => {
            let name = member_name(&field.member)?;

            match as_factory(&field.base) {
                Some(factory) => Ok(quote! { #factory.kwarg(#name) }),
                None => {
                    let base = render_lazy(&field.base, krate)?;

                    Ok(quote! { #base.attr(#name) })
                }
            }
        }
        Expr::MethodCall(call) => {
            if let Some(turbofish) = &call.turbofish {
                return Err(syn::Error::new_spanned(
                    turbofish,
                    "lazy method calls cannot have generic arguments",
                ));
            }

            let name = call.method.unraw().to_string();
            let base = match as_factory(&call.receiver) {
                Some(factory) => quote! { #factory.kwarg(#name) },
                None => {
                    let base = render_lazy(&call.receiver, krate)?;
                    quote! { #base.attr(#name) }
                }
            };
            let arguments = ArgumentList::from_exprs(&call.args)?;
            let (args, kwargs) = render_call_arguments(&arguments, krate);

            Ok(quote! { #base.call_kw(#args, #kwargs) })
        }
        Expr::Call(call) => {
            let base = render_lazy(&call.func, krate)?;
            let arguments = ArgumentList::from_exprs(&call.args)?;
            let (args, kwargs) = render_call_arguments(&arguments, krate);

            Ok(quote! { #base.call_kw(#args, #kwargs) })
        }
        other => Err(syn::Error::new_spanned(
            other,
            "expected a lazy argument rooted at `S` or `W`",
        )),
    }
}

/// Renders the first access on a factory, which selects the referenced argument.
fn render_root_index(factory: &ExprPath, key: &Expr) -> syn::Result<TokenStream> {
    if let Expr::Lit(ExprLit { lit, .. }) = key {
        match lit {
            Lit::Str(token) if token.value() == "*args" => return Ok(quote! { #factory.varargs() }),
            Lit::Str(token) if token.value() == "**kwargs" => {
                return Ok(quote! { #factory.varkwargs() })
            }
            Lit::Bool(flag) => {
                let index = i64::from(flag.value);
                return Ok(quote! { #factory.arg(#index) });
            }
            Lit::Int(_) | Lit::Verbatim(_) => (),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "lazy argument keys must be integers, \"*args\" or \"**kwargs\"",
                ))
            }
        }
    }

    Ok(quote! { #factory.arg(#key) })
}

/// Returns the name of a named field.
fn member_name(member: &Member) -> syn::Result<String> {
    match member {
        Member::Named(ident) => Ok(ident.unraw().to_string()),
        Member::Unnamed(index) => Err(syn::Error::new_spanned(
            index,
            "use `[index]` to index a lazy argument",
        )),
    }
}

/// Renders the arguments of a call recorded on a chain.
///
/// These are plain values, they are not resolved against the call.
fn render_call_arguments(arguments: &ArgumentList, krate: &TokenStream) -> (TokenStream, TokenStream) {
    let positional = arguments.positional.iter();
    let names = arguments.keyword.iter().map(|(name, _)| name.unraw().to_string());
    let values = arguments.keyword.iter().map(|(_, value)| value);

    (
        quote! { ::std::vec![#(#krate::Value::from(#positional)),*] },
        quote! {
            <#krate::Kwargs as ::std::iter::FromIterator<_>>::from_iter(::std::vec![
                #((::std::string::String::from(#names), #krate::Value::from(#values))),*
            ])
        },
    )
}

/// Renders an argument given at decoration time.
///
/// Expressions rooted at a factory become lazy arguments, everything else a literal.
pub(crate) fn render_argument(expr: &Expr, krate: &TokenStream) -> syn::Result<TokenStream> {
    if is_lazy(expr) {
        let chain = render_lazy(expr, krate)?;

        Ok(quote! { #krate::Argument::from(#chain) })
    } else {
        Ok(quote! { #krate::Argument::from(#expr) })
    }
}

/// Renders decoration-time arguments as a vector of arguments and a map of keyword arguments.
pub(crate) fn render_arguments(
    arguments: &ArgumentList,
    krate: &TokenStream,
) -> syn::Result<(TokenStream, TokenStream)> {
    let positional = arguments
        .positional
        .iter()
        .map(|expr| render_argument(expr, krate))
        .collect::<syn::Result<Vec<_>>>()?;
    let names = arguments.keyword.iter().map(|(name, _)| name.unraw().to_string());
    let values = arguments
        .keyword
        .iter()
        .map(|(_, expr)| render_argument(expr, krate))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok((
        quote! { ::std::vec![#(#positional),*] },
        quote! {
            <#krate::LazyKwargs as ::std::iter::FromIterator<_>>::from_iter(::std::vec![
                #((::std::string::String::from(#names), #values)),*
            ])
        },
    ))
}
