//! Procedural macros for `lazyargs`.
//!
//! These macros only rewrite expression syntax into calls of the builder API of the main crate.
//! Use them through the re-exports in `lazyargs`.

use proc_macro::TokenStream;
use proc_macro_error::{abort, proc_macro_error};
use quote::quote;
use syn::{parse_macro_input, Expr};

use crate::{
    arguments::{ArgumentList, PreconditionInput},
    crate_name::crate_path,
    lazy_expr::{render_arguments, render_lazy},
};

mod arguments;
mod crate_name;
mod lazy_expr;

/// Builds a lazy argument from an expression rooted at `S` or `W`.
///
/// ```rust,ignore
/// use lazyargs::{lazy, S};
///
/// let name = lazy!(S[0].name.upper());
/// // is the same as
/// let name = S.arg(0).attr("name").attr("upper").call_kw(vec![], Kwargs::new());
/// ```
///
/// Note that `S.arg(0)` inside the macro refers to a keyword argument named `arg` that is then
/// called; write `S[0]` instead.
#[proc_macro]
#[proc_macro_error]
pub fn lazy(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);

    match render_lazy(&expr, &crate_path()) {
        Ok(output) => output.into(),
        Err(err) => abort!(err),
    }
}

/// Records a call of a check function, to be used as the check of a precondition.
///
/// ```rust,ignore
/// use lazyargs::{lazy_call, precondition, S};
///
/// let check = lazy_call!(in_range(S[0], low = 0, high = S.limit));
/// let precondition = precondition!(check);
/// ```
#[proc_macro]
#[proc_macro_error]
pub fn lazy_call(input: TokenStream) -> TokenStream {
    let call = match parse_macro_input!(input as Expr) {
        Expr::Call(call) => call,
        other => abort!(other, "expected a call of a check function"),
    };
    let krate = crate_path();
    let function = &call.func;

    let rendered = ArgumentList::from_exprs(&call.args)
        .and_then(|arguments| render_arguments(&arguments, &krate));
    let (args, kwargs) = match rendered {
        Ok(rendered) => rendered,
        Err(err) => abort!(err),
    };

    let output = quote! {
        #krate::LazyFunction::new(#function).call(#args, #kwargs)
    };

    output.into()
}

/// Creates a precondition from a check and its arguments.
///
/// The check is either a function or the result of `lazy_call!`. Arguments rooted at `S` or `W`
/// are resolved for every call, all others are passed to the check as they are.
///
/// ```rust,ignore
/// use lazyargs::{precondition, S};
///
/// let precondition = precondition!(in_range, S[0], low = 0, high = S.limit);
/// let guarded = precondition.decorate(signature, function);
/// ```
#[proc_macro]
#[proc_macro_error]
pub fn precondition(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as PreconditionInput);
    let krate = crate_path();
    let check = &input.check;

    let (args, kwargs) = match render_arguments(&input.arguments, &krate) {
        Ok(rendered) => rendered,
        Err(err) => abort!(err),
    };

    let output = quote! {
        #krate::Precondition::new(#krate::CheckSource::from(#check), #args, #kwargs)
    };

    output.into()
}
