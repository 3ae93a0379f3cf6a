//! Allows retrieving the path of the main crate.

use lazy_static::lazy_static;
use proc_macro2::{Span, TokenStream};
use proc_macro_error::abort_call_site;
use quote::quote;
use std::env;
use syn::Ident;

lazy_static! {
    /// The name the main `lazyargs` crate is imported under.
    static ref CRATE_NAME: String = {
        match proc_macro_crate::crate_name("lazyargs") {
            Ok(name) => name,
            Err(err) => match env::var("CARGO_PKG_NAME") {
                // This allows for writing documentation tests in the main crate itself.
                Ok(val) if val == "lazyargs" => "lazyargs".into(),
                _ => abort_call_site!("crate `lazyargs` must be imported: {}", err),
            },
        }
    };
}

/// Returns the path of the main crate, to be used in generated code.
pub(crate) fn crate_path() -> TokenStream {
    if *CRATE_NAME == "crate" {
        quote! { crate }
    } else {
        let name = Ident::new(&CRATE_NAME, Span::call_site());
        quote! { ::#name }
    }
}
