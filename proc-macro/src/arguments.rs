//! Parsing of argument lists that may contain keyword arguments.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr, Ident, Token,
};

/// The arguments of a call, split into positional and keyword arguments.
///
/// Keyword arguments are written as assignments, e.g. `name = value`, and must follow all
/// positional arguments.
pub(crate) struct ArgumentList {
    /// The positional arguments, in order.
    pub(crate) positional: Vec<Expr>,
    /// The keyword arguments, in order.
    pub(crate) keyword: Vec<(Ident, Expr)>,
}

impl ArgumentList {
    /// Splits the given expressions into positional and keyword arguments.
    pub(crate) fn from_exprs<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> syn::Result<Self> {
        let mut positional = Vec::new();
        let mut keyword: Vec<(Ident, Expr)> = Vec::new();

        for expr in exprs {
            match expr {
                Expr::Assign(assign) => {
                    let name = match &*assign.left {
                        Expr::Path(path) if path.qself.is_none() && path.attrs.is_empty() => {
                            path.path.get_ident().cloned()
                        }
                        _ => None,
                    }
                    .ok_or_else(|| {
                        syn::Error::new_spanned(
                            &assign.left,
                            "keyword argument names must be plain identifiers",
                        )
                    })?;

                    if keyword.iter().any(|(existing, _)| *existing == name) {
                        return Err(syn::Error::new_spanned(
                            name,
                            "keyword argument repeated",
                        ));
                    }

                    keyword.push((name, (*assign.right).clone()));
                }
                expr if !keyword.is_empty() => {
                    return Err(syn::Error::new_spanned(
                        expr,
                        "positional argument follows keyword argument",
                    ));
                }
                expr => positional.push(expr.clone()),
            }
        }

        Ok(ArgumentList {
            positional,
            keyword,
        })
    }
}

impl Parse for ArgumentList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let exprs = Punctuated::<Expr, Token![,]>::parse_terminated(input)?;

        ArgumentList::from_exprs(&exprs)
    }
}

/// The input of the `precondition` macro: a check followed by its arguments.
pub(crate) struct PreconditionInput {
    /// The expression producing the check.
    pub(crate) check: Expr,
    /// The arguments of the check.
    pub(crate) arguments: ArgumentList,
}

impl Parse for PreconditionInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let exprs = Punctuated::<Expr, Token![,]>::parse_terminated(input)?;
        let mut exprs = exprs.iter();

        let check = match exprs.next() {
            Some(Expr::Assign(assign)) => {
                return Err(syn::Error::new_spanned(
                    assign,
                    "the check must come before its arguments",
                ))
            }
            Some(check) => check.clone(),
            None => return Err(input.error("expected a check function")),
        };

        Ok(PreconditionInput {
            check,
            arguments: ArgumentList::from_exprs(exprs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::parse2;

    use super::*;

    #[test]
    fn parse_positional_and_keyword() {
        let list: ArgumentList = parse2(quote! {
            1, S[0], name = "x", other = W.y
        })
        .expect("parses");

        assert_eq!(list.positional.len(), 2);
        assert_eq!(
            list.keyword
                .iter()
                .map(|(name, _)| name.to_string())
                .collect::<Vec<_>>(),
            vec!["name", "other"]
        );
    }

    #[test]
    fn parse_empty() {
        let list: ArgumentList = parse2(quote! {}).expect("parses");

        assert!(list.positional.is_empty());
        assert!(list.keyword.is_empty());
    }

    #[test]
    fn parse_positional_after_keyword() {
        let result: Result<ArgumentList, _> = parse2(quote! {
            a = 1, 2
        });

        assert!(result.is_err());
    }

    #[test]
    fn parse_repeated_keyword() {
        let result: Result<ArgumentList, _> = parse2(quote! {
            a = 1, a = 2
        });

        assert!(result.is_err());
    }

    #[test]
    fn parse_non_ident_keyword() {
        let result: Result<ArgumentList, _> = parse2(quote! {
            a.b = 1
        });

        assert!(result.is_err());
    }

    #[test]
    fn parse_precondition_input() {
        let input: PreconditionInput = parse2(quote! {
            check, S[0], c = S.c
        })
        .expect("parses");

        assert_eq!(input.arguments.positional.len(), 1);
        assert_eq!(input.arguments.keyword.len(), 1);

        let result: Result<PreconditionInput, _> = parse2(quote! {});
        assert!(result.is_err());

        let result: Result<PreconditionInput, _> = parse2(quote! {
            c = S.c
        });
        assert!(result.is_err());
    }
}
