//! Preconditions whose arguments are lazy references into the arguments of each call.
//!
//! A precondition pairs a check function with arguments that are written down once, when a
//! function is decorated, but refer to values that only exist once the function is called:
//!
//! ```rust
//! use lazyargs::{precondition, Error, Function, Kwargs, LazyKwargs, Signature, Value, S};
//!
//! // `transfer(amount, *, fee=1)`
//! let signature = Signature::builder("transfer")
//!     .param("amount")
//!     .keyword_only_with_default("fee", 1)
//!     .build();
//! let transfer = Function::new("transfer", |args, _| Ok(args[0].clone()));
//!
//! let fee_below_amount = Function::new("fee_below_amount", |args, _| {
//!     match (args[0].as_int(), args[1].as_int()) {
//!         (Some(amount), Some(fee)) if fee < amount => Ok(Value::None),
//!         _ => Err(Error::check_failed("the fee must be below the amount")),
//!     }
//! });
//!
//! let transfer = precondition(
//!     fee_below_amount,
//!     vec![S.arg(0).into(), S.kwarg("fee").into()],
//!     LazyKwargs::new(),
//! )
//! .decorate(signature, transfer);
//!
//! assert_eq!(transfer.call(vec![10.into()], Kwargs::new()).unwrap(), Value::Int(10));
//! assert!(transfer.call(vec![1.into()], Kwargs::new()).is_err());
//! ```
//!
//! # Lazy arguments
//!
//! [`S`] and [`W`] create lazy arguments. `S.arg(0)` refers to the first positional argument,
//! `S.kwarg("fee")` to the argument named `fee`, `S.varargs()` and `S.varkwargs()` to whatever the
//! `*args` and `**kwargs` parameters absorbed. Operations on the referenced value are recorded
//! with [`ChainedArgument::attr`], [`ChainedArgument::index`] and [`ChainedArgument::call`] and
//! replayed for every call.
//!
//! The two factories differ in how they look up keyword arguments: [`W`] (strict) only sees
//! arguments that were passed by keyword, while [`S`] (lenient) falls back to the bound parameters,
//! so it also finds arguments passed by position or left at their default.
//!
//! # Macros
//!
//! With the `macros` feature (enabled by default), the `lazy!`, `lazy_call!` and `precondition!`
//! macros accept the same expressions in ordinary Rust syntax, e.g. `lazy!(S[0].name.upper())`.

mod chain;
mod decorate;
mod error;
mod factory;
mod precondition;
mod reference;
mod resolver;
mod signature;
mod snapshot;
mod value;

pub use crate::{
    chain::{ChainedArgument, Operation},
    decorate::{decorate, Decorator},
    error::{BindError, Error, Result},
    factory::{LazyArgs, S, W},
    precondition::{precondition, CheckSource, LazyFunction, Precondition},
    reference::{KeyType, LazyReference, Slot, VAR_KEYWORD_TOKEN, VAR_POSITIONAL_TOKEN},
    resolver::{Argument, ArgumentResolver, LazyKwargs},
    signature::{Parameter, Signature, SignatureBuilder},
    snapshot::CallArguments,
    value::{Function, Kwargs, Namespace, Object, Value},
};

cfg_if::cfg_if! {
    if #[cfg(feature = "macros")] {
        /// Builds a [`ChainedArgument`] from an expression rooted at [`S`] or [`W`].
        ///
        /// `S[0]` becomes `S.arg(0)`, `S.name` becomes `S.kwarg("name")`, `S["*args"]` and
        /// `S["**kwargs"]` become `S.varargs()` and `S.varkwargs()`. Everything after the root is
        /// recorded: `.field` as an attribute lookup, `[key]` as indexing, `(..)` as a call and
        /// `.method(..)` as both. Call arguments of the form `name = value` are keyword arguments.
        pub use lazyargs_proc_macro::lazy;

        /// Records a call of a check function as a [`CheckSource::Deferred`].
        ///
        /// Arguments rooted at `S` or `W` become lazy arguments, all others literals.
        pub use lazyargs_proc_macro::lazy_call;

        /// Creates a [`Precondition`] from a check and its arguments.
        ///
        /// Arguments rooted at `S` or `W` become lazy arguments, all others literals.
        pub use lazyargs_proc_macro::precondition;
    }
}
