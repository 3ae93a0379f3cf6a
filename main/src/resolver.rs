//! Turning a mix of lazy and literal arguments into concrete values.

use std::collections::BTreeMap;

use crate::{
    chain::ChainedArgument,
    error::Result,
    snapshot::CallArguments,
    value::{Function, Kwargs, Value},
};

/// Keyword arguments given at decoration time.
pub type LazyKwargs = BTreeMap<String, Argument>;

/// An argument given at decoration time.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Resolved against the arguments of each call.
    Lazy(ChainedArgument),
    /// Passed through unchanged.
    Literal(Value),
}

impl Argument {
    /// The concrete value of this argument for one call.
    pub fn resolve(&self, call_arguments: &CallArguments) -> Result<Value> {
        match self {
            Argument::Lazy(chain) => chain.resolve(call_arguments),
            Argument::Literal(value) => Ok(value.clone()),
        }
    }

    /// Whether this argument depends on the call.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Argument::Lazy(_))
    }
}

impl From<ChainedArgument> for Argument {
    fn from(chain: ChainedArgument) -> Self {
        Argument::Lazy(chain)
    }
}

macro_rules! impl_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Argument::Literal(value.into())
                }
            }
        )*
    };
}

impl_from_literal!(Value, (), bool, i32, i64, u32, f64, &str, String, Vec<Value>, Kwargs, Function);

/// Resolves decoration-time arguments against the arguments of one call.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentResolver<'a> {
    call_arguments: &'a CallArguments,
}

impl<'a> ArgumentResolver<'a> {
    /// Creates a resolver for the given call.
    pub fn new(call_arguments: &'a CallArguments) -> Self {
        ArgumentResolver { call_arguments }
    }

    /// Resolves positional and keyword arguments, keeping their order and keys.
    pub fn resolve(&self, args: &[Argument], kwargs: &LazyKwargs) -> Result<(Vec<Value>, Kwargs)> {
        let args = args
            .iter()
            .map(|arg| arg.resolve(self.call_arguments))
            .collect::<Result<Vec<_>>>()?;

        let kwargs = kwargs
            .iter()
            .map(|(name, arg)| Ok((name.clone(), arg.resolve(self.call_arguments)?)))
            .collect::<Result<Kwargs>>()?;

        Ok((args, kwargs))
    }
}
