//! Entry points for building lazy arguments.

use crate::{
    chain::ChainedArgument,
    error::{Error, Result},
    reference::{LazyReference, Slot, VAR_KEYWORD_TOKEN, VAR_POSITIONAL_TOKEN},
    value::Value,
};

/// Lenient lazy arguments: keyword references fall back to the bound parameters of the call.
///
/// `S.kwarg("c")` finds `c` even when it was passed positionally or was left at its default.
pub static S: LazyArgs = LazyArgs::lenient();

/// Strict lazy arguments: keyword references only see the keyword arguments as passed.
pub static W: LazyArgs = LazyArgs::strict();

/// Produces a new [`ChainedArgument`] on every access.
///
/// The two configurations differ only in the lookup policy they give the references they create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LazyArgs {
    lenient: bool,
}

impl LazyArgs {
    /// A factory for strict references.
    pub const fn strict() -> Self {
        LazyArgs { lenient: false }
    }

    /// A factory for lenient references.
    pub const fn lenient() -> Self {
        LazyArgs { lenient: true }
    }

    /// Whether the created references are lenient.
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    fn create(&self, slot: Slot) -> ChainedArgument {
        ChainedArgument::new(LazyReference::new(slot, self.lenient))
    }

    /// References the argument addressed by `key`.
    ///
    /// `"*args"` and `"**kwargs"` address the variadic containers. Any other key must be integral
    /// and addresses a positional argument.
    pub fn index(&self, key: impl Into<Value>) -> Result<ChainedArgument> {
        let key = key.into();
        let slot = match &key {
            Value::Str(token) if token == VAR_POSITIONAL_TOKEN => Slot::VarPositional,
            Value::Str(token) if token == VAR_KEYWORD_TOKEN => Slot::VarKeyword,
            Value::Int(index) => Slot::Positional(*index),
            Value::Bool(flag) => Slot::Positional(i64::from(*flag)),
            Value::Float(index)
                if index.fract() == 0.0
                    && *index >= i64::MIN as f64
                    && *index < i64::MAX as f64 =>
            {
                Slot::Positional(*index as i64)
            }
            other => {
                return Err(Error::InvalidReferenceKey(format!(
                    "{} is not an integer or {:?} or {:?}",
                    other, VAR_POSITIONAL_TOKEN, VAR_KEYWORD_TOKEN
                )))
            }
        };

        Ok(self.create(slot))
    }

    /// References the positional argument at `index`, counted from the end if negative.
    pub fn arg(&self, index: i64) -> ChainedArgument {
        self.create(Slot::Positional(index))
    }

    /// References the keyword argument `name`.
    pub fn kwarg(&self, name: impl Into<String>) -> ChainedArgument {
        self.create(Slot::Keyword(name.into()))
    }

    /// Same as [`LazyArgs::kwarg`].
    pub fn attr(&self, name: impl Into<String>) -> ChainedArgument {
        self.kwarg(name)
    }

    /// References the values absorbed by `*args`.
    pub fn varargs(&self) -> ChainedArgument {
        self.create(Slot::VarPositional)
    }

    /// References the values absorbed by `**kwargs`.
    pub fn varkwargs(&self) -> ChainedArgument {
        self.create(Slot::VarKeyword)
    }
}
