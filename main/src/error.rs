//! The errors produced while binding, resolving and checking.

use thiserror::Error;

use crate::reference::Slot;

/// A `Result` with the error type of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between a call and the body of a decorated function.
///
/// Errors returned by check functions and by callables met while replaying a chain are passed
/// through untouched, so a caller sees exactly what the failing piece returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A strict reference pointed at an argument the call did not provide.
    #[error("missing {0}")]
    MissingArgument(Slot),

    /// A lazy reference was built from a key that is neither integral nor a reserved token.
    #[error("invalid lazy reference key: {0}")]
    InvalidReferenceKey(String),

    /// A reference kind or check source that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A check function rejected the call.
    #[error("precondition failed: {0}")]
    CheckFailed(String),

    /// A value has no attribute of the given name.
    #[error("'{type_name}' object has no attribute '{name}'")]
    AttributeError {
        /// The type of the value the attribute was looked up on.
        type_name: String,
        /// The attribute that was missing.
        name: String,
    },

    /// A sequence was indexed outside of its bounds.
    #[error("{type_name} index {index} out of range for length {len}")]
    IndexError {
        /// The type of the indexed sequence.
        type_name: String,
        /// The index, as given.
        index: i64,
        /// The length of the sequence.
        len: usize,
    },

    /// A mapping has no entry for the given key.
    #[error("key not found: {0}")]
    KeyError(String),

    /// An operation was applied to a value that does not support it.
    #[error("{0}")]
    TypeError(String),

    /// The arguments of a call do not fit the signature of the called function.
    #[error(transparent)]
    Binding(#[from] BindError),

    /// An error raised by user code.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Rejects a call from inside a check function.
    pub fn check_failed(message: impl Into<String>) -> Self {
        Error::CheckFailed(message.into())
    }

    /// Wraps an arbitrary error raised by a native callable.
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Custom(error.into())
    }
}

/// The ways binding call arguments against a signature can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// More positional arguments than positional parameters and no `*args` to absorb them.
    #[error("{function}() takes {max} positional arguments but {given} were given")]
    TooManyPositional {
        /// The name of the function being bound.
        function: String,
        /// The number of positional parameters.
        max: usize,
        /// The number of positional arguments passed.
        given: usize,
    },

    /// A parameter was given both positionally and by keyword.
    #[error("{function}() got multiple values for argument '{name}'")]
    MultipleValues {
        /// The name of the function being bound.
        function: String,
        /// The parameter given twice.
        name: String,
    },

    /// A keyword that matches no parameter and no `**kwargs` to absorb it.
    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword {
        /// The name of the function being bound.
        function: String,
        /// The unknown keyword.
        name: String,
    },

    /// A signature declares the same parameter name twice.
    #[error("duplicate argument '{name}' in function definition of {function}()")]
    DuplicateParameter {
        /// The name of the function being declared.
        function: String,
        /// The name declared twice.
        name: String,
    },

    /// A parameter without default that received no value.
    #[error("{function}() missing required argument '{name}'")]
    MissingParameter {
        /// The name of the function being bound.
        function: String,
        /// The parameter without a value.
        name: String,
    },
}
