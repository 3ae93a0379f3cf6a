//! Preconditions whose arguments are resolved from each call.

use tracing::{debug, warn};

use crate::{
    decorate::{decorate, Decorator},
    error::{Error, Result},
    resolver::{Argument, ArgumentResolver, LazyKwargs},
    signature::Signature,
    snapshot::CallArguments,
    value::{Function, Value},
};

/// Where a precondition gets its check function and arguments from.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckSource {
    /// A check function; its arguments are given to [`Precondition::new`].
    Direct(Function),
    /// A check function together with the arguments it is to be called with.
    Deferred {
        /// The check function.
        function: Function,
        /// The positional arguments of the check.
        args: Vec<Argument>,
        /// The keyword arguments of the check.
        kwargs: LazyKwargs,
    },
}

impl From<Function> for CheckSource {
    fn from(function: Function) -> Self {
        CheckSource::Direct(function)
    }
}

impl TryFrom<Value> for CheckSource {
    type Error = Error;

    /// Accepts a function or a packed `(function, args, kwargs)` tuple.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Function(function) => Ok(CheckSource::Direct(function)),
            Value::Tuple(parts) => match <[Value; 3]>::try_from(parts) {
                Ok([Value::Function(function), Value::Tuple(args) | Value::List(args), Value::Dict(kwargs)]) => {
                    Ok(CheckSource::Deferred {
                        function,
                        args: args.into_iter().map(Argument::Literal).collect(),
                        kwargs: kwargs
                            .into_iter()
                            .map(|(name, value)| (name, Argument::Literal(value)))
                            .collect(),
                    })
                }
                Ok(parts) => Err(Error::InvalidConfiguration(format!(
                    "{} is not a (function, args, kwargs) triple",
                    Value::Tuple(parts.to_vec())
                ))),
                Err(parts) => Err(Error::InvalidConfiguration(format!(
                    "expected a (function, args, kwargs) triple, got {} elements",
                    parts.len()
                ))),
            },
            other => Err(Error::InvalidConfiguration(format!(
                "'{}' object is not callable",
                other.type_name()
            ))),
        }
    }
}

/// A check function whose calls are recorded instead of run.
///
/// This allows writing the arguments of a check next to the check itself:
///
/// ```rust
/// use lazyargs::{precondition, Argument, Function, LazyFunction, LazyKwargs, Value, S};
///
/// let positive = LazyFunction::new(Function::new("positive", |_, _| Ok(Value::None)));
///
/// let check = positive.call(vec![Argument::from(S.arg(0))], LazyKwargs::new());
/// let precondition = precondition(check, vec![], LazyKwargs::new());
/// assert_eq!(precondition.check().name(), "positive");
/// ```
#[derive(Debug, Clone)]
pub struct LazyFunction {
    function: Function,
}

impl LazyFunction {
    /// Wraps a check function.
    pub fn new(function: Function) -> Self {
        LazyFunction { function }
    }

    /// Records a call of the check function without running it.
    pub fn call(&self, args: Vec<Argument>, kwargs: LazyKwargs) -> CheckSource {
        CheckSource::Deferred {
            function: self.function.clone(),
            args,
            kwargs,
        }
    }
}

/// A check that runs before each call of a decorated function.
///
/// The arguments of the check are resolved against the arguments of each call. A check accepts
/// the call by returning `Ok` with any value and rejects it by returning an error, which is then
/// returned from the call in place of the function's result.
#[derive(Debug, Clone)]
pub struct Precondition {
    /// The check function.
    check: Function,
    /// The positional arguments of the check.
    args: Vec<Argument>,
    /// The keyword arguments of the check.
    kwargs: LazyKwargs,
}

impl Precondition {
    /// Creates a precondition.
    ///
    /// A [`CheckSource::Deferred`] source brings its own arguments; any given here as well are
    /// ignored.
    pub fn new(check: impl Into<CheckSource>, args: Vec<Argument>, kwargs: LazyKwargs) -> Self {
        match check.into() {
            CheckSource::Direct(check) => Precondition { check, args, kwargs },
            CheckSource::Deferred {
                function,
                args: deferred_args,
                kwargs: deferred_kwargs,
            } => {
                if !args.is_empty() || !kwargs.is_empty() {
                    warn!(
                        check = %function.name(),
                        "ignoring extra arguments given with a deferred check"
                    );
                }

                Precondition {
                    check: function,
                    args: deferred_args,
                    kwargs: deferred_kwargs,
                }
            }
        }
    }

    /// The check function.
    pub fn check(&self) -> &Function {
        &self.check
    }

    /// The positional arguments of the check.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// The keyword arguments of the check.
    pub fn kwargs(&self) -> &LazyKwargs {
        &self.kwargs
    }

    /// Returns `function` guarded by this precondition.
    pub fn decorate(self, signature: Signature, function: Function) -> Function {
        decorate(signature, function, self)
    }
}

impl Decorator for Precondition {
    fn before_call(&self, call_arguments: &CallArguments) -> Result<()> {
        let (args, kwargs) = ArgumentResolver::new(call_arguments).resolve(&self.args, &self.kwargs)?;

        debug!(check = %self.check.name(), "checking precondition");
        self.check.call(args, kwargs)?;

        Ok(())
    }
}

/// Creates a [`Precondition`].
pub fn precondition(
    check: impl Into<CheckSource>,
    args: Vec<Argument>,
    kwargs: LazyKwargs,
) -> Precondition {
    Precondition::new(check, args, kwargs)
}
