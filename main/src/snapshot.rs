//! The arguments of a single call.

use crate::value::{Kwargs, Value};

/// A snapshot of the arguments one call received, bound against the signature of the callee.
///
/// A new snapshot is created for every call and is never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    /// The positional arguments as passed.
    args: Vec<Value>,
    /// The keyword arguments as passed.
    kwargs: Kwargs,
    /// The values absorbed by the `*args` parameter.
    varargs: Vec<Value>,
    /// The values absorbed by the `**kwargs` parameter.
    varkwargs: Kwargs,
    /// The value bound to each declared, non-variadic parameter.
    argsdict: Kwargs,
}

impl CallArguments {
    /// Creates a snapshot from the results of binding a call.
    ///
    /// A parameter's value must appear either in `argsdict` or in `varargs`/`varkwargs`, never
    /// in both.
    pub fn new(
        args: Vec<Value>,
        kwargs: Kwargs,
        varargs: Vec<Value>,
        varkwargs: Kwargs,
        argsdict: Kwargs,
    ) -> Self {
        CallArguments {
            args,
            kwargs,
            varargs,
            varkwargs,
            argsdict,
        }
    }

    /// The positional arguments as passed.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The keyword arguments as passed.
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// The values absorbed by the `*args` parameter, empty if there is none.
    pub fn varargs(&self) -> &[Value] {
        &self.varargs
    }

    /// The values absorbed by the `**kwargs` parameter, empty if there is none.
    pub fn varkwargs(&self) -> &Kwargs {
        &self.varkwargs
    }

    /// The bound value of each declared, non-variadic parameter.
    pub fn argsdict(&self) -> &Kwargs {
        &self.argsdict
    }
}
