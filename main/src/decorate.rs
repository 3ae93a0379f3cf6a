//! Running a hook before every call of a function.

use tracing::debug;

use crate::{error::Result, signature::Signature, snapshot::CallArguments, value::Function};

/// A hook that runs before each call of a decorated function.
pub trait Decorator: Send + Sync {
    /// Inspects the arguments of a call before the function runs.
    ///
    /// Returning an error aborts the call; the function is not run.
    fn before_call(&self, call_arguments: &CallArguments) -> Result<()>;
}

/// Wraps `function` so that `decorator` sees the arguments of each call first.
///
/// Every call is bound against `signature`. The wrapped function receives the original
/// arguments, unchanged.
pub fn decorate<D>(signature: Signature, function: Function, decorator: D) -> Function
where
    D: Decorator + 'static,
{
    let name = function.name().to_owned();

    Function::new(name, move |args, kwargs| {
        let call_arguments = signature.bind(&args, &kwargs)?;

        debug!(function = %function.name(), "running before-call hook");
        decorator.before_call(&call_arguments)?;

        function.call(args, kwargs)
    })
}
