//! Lazy references with a recorded sequence of operations to replay on the referenced value.

use tracing::trace;

use crate::{
    error::Result,
    reference::LazyReference,
    snapshot::CallArguments,
    value::{Kwargs, Value},
};

/// An operation recorded on a chain, applied once the chain is resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Calls the current value.
    Call {
        /// The positional arguments of the call.
        args: Vec<Value>,
        /// The keyword arguments of the call.
        kwargs: Kwargs,
    },
    /// Indexes the current value.
    Index {
        /// The key to index with.
        key: Value,
    },
    /// Looks up an attribute of the current value.
    GetAttr {
        /// The name of the attribute.
        name: String,
    },
}

impl Operation {
    /// Applies the operation to `value`.
    fn apply(&self, value: Value) -> Result<Value> {
        match self {
            Operation::Call { args, kwargs } => value.call(args.clone(), kwargs.clone()),
            Operation::Index { key } => value.get_item(key),
            Operation::GetAttr { name } => value.get_attr(name),
        }
    }
}

/// A lazy reference followed by operations to apply to whatever it resolves to.
///
/// Building a chain records operations without running them; nothing touches real data until
/// [`ChainedArgument::resolve`] is called with the arguments of a call. Resolving does not change
/// the chain, so one chain serves every call of a decorated function.
///
/// ```rust
/// use lazyargs::{CallArguments, Kwargs, Namespace, Value, S};
///
/// let name = S.arg(0).attr("name").method("upper", vec![]);
///
/// let user = Namespace::new("User").with("name", "ada");
/// let call = CallArguments::new(vec![user.into()], Kwargs::new(), vec![], Kwargs::new(), Kwargs::new());
///
/// assert_eq!(name.resolve(&call).unwrap(), Value::from("ADA"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedArgument {
    /// The reference that yields the starting value.
    root: LazyReference,
    /// The operations to apply, in order.
    operations: Vec<Operation>,
}

impl ChainedArgument {
    /// Creates a chain without operations.
    pub fn new(root: LazyReference) -> Self {
        ChainedArgument {
            root,
            operations: Vec::new(),
        }
    }

    /// The reference at the start of the chain.
    pub fn root(&self) -> &LazyReference {
        &self.root
    }

    /// The recorded operations, in order of application.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Records a call with positional arguments.
    pub fn call(self, args: Vec<Value>) -> Self {
        self.call_kw(args, Kwargs::new())
    }

    /// Records a call with positional and keyword arguments.
    pub fn call_kw(mut self, args: Vec<Value>, kwargs: Kwargs) -> Self {
        self.operations.push(Operation::Call { args, kwargs });
        self
    }

    /// Records indexing with `key`.
    pub fn index(mut self, key: impl Into<Value>) -> Self {
        self.operations.push(Operation::Index { key: key.into() });
        self
    }

    /// Records an attribute lookup.
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.operations
            .push(Operation::GetAttr { name: name.into() });
        self
    }

    /// Records a method call, i.e. an attribute lookup followed by a call.
    pub fn method(self, name: impl Into<String>, args: Vec<Value>) -> Self {
        self.attr(name).call(args)
    }

    /// Resolves the root against `call_arguments` and replays the operations on the result.
    ///
    /// The first failing operation ends the replay and its error is returned as is.
    pub fn resolve(&self, call_arguments: &CallArguments) -> Result<Value> {
        let root = self.root.resolve(call_arguments)?;

        self.operations.iter().try_fold(root, |value, operation| {
            trace!(?operation, "replaying operation");
            operation.apply(value)
        })
    }
}
