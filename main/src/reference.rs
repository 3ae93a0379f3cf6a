//! References to a single slot of a future call's arguments.

use std::{fmt, str::FromStr};

use tracing::trace;

use crate::{
    error::{Error, Result},
    snapshot::CallArguments,
    value::{normalize_index, Value},
};

/// The token that refers to the values absorbed by `*args`.
pub const VAR_POSITIONAL_TOKEN: &str = "*args";

/// The token that refers to the values absorbed by `**kwargs`.
pub const VAR_KEYWORD_TOKEN: &str = "**kwargs";

/// The kind of slot a reference addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// A positional argument, addressed by index.
    Positional,
    /// A keyword argument, addressed by name.
    Keyword,
    /// The values absorbed by `*args`.
    VarPositional,
    /// The values absorbed by `**kwargs`.
    VarKeyword,
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "arg" => Ok(KeyType::Positional),
            "kwarg" => Ok(KeyType::Keyword),
            VAR_POSITIONAL_TOKEN => Ok(KeyType::VarPositional),
            VAR_KEYWORD_TOKEN => Ok(KeyType::VarKeyword),
            other => Err(Error::InvalidConfiguration(format!(
                "invalid key type `{}`",
                other
            ))),
        }
    }
}

/// The slot of the call arguments a reference addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// The positional argument at the index, counted from the end if negative.
    Positional(i64),
    /// The keyword argument of the name.
    Keyword(String),
    /// The values absorbed by `*args`.
    VarPositional,
    /// The values absorbed by `**kwargs`.
    VarKeyword,
}

impl Slot {
    /// The kind of this slot.
    pub fn key_type(&self) -> KeyType {
        match self {
            Slot::Positional(_) => KeyType::Positional,
            Slot::Keyword(_) => KeyType::Keyword,
            Slot::VarPositional => KeyType::VarPositional,
            Slot::VarKeyword => KeyType::VarKeyword,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Slot::Positional(index) => write!(f, "positional argument {}", index),
            Slot::Keyword(name) => write!(f, "keyword argument '{}'", name),
            Slot::VarPositional => write!(f, "{}", VAR_POSITIONAL_TOKEN),
            Slot::VarKeyword => write!(f, "{}", VAR_KEYWORD_TOKEN),
        }
    }
}

/// A placeholder for one slot of the arguments of calls that have not happened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyReference {
    /// The addressed slot.
    slot: Slot,
    /// Whether keyword lookups fall back to the bound parameters.
    lenient: bool,
}

impl LazyReference {
    /// Creates a reference to `slot`.
    pub fn new(slot: Slot, lenient: bool) -> Self {
        LazyReference { slot, lenient }
    }

    /// Creates a reference from a key and the kind of slot it addresses.
    ///
    /// Positional references need an integer key and keyword references a string key. The
    /// variadic kinds ignore the key.
    pub fn from_key(key: &Value, key_type: KeyType, lenient: bool) -> Result<Self> {
        let slot = match (key_type, key) {
            (KeyType::Positional, Value::Int(index)) => Slot::Positional(*index),
            (KeyType::Keyword, Value::Str(name)) => Slot::Keyword(name.clone()),
            (KeyType::VarPositional, _) => Slot::VarPositional,
            (KeyType::VarKeyword, _) => Slot::VarKeyword,
            (key_type, key) => {
                return Err(Error::InvalidReferenceKey(format!(
                    "{} is not a valid key for a {:?} reference",
                    key, key_type
                )))
            }
        };

        Ok(LazyReference::new(slot, lenient))
    }

    /// The addressed slot.
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// The kind of the addressed slot.
    pub fn key_type(&self) -> KeyType {
        self.slot.key_type()
    }

    /// Whether keyword lookups fall back to the bound parameters.
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Looks up the referenced value in the arguments of a call.
    ///
    /// A lenient keyword reference looks at the keyword arguments first, then at the bound
    /// parameters, and resolves to `Value::None` if neither has the name. Positional references
    /// never fall back to a lookup by name, lenient or not.
    pub fn resolve(&self, call_arguments: &CallArguments) -> Result<Value> {
        let value = match &self.slot {
            Slot::Positional(index) => {
                let args = call_arguments.args();

                normalize_index(*index, args.len())
                    .map(|i| args[i].clone())
                    .ok_or_else(|| Error::MissingArgument(self.slot.clone()))?
            }
            Slot::Keyword(name) if self.lenient => call_arguments
                .kwargs()
                .get(name)
                .or_else(|| call_arguments.argsdict().get(name))
                .cloned()
                .unwrap_or(Value::None),
            Slot::Keyword(name) => call_arguments
                .kwargs()
                .get(name)
                .cloned()
                .ok_or_else(|| Error::MissingArgument(self.slot.clone()))?,
            Slot::VarPositional => Value::Tuple(call_arguments.varargs().to_vec()),
            Slot::VarKeyword => Value::Dict(call_arguments.varkwargs().clone()),
        };

        trace!(slot = %self.slot, lenient = self.lenient, "resolved lazy reference");

        Ok(value)
    }
}
