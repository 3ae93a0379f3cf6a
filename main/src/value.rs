//! The dynamic values that decorated functions receive and lazy expressions resolve to.

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::error::{Error, Result};

/// Keyword arguments of a call, also used as the contents of a `Dict`.
pub type Kwargs = BTreeMap<String, Value>;

/// The signature every native callable has.
type NativeFn = dyn Fn(Vec<Value>, Kwargs) -> Result<Value> + Send + Sync;

/// A value with user-defined attribute, item and call behavior.
pub trait Object: fmt::Debug + Send + Sync {
    /// The name used for this object in error messages.
    fn type_name(&self) -> &str;

    /// Looks up an attribute, returning `None` if there is no such attribute.
    fn get_attr(&self, name: &str) -> Option<Value>;

    /// Looks up an item by key.
    fn get_item(&self, _key: &Value) -> Result<Value> {
        Err(Error::TypeError(format!(
            "'{}' object is not subscriptable",
            self.type_name()
        )))
    }

    /// Calls the object.
    fn call(&self, _args: Vec<Value>, _kwargs: Kwargs) -> Result<Value> {
        Err(Error::TypeError(format!(
            "'{}' object is not callable",
            self.type_name()
        )))
    }
}

/// A named, shareable callable.
///
/// Two functions are equal only if they are clones of the same function.
#[derive(Clone)]
pub struct Function {
    /// The name used in diagnostics and binding errors.
    name: Arc<str>,
    /// The code that runs when the function is called.
    code: Arc<NativeFn>,
}

impl Function {
    /// Creates a function from a closure taking positional and keyword arguments.
    pub fn new<F>(name: impl Into<String>, code: F) -> Self
    where
        F: Fn(Vec<Value>, Kwargs) -> Result<Value> + Send + Sync + 'static,
    {
        let name: String = name.into();

        Function {
            name: name.into(),
            code: Arc::new(code),
        }
    }

    /// The name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the function.
    pub fn call(&self, args: Vec<Value>, kwargs: Kwargs) -> Result<Value> {
        (self.code)(args, kwargs)
    }

    /// Whether both functions share the same code.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::as_ptr(&self.code) as *const u8 == Arc::as_ptr(&other.code) as *const u8
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value.
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An immutable sequence, e.g. the values absorbed by `*args`.
    Tuple(Vec<Value>),
    /// A sequence.
    List(Vec<Value>),
    /// A mapping from strings to values, e.g. the values absorbed by `**kwargs`.
    Dict(Kwargs),
    /// A user-defined object.
    Object(Arc<dyn Object>),
    /// A callable.
    Function(Function),
}

impl Value {
    /// Creates an object value.
    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// The name of the type of this value, as used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Object(object) => object.type_name(),
            Value::Function(_) => "function",
        }
    }

    /// Whether this is the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the contained boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the contained integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the contained number as a float, if this is a number.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the contained string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the contained elements, if this is a tuple or a list.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the contained mapping, if this is a dict.
    pub fn as_dict(&self) -> Option<&Kwargs> {
        match self {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up the attribute `name`.
    pub fn get_attr(&self, name: &str) -> Result<Value> {
        let found = match self {
            Value::Object(object) => object.get_attr(name),
            Value::Function(function) if name == "__name__" => Some(function.name().into()),
            _ => bound_method(self, name),
        };

        found.ok_or_else(|| Error::AttributeError {
            type_name: self.type_name().to_owned(),
            name: name.to_owned(),
        })
    }

    /// Looks up the item at `key`.
    pub fn get_item(&self, key: &Value) -> Result<Value> {
        match (self, key) {
            (Value::Tuple(items) | Value::List(items), Value::Int(index)) => {
                normalize_index(*index, items.len())
                    .map(|i| items[i].clone())
                    .ok_or_else(|| self.index_error(*index, items.len()))
            }
            (Value::Str(string), Value::Int(index)) => {
                let chars: Vec<char> = string.chars().collect();

                normalize_index(*index, chars.len())
                    .map(|i| Value::Str(chars[i].to_string()))
                    .ok_or_else(|| self.index_error(*index, chars.len()))
            }
            (Value::Tuple(_) | Value::List(_) | Value::Str(_), key) => Err(Error::TypeError(
                format!(
                    "{} indices must be integers, not {}",
                    self.type_name(),
                    key.type_name()
                ),
            )),
            (Value::Dict(entries), Value::Str(name)) => entries
                .get(name)
                .cloned()
                .ok_or_else(|| Error::KeyError(name.clone())),
            (Value::Dict(_), key) => Err(Error::KeyError(key.to_string())),
            (Value::Object(object), key) => object.get_item(key),
            _ => Err(Error::TypeError(format!(
                "'{}' object is not subscriptable",
                self.type_name()
            ))),
        }
    }

    /// Calls this value.
    pub fn call(&self, args: Vec<Value>, kwargs: Kwargs) -> Result<Value> {
        match self {
            Value::Function(function) => function.call(args, kwargs),
            Value::Object(object) => object.call(args, kwargs),
            _ => Err(Error::TypeError(format!(
                "'{}' object is not callable",
                self.type_name()
            ))),
        }
    }

    fn index_error(&self, index: i64, len: usize) -> Error {
        Error::IndexError {
            type_name: self.type_name().to_owned(),
            index,
            len,
        }
    }
}

/// Turns a possibly negative index into an offset into a sequence of length `len`.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };

    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

/// Returns a builtin method of `receiver` bound to it.
fn bound_method(receiver: &Value, name: &str) -> Option<Value> {
    let known = matches!(
        (receiver, name),
        (Value::Str(_), "upper" | "lower" | "startswith")
            | (Value::Dict(_), "get" | "keys")
            | (Value::Tuple(_) | Value::List(_), "count")
    );
    if !known {
        return None;
    }

    let this = receiver.clone();
    let method = name.to_owned();
    let qualified = format!("{}.{}", receiver.type_name(), name);

    Some(Value::Function(Function::new(
        qualified,
        move |args, kwargs| call_builtin_method(&this, &method, args, kwargs),
    )))
}

fn call_builtin_method(this: &Value, method: &str, args: Vec<Value>, kwargs: Kwargs) -> Result<Value> {
    if !kwargs.is_empty() {
        return Err(Error::TypeError(format!(
            "{}.{}() takes no keyword arguments",
            this.type_name(),
            method
        )));
    }

    match (this, method, args.as_slice()) {
        (Value::Str(string), "upper", []) => Ok(Value::Str(string.to_uppercase())),
        (Value::Str(string), "lower", []) => Ok(Value::Str(string.to_lowercase())),
        (Value::Str(string), "startswith", [Value::Str(prefix)]) => {
            Ok(Value::Bool(string.starts_with(prefix.as_str())))
        }
        (Value::Dict(entries), "get", [Value::Str(key)]) => {
            Ok(entries.get(key).cloned().unwrap_or(Value::None))
        }
        (Value::Dict(entries), "get", [Value::Str(key), default]) => {
            Ok(entries.get(key).cloned().unwrap_or_else(|| default.clone()))
        }
        (Value::Dict(entries), "keys", []) => Ok(Value::List(
            entries.keys().map(|key| Value::Str(key.clone())).collect(),
        )),
        (Value::Tuple(items) | Value::List(items), "count", [needle]) => Ok(Value::Int(
            items.iter().filter(|item| *item == needle).count() as i64,
        )),
        _ => Err(Error::TypeError(format!(
            "invalid arguments for {}.{}()",
            this.type_name(),
            method
        ))),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                Arc::as_ptr(a) as *const u8 == Arc::as_ptr(b) as *const u8
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn join(f: &mut fmt::Formatter, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
            Value::Str(value) => write!(f, "{:?}", value),
            Value::Tuple(items) => {
                write!(f, "(")?;
                join(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                join(f, items)?;
                write!(f, "]")
            }
            Value::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "<{} object>", object.type_name()),
            Value::Function(function) => write!(f, "<function {}>", function.name()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

macro_rules! impl_from {
    ($($ty:ty => |$value:ident| $convert:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from($value: $ty) -> Self {
                    $convert
                }
            }
        )*
    };
}

impl_from! {
    () => |_unit| Value::None,
    bool => |value| Value::Bool(value),
    i32 => |value| Value::Int(i64::from(value)),
    i64 => |value| Value::Int(value),
    u32 => |value| Value::Int(i64::from(value)),
    f64 => |value| Value::Float(value),
    &str => |value| Value::Str(value.to_owned()),
    String => |value| Value::Str(value),
    Vec<Value> => |items| Value::List(items),
    Kwargs => |entries| Value::Dict(entries),
    Function => |function| Value::Function(function),
    Arc<dyn Object> => |object| Value::Object(object),
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// A plain object whose attributes are stored in a map.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// The name reported by `type_name`.
    type_name: String,
    /// The attributes of the object.
    attributes: Kwargs,
}

impl Namespace {
    /// Creates an object without attributes.
    pub fn new(type_name: impl Into<String>) -> Self {
        Namespace {
            type_name: type_name.into(),
            attributes: Kwargs::new(),
        }
    }

    /// Adds the attribute `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Object for Namespace {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get_attr(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}

impl From<Namespace> for Value {
    fn from(namespace: Namespace) -> Self {
        Value::object(namespace)
    }
}
