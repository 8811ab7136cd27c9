use std::fmt;
use std::rc::Rc;

use super::external::HashValue;

/// A runtime value passed into or produced by entity evaluation.
///
/// External variables (`$name` bindings supplied per `translate` call) and
/// global variables both reduce to `Value`s, as do fully evaluated
/// expressions. Numbers, booleans and strings render directly; a
/// [`Value::Hash`] only renders through property access on one of its fields.
///
/// # Example
///
/// ```
/// use l20n::Value;
///
/// // Numbers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Ana".into();
///
/// assert_eq!(count.as_number(), Some(42));
/// assert_eq!(name.as_string(), Some("Ana"));
/// ```
#[derive(Clone)]
pub enum Value {
    /// An integer (used for plural selection).
    Number(i64),

    /// A boolean.
    Bool(bool),

    /// A string value.
    String(String),

    /// A hash-capable host object exposing named fields on demand.
    Hash(Rc<dyn HashValue>),
}

impl Value {
    /// Wrap a host object implementing [`HashValue`].
    pub fn hash(value: impl HashValue + 'static) -> Self {
        Value::Hash(Rc::new(value))
    }

    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a hash object, if it is one.
    pub fn as_hash(&self) -> Option<&Rc<dyn HashValue>> {
        match self {
            Value::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// A short name for the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Hash(_) => "hash",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Hash(_) => write!(f, "Hash(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Hash(_) => write!(f, "<hash>"),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Rc<dyn HashValue>> for Value {
    fn from(h: Rc<dyn HashValue>) -> Self {
        Value::Hash(h)
    }
}
