//! Global variable registration types.
//!
//! Globals are process-wide bindings addressed with the `@name` syntax in
//! resource files. They come in three shapes: a static [`Value`], a
//! [`GlobalProvider`] resolved lazily at each evaluation, or a hash-capable
//! object whose fields are reached with property paths (`@screen.width`).

use std::rc::Rc;

use super::external::HashValue;
use super::value::Value;

/// A dynamic global resolved at evaluation time.
///
/// Implemented for closures returning a [`Value`], so host-environment facts
/// that change over time can be registered once:
///
/// ```
/// use l20n::{Global, Value};
///
/// let platform = Global::provider(|| Value::from("desktop"));
/// ```
pub trait GlobalProvider {
    /// Produce the current value of this global.
    fn resolve(&self) -> Value;
}

impl<F: Fn() -> Value> GlobalProvider for F {
    fn resolve(&self) -> Value {
        self()
    }
}

/// A registered global variable.
pub enum Global {
    /// A fixed value.
    Value(Value),
    /// A provider invoked each time the global is referenced.
    Provider(Box<dyn GlobalProvider>),
    /// A hash-capable object exposing named fields.
    Hash(Rc<dyn HashValue>),
}

impl Global {
    /// Register a lazily resolved global.
    pub fn provider(provider: impl GlobalProvider + 'static) -> Self {
        Global::Provider(Box::new(provider))
    }

    /// Register a hash-capable object.
    pub fn hash(value: impl HashValue + 'static) -> Self {
        Global::Hash(Rc::new(value))
    }
}

impl From<Value> for Global {
    fn from(value: Value) -> Self {
        Global::Value(value)
    }
}

impl From<&str> for Global {
    fn from(s: &str) -> Self {
        Global::Value(Value::from(s))
    }
}

impl From<String> for Global {
    fn from(s: String) -> Self {
        Global::Value(Value::from(s))
    }
}

impl From<i32> for Global {
    fn from(n: i32) -> Self {
        Global::Value(Value::from(n))
    }
}

impl From<i64> for Global {
    fn from(n: i64) -> Self {
        Global::Value(Value::from(n))
    }
}

impl From<bool> for Global {
    fn from(b: bool) -> Self {
        Global::Value(Value::from(b))
    }
}
