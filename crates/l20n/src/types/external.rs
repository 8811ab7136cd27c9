//! Hash-capable host values.
//!
//! A host object becomes visible to the evaluator by implementing
//! [`HashValue`]: when a property path reaches the object, the evaluator asks
//! it to collect its named fields into an [`InfoCollector`]. Fields can be
//! eager values or lazy closures, so a host can expose facts that change
//! between calls (screen size, user state) without re-registering anything.

use super::value::Value;

/// A host object that exposes named fields to the evaluator on demand.
///
/// # Example
///
/// ```
/// use l20n::{HashValue, InfoCollector};
///
/// struct User {
///     name: String,
/// }
///
/// impl HashValue for User {
///     fn collect(&self, info: &mut InfoCollector) {
///         info.add("name", self.name.as_str());
///         info.add_lazy("name_len", {
///             let name = self.name.clone();
///             move || name.len()
///         });
///     }
/// }
///
/// let user = User { name: "Ana".into() };
/// let mut info = InfoCollector::new();
/// user.collect(&mut info);
/// assert_eq!(info.get("name").unwrap().as_string(), Some("Ana"));
/// assert_eq!(info.get("name_len").unwrap().as_number(), Some(3));
/// ```
pub trait HashValue {
    /// Collect this object's named fields.
    ///
    /// Called once per property access during evaluation. The first field
    /// added is the object's primary field, used when a requested field is
    /// absent.
    fn collect(&self, info: &mut InfoCollector);
}

enum Field {
    Eager(Value),
    Lazy(Box<dyn Fn() -> Value>),
}

/// Collects the named fields of a [`HashValue`].
///
/// Fields keep their insertion order; the first one is the primary field.
#[derive(Default)]
pub struct InfoCollector {
    fields: Vec<(String, Field)>,
}

impl InfoCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an eager field.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), Field::Eager(value.into())));
    }

    /// Add a lazy field, resolved each time it is read.
    pub fn add_lazy<R: Into<Value>>(
        &mut self,
        name: impl Into<String>,
        resolve: impl Fn() -> R + 'static,
    ) {
        self.fields
            .push((name.into(), Field::Lazy(Box::new(move || resolve().into()))));
    }

    /// Look up a field by name, invoking it if it is lazy.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, field)| resolve(field))
    }

    /// The primary field: the first one collected.
    pub fn primary(&self) -> Option<Value> {
        self.fields.first().map(|(_, field)| resolve(field))
    }

    /// Names of all collected fields, in insertion order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Number of collected fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were collected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn resolve(field: &Field) -> Value {
    match field {
        Field::Eager(value) => value.clone(),
        Field::Lazy(f) => f(),
    }
}
