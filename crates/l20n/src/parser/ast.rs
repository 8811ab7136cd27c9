//! Public AST types for L20n resource files.
//!
//! These types are public to enable external tooling (linters, formatters,
//! coverage reports).

/// A top-level item in a resource file.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// An `import "path";` directive, resolved relative to the importing file.
    Import(String),
    /// An entity declaration.
    Entity(Entity),
}

/// A named translatable unit.
///
/// An entity has a value body, optional named attributes (addressed as
/// `entity.attribute`), and an optional index expression that selects a
/// branch when the value is a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    /// Branch selector evaluated when the value body is a hash.
    pub index: Option<Expr>,
    pub value: Body,
    /// Attributes in declaration order.
    pub attrs: Vec<(String, Body)>,
}

impl Entity {
    /// Look up an attribute body by name.
    pub fn attr(&self, name: &str) -> Option<&Body> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, body)| body)
    }
}

/// The body of an entity, attribute, or hash branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A quoted template with interpolations.
    Template(Template),
    /// A brace-delimited set of keyed branches.
    Hash(Hash),
}

/// A set of keyed branches, one optionally marked as the default with `*`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hash {
    pub branches: Vec<HashBranch>,
}

impl Hash {
    /// Look up a branch body by key.
    pub fn get(&self, key: &str) -> Option<&Body> {
        self.branches
            .iter()
            .find(|branch| branch.key == key)
            .map(|branch| &branch.body)
    }

    /// The body of the `*`-marked default branch, if any.
    pub fn default_body(&self) -> Option<&Body> {
        self.branches
            .iter()
            .find(|branch| branch.default)
            .map(|branch| &branch.body)
    }

    /// All branch keys, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.branches
            .iter()
            .map(|branch| branch.key.clone())
            .collect()
    }
}

/// A single keyed branch within a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct HashBranch {
    pub key: String,
    /// Whether this branch was marked with `*`.
    pub default: bool,
    pub body: Body,
}

/// A parsed template string containing segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text (no interpolation).
    Literal(String),
    /// An interpolated expression: `{ expr }`.
    Interpolation(Expr),
}

/// An expression within an interpolation or index.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal.
    Number(i64),
    /// A boolean literal.
    Bool(bool),
    /// A quoted string literal.
    String(String),
    /// A reference to another entity.
    Identifier(String),
    /// An external variable reference: `$name`.
    External(String),
    /// A global variable reference: `@name`.
    Global(String),
    /// A global macro call: `@name(arg, ...)`.
    Call { name: String, args: Vec<Expr> },
    /// Property access: `base.name`.
    Property { base: Box<Expr>, name: String },
}
