//! Locale environment: parsed resources, fallback chain, and globals.
//!
//! The environment owns the active locale's entities plus the default
//! locale's entities as a fallback layer. Locale resources are parsed at
//! most once per process; parsed contexts are cached and shared, so
//! switching back to a previously seen locale does not re-read anything.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::interpreter::error::ImportError;
use crate::interpreter::plural::plural_category;
use crate::interpreter::EvalError;
use crate::io::ResourceLoader;
use crate::manifest::Manifest;
use crate::parser::{parse_resource, Body, Entity, Hash, Item, ParseError};
use crate::types::{Global, Value};

/// A built-in macro callable with `@name(args)` syntax.
pub type MacroFn = fn(&str, &[Value]) -> Result<Value, EvalError>;

/// The parsed entities of a single locale.
#[derive(Debug)]
pub struct LocaleContext {
    code: String,
    entities: BTreeMap<String, Entity>,
}

impl LocaleContext {
    /// The locale code these entities belong to.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Look up an entity by identifier.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Entity identifiers, sorted.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Number of entities in this locale.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether this locale declares no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Evaluation environment for one manifest.
///
/// Holds the current and default locale contexts, the parse cache, and
/// registered globals. Only `set_locale` and `add_global` mutate it;
/// lookups and evaluation are read-only.
pub struct Environment {
    manifest: Manifest,
    cache: BTreeMap<String, Rc<LocaleContext>>,
    current: Rc<LocaleContext>,
    fallback: Rc<LocaleContext>,
    globals: BTreeMap<String, Global>,
    macros: BTreeMap<&'static str, MacroFn>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("manifest", &self.manifest)
            .field("cache", &self.cache)
            .field("current", &self.current)
            .field("fallback", &self.fallback)
            .field("globals", &self.globals.keys())
            .field("macros", &self.macros.keys())
            .finish()
    }
}

impl Environment {
    /// Create an environment from a validated manifest.
    ///
    /// Eagerly parses the default locale, which doubles as the fallback
    /// layer for every other locale. The default context is never replaced
    /// afterwards.
    pub fn new(manifest: Manifest, loader: &dyn ResourceLoader) -> Result<Self, ImportError> {
        let mut cache = BTreeMap::new();
        let fallback = load_context(&manifest, &mut cache, loader, manifest.default_locale())?;
        tracing::debug!(
            locale = %fallback.code(),
            entities = fallback.len(),
            "default locale loaded"
        );
        Ok(Self {
            manifest,
            cache,
            current: Rc::clone(&fallback),
            fallback,
            globals: BTreeMap::new(),
            macros: builtin_macros(),
        })
    }

    /// The manifest this environment was built from.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The active locale code.
    pub fn current_locale(&self) -> &str {
        self.current.code()
    }

    /// The active locale context.
    pub fn current(&self) -> &LocaleContext {
        &self.current
    }

    /// The default locale context used as the fallback layer.
    pub fn fallback(&self) -> &LocaleContext {
        &self.fallback
    }

    /// Switch the active locale.
    ///
    /// The new locale is parsed (or served from cache) before the swap, so a
    /// failure leaves the previously active locale untouched.
    pub fn set_locale(
        &mut self,
        code: &str,
        loader: &dyn ResourceLoader,
    ) -> Result<(), ImportError> {
        if !self.manifest.supports(code) {
            return Err(ImportError::UnknownLocale {
                locale: code.to_string(),
            });
        }
        let context = load_context(&self.manifest, &mut self.cache, loader, code)?;
        tracing::debug!(locale = %code, entities = context.len(), "locale activated");
        self.current = context;
        Ok(())
    }

    /// Register a global variable. Last write wins.
    pub fn add_global(&mut self, name: impl Into<String>, global: Global) {
        let name = name.into();
        if self.globals.insert(name.clone(), global).is_some() {
            tracing::warn!(global = %name, "global was overwritten");
        }
    }

    /// Look up a registered global.
    pub fn global(&self, name: &str) -> Option<&Global> {
        self.globals.get(name)
    }

    /// Names of registered globals, sorted.
    pub fn global_names(&self) -> Vec<String> {
        self.globals.keys().cloned().collect()
    }

    /// Look up a built-in macro.
    pub fn macro_fn(&self, name: &str) -> Option<MacroFn> {
        self.macros.get(name).copied()
    }

    /// Look up an entity in the current locale, falling back to the default.
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.current
            .entity(name)
            .or_else(|| self.fallback.entity(name))
    }

    /// Entity identifiers visible through `lookup`, sorted and deduplicated.
    pub fn entity_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .current
            .entity_names()
            .chain(self.fallback.entity_names())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}

/// The built-in macro table.
fn builtin_macros() -> BTreeMap<&'static str, MacroFn> {
    let mut macros: BTreeMap<&'static str, MacroFn> = BTreeMap::new();
    macros.insert("plural", plural_macro);
    macros
}

/// `@plural(n)`: the CLDR plural category of `n` for the active locale.
fn plural_macro(lang: &str, args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => {
            let n = value.as_number().ok_or_else(|| EvalError::InvalidArgument {
                name: "plural".to_string(),
                message: format!("expected a number, got {}", value.kind()),
            })?;
            Ok(Value::String(plural_category(lang, n).to_string()))
        }
        _ => Err(EvalError::ArgumentCount {
            name: "plural".to_string(),
            expected: 1,
            got: args.len(),
        }),
    }
}

/// Parse or retrieve the cached context for a locale.
fn load_context(
    manifest: &Manifest,
    cache: &mut BTreeMap<String, Rc<LocaleContext>>,
    loader: &dyn ResourceLoader,
    code: &str,
) -> Result<Rc<LocaleContext>, ImportError> {
    if let Some(context) = cache.get(code) {
        return Ok(Rc::clone(context));
    }

    let mut entities = BTreeMap::new();
    for path in manifest.resource_paths(code) {
        let mut import_stack = Vec::new();
        merge_file(loader, &path, &mut entities, &mut import_stack)?;
    }

    let context = Rc::new(LocaleContext {
        code: code.to_string(),
        entities,
    });
    cache.insert(code.to_string(), Rc::clone(&context));
    Ok(context)
}

/// Read, parse, and merge one resource file into the entity map.
///
/// Imports are processed first so the importing file's own declarations win
/// identifier collisions, regardless of where the directive appears.
fn merge_file(
    loader: &dyn ResourceLoader,
    path: &str,
    entities: &mut BTreeMap<String, Entity>,
    import_stack: &mut Vec<String>,
) -> Result<(), ImportError> {
    if import_stack.iter().any(|p| p == path) {
        let mut chain = import_stack.clone();
        chain.push(path.to_string());
        return Err(ImportError::ImportCycle { chain });
    }
    import_stack.push(path.to_string());

    let content = loader.read_to_string(path).map_err(|e| ImportError::Io {
        path: path.to_string(),
        source: e,
    })?;
    let items = parse_resource(&content).map_err(|e| import_parse_error(path, e))?;

    for item in &items {
        if let Item::Import(relative) = item {
            let target = resolve_relative(path, relative);
            merge_file(loader, &target, entities, import_stack)?;
        }
    }

    let mut declared = BTreeSet::new();
    for item in items {
        if let Item::Entity(entity) = item {
            if !declared.insert(entity.name.clone()) {
                return Err(semantic_error(
                    path,
                    format!("duplicate entity '{}'", entity.name),
                ));
            }
            validate_entity(path, &entity)?;
            entities.insert(entity.name.clone(), entity);
        }
    }

    import_stack.pop();
    Ok(())
}

/// Resolve an import path relative to the importing file.
fn resolve_relative(base: &str, relative: &str) -> String {
    match base.rfind('/') {
        Some(pos) => format!("{}/{}", &base[..pos], relative),
        None => relative.to_string(),
    }
}

/// Check hash and attribute well-formedness for one entity.
fn validate_entity(path: &str, entity: &Entity) -> Result<(), ImportError> {
    let mut attr_names = BTreeSet::new();
    for (name, body) in &entity.attrs {
        if !attr_names.insert(name.as_str()) {
            return Err(semantic_error(
                path,
                format!("duplicate attribute '{}' on entity '{}'", name, entity.name),
            ));
        }
        validate_body(path, &entity.name, body)?;
    }
    validate_body(path, &entity.name, &entity.value)
}

fn validate_body(path: &str, entity: &str, body: &Body) -> Result<(), ImportError> {
    let Body::Hash(hash) = body else {
        return Ok(());
    };
    validate_hash(path, entity, hash)
}

fn validate_hash(path: &str, entity: &str, hash: &Hash) -> Result<(), ImportError> {
    let mut keys = BTreeSet::new();
    let mut defaults = 0usize;
    for branch in &hash.branches {
        if !keys.insert(branch.key.as_str()) {
            return Err(semantic_error(
                path,
                format!("duplicate branch '{}' in entity '{}'", branch.key, entity),
            ));
        }
        if branch.default {
            defaults += 1;
            if defaults > 1 {
                return Err(semantic_error(
                    path,
                    format!("entity '{}' marks more than one default branch", entity),
                ));
            }
        }
        validate_body(path, entity, &branch.body)?;
    }
    Ok(())
}

/// Wrap a semantic (non-positional) loading error.
fn semantic_error(path: &str, message: String) -> ImportError {
    ImportError::Parse {
        path: path.to_string(),
        line: 0,
        column: 0,
        message,
    }
}

/// Attach the file path to a parser error.
fn import_parse_error(path: &str, error: ParseError) -> ImportError {
    match error {
        ParseError::Syntax {
            line,
            column,
            message,
        } => ImportError::Parse {
            path: path.to_string(),
            line,
            column,
            message,
        },
        ParseError::UnexpectedEof { line, column } => ImportError::Parse {
            path: path.to_string(),
            line,
            column,
            message: "unexpected end of file".to_string(),
        },
    }
}
