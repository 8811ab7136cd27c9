//! Translator façade.
//!
//! `Translator` wires the manifest loader, environment, and evaluator into
//! the API hosts call: import a manifest once, switch locales, translate
//! identifiers. Translation never fails hard: any lookup or evaluation
//! problem is reported through the warning sink and the requested
//! identifier is returned unchanged, so a missing or broken translation
//! never blanks out a UI.

use std::collections::{BTreeMap, HashMap};
use std::mem;

use bon::Builder;

use crate::interpreter::{
    Environment, EvalContext, EvalError, ImportError, compute_suggestions, eval_entity,
    value_to_string,
};
use crate::io::{FileLoader, ResourceLoader};
use crate::manifest::Manifest;
use crate::types::{Global, Value};

/// Sink for diagnostic messages about degraded translations.
type WarningHandler = Box<dyn Fn(&str)>;

/// Callback fired after every successful locale switch.
type LocaleListener = Box<dyn Fn(&str)>;

/// The user-facing localization façade.
///
/// # Example
///
/// ```no_run
/// use l20n::{Translator, vars};
///
/// let mut translator = Translator::new();
/// translator.import_manifest("manifest.json").unwrap();
/// translator.set_locale("fr").unwrap();
///
/// let text = translator.translate_with("greeting", &vars! { "name" => "Ana" });
/// ```
#[derive(Builder)]
pub struct Translator {
    /// Resolves manifest and resource paths to streams.
    #[builder(default = Box::new(FileLoader::default()))]
    loader: Box<dyn ResourceLoader>,

    /// Receives diagnostics in addition to the `tracing` output.
    warning_handler: Option<WarningHandler>,

    #[builder(skip)]
    env: Option<Environment>,

    /// Globals registered before the manifest import, applied at import time.
    #[builder(skip)]
    pending_globals: BTreeMap<String, Global>,

    #[builder(skip)]
    listeners: Vec<LocaleListener>,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::builder().build()
    }
}

impl Translator {
    /// Create a translator with default settings (filesystem loader).
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Import a manifest and load the default locale.
    ///
    /// A second import on an already-initialized translator is a no-op with
    /// a warning; the first manifest stays active.
    pub fn import_manifest(&mut self, path: &str) -> Result<(), ImportError> {
        self.import_manifest_with_locale(path, None)
    }

    /// Import a manifest, then try to activate a startup locale.
    ///
    /// An unsupported startup locale (a user preference that the manifest
    /// does not cover) is downgraded to a warning and the manifest default
    /// stays active. Broken resource files remain hard errors.
    pub fn import_manifest_with_locale(
        &mut self,
        path: &str,
        locale: Option<&str>,
    ) -> Result<(), ImportError> {
        if self.env.is_some() {
            self.warn(&format!(
                "can't import manifest '{path}': a manifest is already imported"
            ));
            return Ok(());
        }

        let reader = self.loader.open(path).map_err(|e| ImportError::Io {
            path: path.to_string(),
            source: e,
        })?;
        let manifest = Manifest::from_reader(reader, path)?;
        let mut env = Environment::new(manifest, self.loader.as_ref())?;

        for (name, global) in mem::take(&mut self.pending_globals) {
            env.add_global(name, global);
        }

        if let Some(code) = locale {
            match env.set_locale(code, self.loader.as_ref()) {
                Ok(()) => {}
                Err(e @ ImportError::UnknownLocale { .. }) => {
                    self.warn(&format!(
                        "startup locale '{code}' is not available ({e}); \
                         staying on default '{}'",
                        env.current_locale()
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        let active = env.current_locale().to_string();
        self.env = Some(env);
        self.notify_locale_change(&active);
        Ok(())
    }

    /// Whether a manifest has been imported.
    pub fn is_initialized(&self) -> bool {
        self.env.is_some()
    }

    // =========================================================================
    // Locale Management
    // =========================================================================

    /// Switch the active locale.
    ///
    /// On success every registered locale-change listener is notified. On
    /// failure the previously active locale remains in effect.
    pub fn set_locale(&mut self, code: &str) -> Result<(), ImportError> {
        let Some(env) = self.env.as_mut() else {
            return Err(ImportError::NotInitialized);
        };
        env.set_locale(code, self.loader.as_ref())?;
        let active = env.current_locale().to_string();
        self.notify_locale_change(&active);
        Ok(())
    }

    /// The active locale code, if initialized.
    pub fn current_locale(&self) -> Option<&str> {
        self.env.as_ref().map(Environment::current_locale)
    }

    /// The locales declared by the imported manifest.
    pub fn locales(&self) -> &[String] {
        self.env
            .as_ref()
            .map(|env| env.manifest().locales())
            .unwrap_or(&[])
    }

    /// Register a callback fired after every successful locale switch.
    pub fn on_locale_change(&mut self, listener: impl Fn(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Globals
    // =========================================================================

    /// Register a global variable, available as `@name` in resources.
    ///
    /// Globals registered before the manifest import are held and applied at
    /// import time. Re-registering a name overwrites it with a warning.
    pub fn add_global(&mut self, name: impl Into<String>, global: impl Into<Global>) {
        let name = name.into();
        match self.env.as_mut() {
            Some(env) => env.add_global(name, global.into()),
            None => {
                if self.pending_globals.insert(name.clone(), global.into()).is_some() {
                    tracing::warn!(global = %name, "global was overwritten");
                }
            }
        }
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate an identifier with no external variables.
    pub fn translate(&self, id: &str) -> String {
        self.translate_with(id, &HashMap::new())
    }

    /// Translate an identifier with external variables.
    ///
    /// The identifier may carry a property path (`entity.attribute`). Any
    /// failure is reported through the warning sink and the identifier is
    /// returned unchanged.
    pub fn translate_with(&self, id: &str, vars: &HashMap<String, Value>) -> String {
        match self.try_translate(id, vars) {
            Ok(text) => text,
            Err(e) => {
                self.warn(&format!("translation of '{id}' failed: {e}"));
                id.to_string()
            }
        }
    }

    /// Translate an identifier, surfacing failures to the caller.
    pub fn try_translate(
        &self,
        id: &str,
        vars: &HashMap<String, Value>,
    ) -> Result<String, EvalError> {
        let Some(env) = self.env.as_ref() else {
            return Err(EvalError::NotInitialized);
        };

        let mut parts = id.split('.');
        let name = parts.next().unwrap_or(id);
        let path: Vec<&str> = parts.collect();

        let Some(entity) = env.lookup(name) else {
            return Err(EvalError::EntityNotFound {
                name: name.to_string(),
                suggestions: compute_suggestions(name, &env.entity_names()),
            });
        };

        let mut ctx = EvalContext::new(vars);
        ctx.push_call(name)?;
        let value = eval_entity(entity, &path, &mut ctx, env)?;
        ctx.pop_call();
        value_to_string(&value)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Redirect warnings to a host-supplied handler.
    pub fn set_warning_handler(&mut self, handler: impl Fn(&str) + 'static) {
        self.warning_handler = Some(Box::new(handler));
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
        if let Some(handler) = &self.warning_handler {
            handler(message);
        }
    }

    fn notify_locale_change(&self, code: &str) {
        for listener in &self.listeners {
            listener(code);
        }
    }
}
