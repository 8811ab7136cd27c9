//! Manifest loading and validation.
//!
//! A manifest is a JSON document describing the available locales, the
//! default locale, and where each locale's resource files live:
//!
//! ```json
//! {
//!     "default_locale": "en",
//!     "locales": ["en", "fr"],
//!     "resources": ["locales/{locale}.l20n"]
//! }
//! ```
//!
//! Resource paths are templates; the `{locale}` placeholder is replaced
//! with the locale code at load time. Paths are logical and resolved by the
//! host's [`ResourceLoader`](crate::io::ResourceLoader), conventionally
//! relative to the manifest's own location.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::interpreter::ImportError;

/// The placeholder replaced with a locale code in resource path templates.
const LOCALE_PLACEHOLDER: &str = "{locale}";

/// A parsed and validated localization manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    default_locale: String,
    locales: Vec<String>,
    resources: Vec<String>,
}

impl Manifest {
    /// Deserialize and validate a manifest from a stream.
    ///
    /// `path` is used for error messages only.
    pub fn from_reader(reader: impl Read, path: &str) -> Result<Self, ImportError> {
        let manifest: Manifest =
            serde_json::from_reader(reader).map_err(|e| ImportError::Manifest {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Deserialize and validate a manifest from a string.
    pub fn parse(content: &str, path: &str) -> Result<Self, ImportError> {
        Self::from_reader(content.as_bytes(), path)
    }

    fn validate(&self, path: &str) -> Result<(), ImportError> {
        let invalid = |message: String| ImportError::Manifest {
            path: path.to_string(),
            message,
        };
        if self.locales.is_empty() {
            return Err(invalid("no locales declared".to_string()));
        }
        if self.default_locale.is_empty() {
            return Err(invalid("no default locale declared".to_string()));
        }
        if !self.supports(&self.default_locale) {
            return Err(invalid(format!(
                "default locale '{}' is not in the locale list",
                self.default_locale
            )));
        }
        if self.resources.is_empty() {
            return Err(invalid("no resource paths declared".to_string()));
        }
        Ok(())
    }

    /// The declared default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The declared locales, in manifest order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Whether a locale code is declared.
    pub fn supports(&self, code: &str) -> bool {
        self.locales.iter().any(|locale| locale == code)
    }

    /// Resource paths for a locale, with the placeholder expanded.
    pub fn resource_paths(&self, code: &str) -> Vec<String> {
        self.resources
            .iter()
            .map(|template| template.replace(LOCALE_PLACEHOLDER, code))
            .collect()
    }
}
