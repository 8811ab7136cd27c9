//! Error types for the L20n interpreter.

use thiserror::Error;

/// Errors that occur while importing a manifest or loading locale resources.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No manifest has been imported yet.
    #[error("no manifest has been imported")]
    NotInitialized,

    /// I/O error when reading a manifest or resource file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Parse error with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The manifest is structurally invalid.
    #[error("invalid manifest '{path}': {message}")]
    Manifest { path: String, message: String },

    /// The requested locale is not declared in the manifest.
    #[error("locale '{locale}' is not declared in the manifest")]
    UnknownLocale { locale: String },

    /// Resource files import each other in a cycle.
    #[error("import cycle detected: {}", chain.join(" -> "))]
    ImportCycle { chain: Vec<String> },
}

/// An error that occurred during entity evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// No manifest has been imported yet.
    #[error("no manifest has been imported")]
    NotInitialized,

    /// Entity not found in the current or default locale.
    #[error("entity not found: '{name}'{}", suggestion_note(suggestions))]
    EntityNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// An external variable was referenced but not supplied for this call.
    #[error("no external variable '${name}' was provided for this call")]
    MissingExternal { name: String },

    /// A global variable was referenced but never registered.
    #[error("unknown global '@{name}'{}", suggestion_note(suggestions))]
    UnknownGlobal {
        name: String,
        suggestions: Vec<String>,
    },

    /// A global that is not a macro was called with arguments.
    #[error("global '@{name}' cannot be called with arguments")]
    NotAMacro { name: String },

    /// Wrong number of arguments passed to a macro call.
    #[error("macro '@{name}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A macro argument had the wrong type.
    #[error("invalid argument to '@{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// A hash selector matched no branch.
    #[error("missing branch '{key}' in entity '{entity}', available: {}", available.join(", "))]
    MissingBranch {
        entity: String,
        key: String,
        available: Vec<String>,
        suggestions: Vec<String>,
    },

    /// A hash was rendered without an index, a matching path, or a default.
    #[error("hash value of entity '{entity}' has no default branch")]
    NoDefaultBranch { entity: String },

    /// Cyclic entity reference detected during evaluation.
    #[error("cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Maximum recursion depth exceeded.
    #[error("maximum recursion depth exceeded")]
    MaxDepthExceeded,

    /// The fully reduced value cannot be rendered as text.
    #[error("value of type {kind} cannot be rendered as text")]
    NotAString { kind: &'static str },
}

/// Render a "did you mean" note for an error message.
fn suggestion_note(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Compute "did you mean" candidates for a failed lookup.
///
/// Returns up to three candidates ranked by Jaro-Winkler similarity, keeping
/// only close matches so diagnostics stay quiet for genuinely unknown names.
pub fn compute_suggestions(input: &str, candidates: &[String]) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(input, candidate), candidate))
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
