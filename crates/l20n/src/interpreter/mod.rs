//! L20n interpreter: environment, evaluation, and plural rules.
//!
//! This module provides the evaluation engine that takes parsed entities
//! and produces localized strings. It resolves identifier references with
//! locale fallback, applies hash branch selection, and substitutes external
//! and global variables.

mod context;
mod environment;
mod error;
mod evaluator;
mod plural;

pub use context::EvalContext;
pub use environment::{Environment, LocaleContext, MacroFn};
pub use error::{EvalError, ImportError, compute_suggestions};
pub use plural::plural_category;

pub(crate) use evaluator::{eval_entity, value_to_string};
