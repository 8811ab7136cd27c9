//! L20n resource and template parser.
//!
//! This module provides parsing for `.l20n` resource files and standalone
//! template strings. The parser produces an AST usable for interpretation or
//! external tooling, and performs no I/O of its own.

pub mod ast;
pub mod error;
mod resource;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use resource::parse_resource;
pub use template::parse_template;
