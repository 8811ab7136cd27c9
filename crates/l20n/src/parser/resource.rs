//! L20n resource file parser.
//!
//! Parses `.l20n` files containing import directives and entity
//! declarations. Parsing is pure: imports are returned as [`Item::Import`]
//! and resolved by the loading layer, which owns all I/O.

use super::ast::*;
use super::error::ParseError;
use super::template::{expression, identifier, template_string, ws};
use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse an entire `.l20n` file into items.
pub fn parse_resource(input: &str) -> Result<Vec<Item>, ParseError> {
    let mut remaining = input;
    match resource(&mut remaining) {
        Ok(items) => {
            // Skip any trailing whitespace/comments
            let _ = skip_ws_and_comments(&mut remaining);
            if remaining.is_empty() {
                Ok(items)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            if remaining.is_empty() {
                Err(ParseError::UnexpectedEof { line, column })
            } else {
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!("parse error: {}", e),
                })
            }
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse an entire file into items.
fn resource(input: &mut &str) -> ModalResult<Vec<Item>> {
    skip_ws_and_comments(input)?;
    let items: Vec<Item> =
        repeat(0.., terminated(item, skip_ws_and_comments)).parse_next(input)?;
    Ok(items)
}

/// Skip whitespace and line comments.
fn skip_ws_and_comments(input: &mut &str) -> ModalResult<()> {
    let _: Vec<()> = repeat(0.., alt((ws_only.void(), line_comment.void()))).parse_next(input)?;
    Ok(())
}

/// Parse whitespace (no comments).
fn ws_only<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_whitespace()).parse_next(input)
}

/// Parse a line comment: // ... newline
fn line_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("//", take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse a single top-level item.
fn item(input: &mut &str) -> ModalResult<Item> {
    alt((import_directive, entity_definition.map(Item::Entity))).parse_next(input)
}

/// Parse an import directive: import "path";
fn import_directive(input: &mut &str) -> ModalResult<Item> {
    "import".parse_next(input)?;
    skip_ws_and_comments(input)?;
    let path: &str =
        delimited('"', take_while(1.., |c: char| c != '"'), '"').parse_next(input)?;
    skip_ws_and_comments(input)?;
    ';'.parse_next(input)?;
    Ok(Item::Import(path.to_string()))
}

/// Parse an entity definition: name index? = body attributes* ;
fn entity_definition(input: &mut &str) -> ModalResult<Entity> {
    let name = entity_identifier(input)?;
    skip_ws_and_comments(input)?;

    // Optional index: [ expr ]
    let index: Option<Expr> = opt(index_expression).parse_next(input)?;
    skip_ws_and_comments(input)?;

    // Equals sign
    '='.parse_next(input)?;
    skip_ws_and_comments(input)?;

    // Value body (template or hash)
    let value = body(input)?;

    // Optional attributes: .name: body, .name: body
    let attrs: Vec<(String, Body)> = repeat(0.., attribute).parse_next(input)?;
    skip_ws_and_comments(input)?;

    // Semicolon
    ';'.parse_next(input)?;

    Ok(Entity {
        name,
        index,
        value,
        attrs,
    })
}

/// Parse an entity identifier (lowercase start, alphanumeric + underscore).
fn entity_identifier(input: &mut &str) -> ModalResult<String> {
    let ident: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;

    // Validate: must start with lowercase letter
    let first = ident.chars().next().unwrap_or('?');
    if !first.is_ascii_lowercase() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    Ok(ident.to_string())
}

/// Parse an index expression: [ expr ]
fn index_expression(input: &mut &str) -> ModalResult<Expr> {
    delimited(('[', ws), expression, (ws, ']')).parse_next(input)
}

/// Parse an entity or branch body: a template string or a hash.
fn body(input: &mut &str) -> ModalResult<Body> {
    alt((
        hash_value.map(Body::Hash),
        template_string.map(Body::Template),
    ))
    .parse_next(input)
}

/// Parse a hash: { key: body, *key: body, ... }
fn hash_value(input: &mut &str) -> ModalResult<Hash> {
    delimited(
        ('{', skip_ws_and_comments),
        hash_branches,
        (skip_ws_and_comments, '}'),
    )
    .parse_next(input)
}

/// Parse hash branches with trailing comma support.
fn hash_branches(input: &mut &str) -> ModalResult<Hash> {
    let branches: Vec<HashBranch> = separated(
        0..,
        hash_branch,
        (skip_ws_and_comments, ',', skip_ws_and_comments),
    )
    .parse_next(input)?;

    // Allow trailing comma
    let _ = opt((skip_ws_and_comments, ',')).parse_next(input)?;

    Ok(Hash { branches })
}

/// Parse a single hash branch: key: body (with optional * default marker).
fn hash_branch(input: &mut &str) -> ModalResult<HashBranch> {
    let default = opt('*').parse_next(input)?.is_some();
    let key: &str = identifier(input)?;
    skip_ws_and_comments(input)?;
    ':'.parse_next(input)?;
    skip_ws_and_comments(input)?;
    let branch_body = body(input)?;

    Ok(HashBranch {
        key: key.to_string(),
        default,
        body: branch_body,
    })
}

/// Parse an attribute: .name: body (with optional leading comma).
fn attribute(input: &mut &str) -> ModalResult<(String, Body)> {
    skip_ws_and_comments(input)?;
    let _ = opt((',', skip_ws_and_comments)).parse_next(input)?;
    '.'.parse_next(input)?;
    let name: &str = identifier(input)?;
    skip_ws_and_comments(input)?;
    ':'.parse_next(input)?;
    skip_ws_and_comments(input)?;
    let attr_body = body(input)?;
    Ok((name.to_string(), attr_body))
}
