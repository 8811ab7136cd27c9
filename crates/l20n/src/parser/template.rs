//! Template string and expression parser using winnow.
//!
//! Parses quoted templates into an AST. Handles:
//! - Literal text segments
//! - Escape sequences: {{ }}
//! - Interpolated expressions: externals ($name), globals (@name), macro
//!   calls (@name(args)), entity references, literals, and property paths

use super::ast::*;
use super::error::ParseError;
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

/// Parse a standalone template string (the quoted form, without the quotes).
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template_content(&mut remaining) {
        Ok(template) => {
            if remaining.is_empty() {
                Ok(template)
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

/// Parse a quoted template string: "content"
pub(crate) fn template_string(input: &mut &str) -> ModalResult<Template> {
    delimited('"', template_content, '"').parse_next(input)
}

/// Parse the content of a template string.
fn template_content(input: &mut &str) -> ModalResult<Template> {
    let mut segments = Vec::new();
    while let Some(segment) = opt(template_segment).parse_next(input)? {
        segments.push(segment);
    }
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Parse a single template segment.
fn template_segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escape_sequence, interpolation, literal_char)).parse_next(input)
}

/// Parse escape sequences in templates: {{ }}
fn escape_sequence(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "{{".value(Segment::Literal("{".to_string())),
        "}}".value(Segment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

/// Parse a literal character in a template (not { } or ").
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    none_of(['{', '}', '"'])
        .map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse an interpolation: { expr }
fn interpolation(input: &mut &str) -> ModalResult<Segment> {
    delimited(('{', ws), expression, (ws, '}'))
        .map(Segment::Interpolation)
        .parse_next(input)
}

/// Parse whitespace within interpolations and index expressions.
pub(crate) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse an expression: a primary term followed by a property path.
pub(crate) fn expression(input: &mut &str) -> ModalResult<Expr> {
    let mut expr = primary(input)?;
    while let Some(name) = opt(preceded('.', identifier)).parse_next(input)? {
        expr = Expr::Property {
            base: Box::new(expr),
            name: name.to_string(),
        };
    }
    Ok(expr)
}

/// Parse a primary expression term.
fn primary(input: &mut &str) -> ModalResult<Expr> {
    alt((
        external_reference,
        global_reference,
        string_literal,
        number_literal,
        identifier_or_keyword,
    ))
    .parse_next(input)
}

/// Parse an external variable reference: $name
fn external_reference(input: &mut &str) -> ModalResult<Expr> {
    preceded('$', identifier)
        .map(|name: &str| Expr::External(name.to_string()))
        .parse_next(input)
}

/// Parse a global reference (@name) or macro call (@name(args)).
fn global_reference(input: &mut &str) -> ModalResult<Expr> {
    let name: &str = preceded('@', identifier).parse_next(input)?;
    let args: Option<Vec<Expr>> = opt(call_args).parse_next(input)?;
    Ok(match args {
        Some(args) => Expr::Call {
            name: name.to_string(),
            args,
        },
        None => Expr::Global(name.to_string()),
    })
}

/// Parse macro call arguments: (arg1, arg2, ...)
fn call_args(input: &mut &str) -> ModalResult<Vec<Expr>> {
    delimited(
        ('(', ws),
        separated(0.., expression, (ws, ',', ws)),
        (ws, ')'),
    )
    .parse_next(input)
}

/// Parse a quoted string literal within an expression.
fn string_literal(input: &mut &str) -> ModalResult<Expr> {
    delimited('"', take_while(0.., |c: char| c != '"'), '"')
        .map(|s: &str| Expr::String(s.to_string()))
        .parse_next(input)
}

/// Parse an integer literal, with optional leading minus.
fn number_literal(input: &mut &str) -> ModalResult<Expr> {
    let negative = opt('-').parse_next(input)?.is_some();
    let digits: &str = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let value: i64 = digits
        .parse()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;
    Ok(Expr::Number(if negative { -value } else { value }))
}

/// Parse a bare identifier, recognizing the boolean keywords.
fn identifier_or_keyword(input: &mut &str) -> ModalResult<Expr> {
    identifier
        .map(|name: &str| match name {
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            _ => Expr::Identifier(name.to_string()),
        })
        .parse_next(input)
}

/// Parse an identifier: letter or underscore start, alphanumeric continuation.
pub(crate) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let ident: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;
    let first = ident.chars().next().unwrap_or('?');
    if first.is_ascii_digit() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(ident)
}

/// Merge adjacent literal segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Interpolation(_) => result.push(other),
        }
    }

    result
}
