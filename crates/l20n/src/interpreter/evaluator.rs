//! Expression evaluation engine for L20n entities.
//!
//! This module reduces parsed entities to strings. It resolves entity
//! references with locale fallback, substitutes external and global
//! variables, selects hash branches through index expressions, and walks
//! property paths, with cycle detection threaded through the recursion.
//!
//! Property access degrades gracefully: a path step that does not apply to
//! the value it reaches (an attribute on a plain string, a field missing
//! from a hash with a primary field) falls back instead of erroring, so a
//! lookup like `brand.short` against a string-valued `brand` yields the
//! string itself.

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::{Environment, EvalContext, EvalError};
use crate::parser::ast::{Body, Entity, Expr, Segment, Template};
use crate::types::{Global, InfoCollector, Value};

/// Evaluate an entity, optionally descending into a property path.
///
/// The first path segment is matched against the entity's attributes; an
/// unmatched path degrades to the entity's value body. Remaining segments
/// select hash branches or hash-object fields as the reduction proceeds.
pub(crate) fn eval_entity(
    entity: &Entity,
    path: &[&str],
    ctx: &mut EvalContext<'_>,
    env: &Environment,
) -> Result<Value, EvalError> {
    if let Some((first, rest)) = path.split_first()
        && let Some(attr_body) = entity.attr(first)
    {
        return eval_body(attr_body, rest, None, &entity.name, ctx, env);
    }
    eval_body(&entity.value, path, entity.index.as_ref(), &entity.name, ctx, env)
}

/// Evaluate a body, selecting hash branches by path, index, or default.
fn eval_body(
    body: &Body,
    path: &[&str],
    index: Option<&Expr>,
    entity_name: &str,
    ctx: &mut EvalContext<'_>,
    env: &Environment,
) -> Result<Value, EvalError> {
    match body {
        Body::Template(template) => Ok(Value::String(eval_template(template, ctx, env)?)),
        Body::Hash(hash) => {
            // Path step first; a miss falls through to index/default selection.
            if let Some((first, rest)) = path.split_first()
                && let Some(branch) = hash.get(first)
            {
                return eval_body(branch, rest, None, entity_name, ctx, env);
            }

            if let Some(index_expr) = index {
                let selected = eval_expr(index_expr, ctx, env)?;
                let key = value_to_string(&selected)?;
                if let Some(branch) = hash.get(&key).or_else(|| hash.default_body()) {
                    return eval_body(branch, &[], None, entity_name, ctx, env);
                }
                let available = hash.keys();
                return Err(EvalError::MissingBranch {
                    entity: entity_name.to_string(),
                    suggestions: compute_suggestions(&key, &available),
                    key,
                    available,
                });
            }

            if let Some(branch) = hash.default_body() {
                return eval_body(branch, &[], None, entity_name, ctx, env);
            }

            Err(EvalError::NoDefaultBranch {
                entity: entity_name.to_string(),
            })
        }
    }
}

/// Evaluate a template, producing the interpolated string.
pub(crate) fn eval_template(
    template: &Template,
    ctx: &mut EvalContext<'_>,
    env: &Environment,
) -> Result<String, EvalError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Interpolation(expr) => {
                let value = eval_expr(expr, ctx, env)?;
                output.push_str(&value_to_string(&value)?);
            }
        }
    }
    Ok(output)
}

/// Reduce an expression to a value.
pub(crate) fn eval_expr(
    expr: &Expr,
    ctx: &mut EvalContext<'_>,
    env: &Environment,
) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::String(s) => Ok(Value::String(s.clone())),
        Expr::External(name) => ctx
            .get_var(name)
            .cloned()
            .ok_or_else(|| EvalError::MissingExternal { name: name.clone() }),
        Expr::Global(name) => resolve_global(name, env),
        Expr::Call { name, args } => {
            let Some(macro_fn) = env.macro_fn(name) else {
                if env.global(name).is_some() {
                    return Err(EvalError::NotAMacro { name: name.clone() });
                }
                return Err(EvalError::UnknownGlobal {
                    name: name.clone(),
                    suggestions: compute_suggestions(name, &env.global_names()),
                });
            };
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, ctx, env)?);
            }
            macro_fn(env.current_locale(), &values)
        }
        Expr::Identifier(name) => resolve_entity(name, &[], ctx, env),
        Expr::Property { .. } => {
            let (root, path) = split_property(expr);
            if let Expr::Identifier(name) = root {
                return resolve_entity(name, &path, ctx, env);
            }
            let mut value = eval_expr(root, ctx, env)?;
            for segment in path {
                value = project_field(value, segment);
            }
            Ok(value)
        }
    }
}

/// Resolve an entity reference under cycle detection.
fn resolve_entity(
    name: &str,
    path: &[&str],
    ctx: &mut EvalContext<'_>,
    env: &Environment,
) -> Result<Value, EvalError> {
    let Some(entity) = env.lookup(name) else {
        return Err(EvalError::EntityNotFound {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &env.entity_names()),
        });
    };
    ctx.push_call(name)?;
    let value = eval_entity(entity, path, ctx, env)?;
    ctx.pop_call();
    Ok(value)
}

/// Resolve a `@name` global reference.
fn resolve_global(name: &str, env: &Environment) -> Result<Value, EvalError> {
    match env.global(name) {
        Some(Global::Value(value)) => Ok(value.clone()),
        Some(Global::Provider(provider)) => Ok(provider.resolve()),
        Some(Global::Hash(hash)) => Ok(Value::Hash(hash.clone())),
        None => Err(EvalError::UnknownGlobal {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &env.global_names()),
        }),
    }
}

/// Flatten a property chain into its root expression and path segments.
fn split_property(expr: &Expr) -> (&Expr, Vec<&str>) {
    let mut path = Vec::new();
    let mut current = expr;
    while let Expr::Property { base, name } = current {
        path.push(name.as_str());
        current = base;
    }
    path.reverse();
    (current, path)
}

/// Project one property step onto a value.
///
/// Hash objects resolve the named field, falling back to their primary
/// field. Any other value passes through unchanged.
fn project_field(value: Value, name: &str) -> Value {
    match value {
        Value::Hash(hash) => {
            let mut info = InfoCollector::new();
            hash.collect(&mut info);
            info.get(name)
                .or_else(|| info.primary())
                .unwrap_or(Value::Hash(hash))
        }
        other => other,
    }
}

/// Render a fully reduced value as text.
///
/// Numbers, booleans and strings render directly; a hash that survived
/// reduction has no textual form.
pub(crate) fn value_to_string(value: &Value) -> Result<String, EvalError> {
    match value {
        Value::Hash(_) => Err(EvalError::NotAString { kind: value.kind() }),
        other => Ok(other.to_string()),
    }
}
