//! Filter-expression parser.

use serde_json::Value;

use crate::types::{Filter, FilterError, FilterOp};

/// Parse a filter expression such as `last="Murphy"` or `age>=47`.
///
/// The grammar is `key op literal`, a bare `key` (existence check), or
/// `op literal` against the element itself. Keys use the same `\.`
/// escaping as document paths.
pub fn parse(expr: &str) -> Result<Filter, FilterError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(FilterError::Empty);
    }
    let bytes = expr.as_bytes();
    let mut op_at = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b'!' | b'<' | b'>' | b'%' => {
                op_at = Some(i);
                break;
            }
            _ => i += 1,
        }
    }
    let Some(at) = op_at else {
        return Ok(Filter {
            key: parse_key(expr),
            cond: None,
        });
    };
    let key = parse_key(expr[..at].trim_end());
    let (op, lit_at) = match (bytes[at], bytes.get(at + 1).copied()) {
        (b'=', Some(b'=')) => (FilterOp::Eq, at + 2),
        (b'=', _) => (FilterOp::Eq, at + 1),
        (b'!', Some(b'=')) => (FilterOp::Ne, at + 2),
        (b'!', Some(b'%')) => (FilterOp::NotMatch, at + 2),
        (b'!', _) => return Err(FilterError::BadOp),
        (b'<', Some(b'=')) => (FilterOp::Le, at + 2),
        (b'<', _) => (FilterOp::Lt, at + 1),
        (b'>', Some(b'=')) => (FilterOp::Ge, at + 2),
        (b'>', _) => (FilterOp::Gt, at + 1),
        (b'%', _) => (FilterOp::Match, at + 1),
        _ => return Err(FilterError::BadOp),
    };
    let literal = parse_literal(expr[lit_at..].trim())?;
    Ok(Filter {
        key,
        cond: Some((op, literal)),
    })
}

/// Split a dot path, honoring `\.` escapes. Empty input means the element
/// itself.
fn parse_key(key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut part = String::new();
    let mut chars = key.chars();
    while let Some(c) = chars.next() {
        match c {
            '.' => parts.push(std::mem::take(&mut part)),
            '\\' => {
                if let Some(next) = chars.next() {
                    part.push(next);
                }
            }
            c => part.push(c),
        }
    }
    parts.push(part);
    parts
}

fn parse_literal(lit: &str) -> Result<Value, FilterError> {
    if lit.is_empty() {
        return Err(FilterError::BadLiteral(lit.to_string()));
    }
    if lit.starts_with('"') {
        return serde_json::from_str(lit).map_err(|_| FilterError::BadLiteral(lit.to_string()));
    }
    // Numbers, true, false, null; anything else reads as a bare string.
    match serde_json::from_str::<Value>(lit) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => Ok(v),
        _ => Ok(Value::String(unescape_bare(lit))),
    }
}

fn unescape_bare(lit: &str) -> String {
    let mut out = String::with_capacity(lit.len());
    let mut chars = lit.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            c => out.push(c),
        }
    }
    out
}
