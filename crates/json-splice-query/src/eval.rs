//! Filter evaluation against element bytes.

use serde_json::Value;

use crate::parser::parse;
use crate::types::{Filter, FilterOp};

/// Evaluate a filter expression against one array element's JSON text.
///
/// This is the whole contract of the crate: `(element bytes, expression)`
/// to a boolean. It never fails; anything unparseable answers `false`.
pub fn matches(element: &[u8], expr: &str) -> bool {
    let Ok(filter) = parse(expr) else {
        return false;
    };
    let Ok(doc) = serde_json::from_slice::<Value>(element) else {
        return false;
    };
    filter.matches_value(&doc)
}

impl Filter {
    /// Evaluate this filter against a parsed element.
    pub fn matches_value(&self, element: &Value) -> bool {
        let Some(actual) = lookup(element, &self.key) else {
            return false;
        };
        match &self.cond {
            None => !matches!(actual, Value::Null | Value::Bool(false)),
            Some((op, literal)) => compare(*op, actual, literal),
        }
    }
}

fn lookup<'a>(element: &'a Value, key: &[String]) -> Option<&'a Value> {
    let mut current = element;
    for step in key {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(arr) => arr.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn compare(op: FilterOp, actual: &Value, literal: &Value) -> bool {
    match op {
        FilterOp::Eq => loose_eq(actual, literal),
        FilterOp::Ne => !loose_eq(actual, literal),
        FilterOp::Lt | FilterOp::Le | FilterOp::Gt | FilterOp::Ge => ordered(op, actual, literal),
        FilterOp::Match => pattern(actual, literal, false),
        FilterOp::NotMatch => pattern(actual, literal, true),
    }
}

/// Numbers compare numerically regardless of representation; everything
/// else compares structurally.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn ordered(op: FilterOp, a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return match op {
            FilterOp::Lt => x < y,
            FilterOp::Le => x <= y,
            FilterOp::Gt => x > y,
            FilterOp::Ge => x >= y,
            _ => false,
        };
    }
    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        return match op {
            FilterOp::Lt => x < y,
            FilterOp::Le => x <= y,
            FilterOp::Gt => x > y,
            FilterOp::Ge => x >= y,
            _ => false,
        };
    }
    false
}

fn pattern(actual: &Value, literal: &Value, negate: bool) -> bool {
    let (Some(s), Some(p)) = (actual.as_str(), literal.as_str()) else {
        return false;
    };
    wildcard_match(s, p) != negate
}

/// Match `s` against a pattern where `*` spans any run and `?` matches a
/// single character. The pattern compiles through `regex`; if compilation
/// fails, fall back to a literal comparison.
fn wildcard_match(s: &str, pattern: &str) -> bool {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    re.push('$');
    match regex::RegexBuilder::new(&re)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(rx) => rx.is_match(s),
        Err(_) => s == pattern,
    }
}
