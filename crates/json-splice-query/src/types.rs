//! Types for parsed filter expressions.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("EMPTY_EXPR")]
    Empty,
    #[error("BAD_OP")]
    BadOp,
    #[error("BAD_LITERAL: {0}")]
    BadLiteral(String),
}

/// Comparison operator inside a `#(...)` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `%`: wildcard pattern match with `*` and `?`.
    Match,
    /// `!%`: negated wildcard pattern match.
    NotMatch,
}

/// A parsed filter expression.
///
/// `key` is the decoded dot path inside the element (empty means the
/// element itself). A filter without a condition is a bare existence
/// check.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub key: Vec<String>,
    pub cond: Option<(FilterOp, Value)>,
}
