//! Structural edits on raw JSON text.
//!
//! `json-splice` sets, replaces, and deletes values in a JSON document
//! without deserializing it into a tree. The path resolver locates the
//! byte span the path addresses, and the splicer emits three regions:
//! the bytes before the edit, the replacement text, and the bytes after.
//! Formatting outside the edited span survives byte-for-byte, and every
//! operation is a pure function from input bytes to output bytes.
//!
//! Paths are dot-delimited. `\.`, `\\`, and `\:` are literal escapes, a
//! leading `:` forces a numeric part to be an object key, `-1` appends to
//! an array, `#` broadcasts over every element, and `#(expr)` /
//! `#(expr)#` filter elements through [`json_splice_query`]. Paths that
//! descend through missing keys or past the end of an array synthesize
//! the missing chain, padding skipped array slots with `null`.
//!
//! ```
//! use json_splice::{delete, set};
//!
//! let doc = r#"{"name":{"first":"Tom"},"age":37}"#;
//! let doc = set(doc, "name.last", "Anderson")?;
//! let doc = delete(&doc, "age")?;
//! assert_eq!(doc, r#"{"name":{"first":"Tom","last":"Anderson"}}"#);
//! # Ok::<(), json_splice::SpliceError>(())
//! ```

use thiserror::Error;

mod encode;
mod path;
mod resolve;
mod scan;
mod splice;

pub use encode::Scalar;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("PATH_EMPTY")]
    EmptyPath,
    #[error("PATH_SYNTAX: {0}")]
    PathSyntax(String),
    #[error("ENCODE: {0}")]
    Encode(String),
    #[error("LENGTH_MISMATCH")]
    LengthMismatch,
    #[error("MALFORMED_JSON")]
    Internal,
}

/// A byte range addressing one value inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Tuning knobs for the byte-level entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Size the output buffer like the input up front, growing only when
    /// the guess turns out wrong.
    pub optimistic: bool,
    /// Reuse the input allocation. The owned-buffer entry points then
    /// splice edits directly into the buffer they were handed; a fresh
    /// allocation still happens when an edit grows past its capacity.
    pub replace_in_place: bool,
}

// ── String surface ────────────────────────────────────────────────────────

/// Set the value at `path`, encoding a scalar.
pub fn set(json: &str, path: &str, value: impl Into<Scalar>) -> Result<String, SpliceError> {
    set_opts(json, path, value, &Options::default())
}

/// `set` with explicit [`Options`].
pub fn set_opts(
    json: &str,
    path: &str,
    value: impl Into<Scalar>,
    opts: &Options,
) -> Result<String, SpliceError> {
    stringify(set_impl(json.as_bytes().to_vec(), path, &value.into(), opts)?)
}

/// Splice pre-encoded JSON text at `path`, verbatim and unvalidated.
pub fn set_raw(json: &str, path: &str, raw: &str) -> Result<String, SpliceError> {
    set_raw_opts(json, path, raw, &Options::default())
}

/// `set_raw` with explicit [`Options`].
pub fn set_raw_opts(
    json: &str,
    path: &str,
    raw: &str,
    opts: &Options,
) -> Result<String, SpliceError> {
    let value = Scalar::Raw(raw.as_bytes().to_vec());
    stringify(set_impl(json.as_bytes().to_vec(), path, &value, opts)?)
}

/// Delete the value at `path`. A path that resolves to nothing is a
/// no-op: the input comes back unchanged.
pub fn delete(json: &str, path: &str) -> Result<String, SpliceError> {
    stringify(delete_impl(json.as_bytes().to_vec(), path)?)
}

/// Delete every path in input order, each against the previous output.
/// Unresolved paths are skipped silently.
pub fn delete_many(json: &str, paths: &[&str]) -> Result<String, SpliceError> {
    let mut buf = json.as_bytes().to_vec();
    for path in paths {
        buf = delete_impl(buf, path)?;
    }
    stringify(buf)
}

// ── Byte surface ──────────────────────────────────────────────────────────

/// Byte-slice variant of [`set`].
pub fn set_bytes(json: &[u8], path: &str, value: impl Into<Scalar>) -> Result<Vec<u8>, SpliceError> {
    set_impl(json.to_vec(), path, &value.into(), &Options::default())
}

/// Owned-buffer variant of [`set`]; with `replace_in_place` the edit
/// splices into the buffer it was handed.
pub fn set_bytes_opts(
    json: Vec<u8>,
    path: &str,
    value: impl Into<Scalar>,
    opts: &Options,
) -> Result<Vec<u8>, SpliceError> {
    set_impl(json, path, &value.into(), opts)
}

/// Byte-slice variant of [`set_raw`].
pub fn set_raw_bytes(json: &[u8], path: &str, raw: &[u8]) -> Result<Vec<u8>, SpliceError> {
    let value = Scalar::Raw(raw.to_vec());
    set_impl(json.to_vec(), path, &value, &Options::default())
}

/// Owned-buffer variant of [`set_raw`].
pub fn set_raw_bytes_opts(
    json: Vec<u8>,
    path: &str,
    raw: &[u8],
    opts: &Options,
) -> Result<Vec<u8>, SpliceError> {
    let value = Scalar::Raw(raw.to_vec());
    set_impl(json, path, &value, opts)
}

/// Byte-slice variant of [`delete`].
pub fn delete_bytes(json: &[u8], path: &str) -> Result<Vec<u8>, SpliceError> {
    delete_impl(json.to_vec(), path)
}

/// Byte-slice variant of [`delete_many`].
pub fn delete_many_bytes(json: &[u8], paths: &[&str]) -> Result<Vec<u8>, SpliceError> {
    let mut buf = json.to_vec();
    for path in paths {
        buf = delete_impl(buf, path)?;
    }
    Ok(buf)
}

/// Resolve a path to the byte spans of every existing target, in document
/// order. This is the enumerator feeding [`set_bytes_many`]: broadcast
/// paths such as `#.id` yield one span per element.
pub fn locate_bytes(json: &[u8], path: &str) -> Result<Vec<Span>, SpliceError> {
    let parts = path::compile(path)?;
    let targets = resolve::resolve(json, &parts, true)?;
    Ok(targets
        .iter()
        .map(|t| Span {
            start: t.start,
            end: t.end,
        })
        .collect())
}

/// Apply one replacement value per pre-resolved span, sorted by
/// descending start offset so each edit leaves the remaining offsets
/// valid. Spans must be disjoint; mismatched slice lengths are an error.
pub fn set_bytes_many(
    json: Vec<u8>,
    spans: &[Span],
    values: &[Scalar],
    opts: &Options,
) -> Result<Vec<u8>, SpliceError> {
    if spans.len() != values.len() {
        return Err(SpliceError::LengthMismatch);
    }
    let mut edits: Vec<(Span, Vec<u8>)> = Vec::with_capacity(spans.len());
    for (span, value) in spans.iter().zip(values) {
        if span.start > span.end || span.end > json.len() {
            return Err(SpliceError::Internal);
        }
        edits.push((*span, value.encode()?));
    }
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    for pair in edits.windows(2) {
        if pair[1].0.end > pair[0].0.start {
            return Err(SpliceError::Internal);
        }
    }
    if opts.replace_in_place {
        let mut buf = json;
        for (span, text) in &edits {
            splice::splice_bytes(&mut buf, span.start, span.end, text);
        }
        Ok(buf)
    } else {
        let mut out = if opts.optimistic {
            Vec::with_capacity(json.len() + 32)
        } else {
            Vec::new()
        };
        let mut pos = 0;
        for (span, text) in edits.iter().rev() {
            out.extend_from_slice(&json[pos..span.start]);
            out.extend_from_slice(text);
            pos = span.end;
        }
        out.extend_from_slice(&json[pos..]);
        Ok(out)
    }
}

// ── Internals ─────────────────────────────────────────────────────────────

fn set_impl(
    input: Vec<u8>,
    path: &str,
    value: &Scalar,
    opts: &Options,
) -> Result<Vec<u8>, SpliceError> {
    let parts = path::compile(path)?;
    let encoded = value.encode()?;
    let mut targets = resolve::resolve(&input, &parts, false)?;
    if targets.is_empty() {
        // Nothing addressable and nothing to synthesize.
        return Ok(input);
    }
    if opts.replace_in_place {
        let mut buf = input;
        splice::apply_sets(&mut buf, &mut targets, &encoded);
        Ok(buf)
    } else {
        Ok(splice::render_sets(
            &input,
            &mut targets,
            &encoded,
            opts.optimistic,
        ))
    }
}

fn delete_impl(mut buf: Vec<u8>, path: &str) -> Result<Vec<u8>, SpliceError> {
    let parts = path::compile(path)?;
    let mut targets = resolve::resolve(&buf, &parts, true)?;
    splice::apply_deletes(&mut buf, &mut targets);
    Ok(buf)
}

fn stringify(buf: Vec<u8>) -> Result<String, SpliceError> {
    String::from_utf8(buf).map_err(|_| SpliceError::Encode("output is not valid UTF-8".to_string()))
}
