//! Path resolution: locating the byte span a path addresses.
//!
//! The resolver drives the scanner through the document following the
//! compiled path. It produces `Target`s: the byte range to replace (or
//! the insertion slot where the value would go) plus the comma-boundary
//! metadata and synthesis instructions the splicer needs. Wildcard and
//! all-matches query parts produce one target per selected element.

use crate::path::{PartKind, PathPart};
use crate::scan;
use crate::SpliceError;

/// Kind of container enclosing the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Object,
    Array,
    /// No enclosing container: the target replaces a whole (sub)document
    /// and the synthesis tail builds the structure around the value.
    None,
}

/// A resolved edit location.
#[derive(Debug, Clone)]
pub(crate) struct Target {
    /// Replaced byte range; `start == end` is a pure insertion.
    pub start: usize,
    pub end: usize,
    /// Whether the full path resolved to an existing value.
    pub exists: bool,
    pub container: Container,
    /// Inserting into a container that already holds members.
    pub needs_comma: bool,
    /// `null` slots emitted before the value (sparse array assignment).
    pub pad: usize,
    /// Key emitted for a new object member.
    pub new_key: Option<String>,
    /// Unconsumed parts, synthesized as nested containers around the value.
    pub tail: Vec<PathPart>,
    /// Start of the member key (object members; deletion cuts from here).
    pub key_start: Option<usize>,
    /// Offset of the comma before the member, when one exists.
    pub comma_before: Option<usize>,
    /// Offset of the comma after the member, when one exists.
    pub comma_after: Option<usize>,
}

impl Target {
    fn existing(
        start: usize,
        end: usize,
        container: Container,
        key_start: Option<usize>,
        comma_before: Option<usize>,
        comma_after: Option<usize>,
    ) -> Target {
        Target {
            start,
            end,
            exists: true,
            container,
            needs_comma: false,
            pad: 0,
            new_key: None,
            tail: Vec::new(),
            key_start,
            comma_before,
            comma_after,
        }
    }

    fn insertion(
        at: usize,
        container: Container,
        needs_comma: bool,
        pad: usize,
        new_key: Option<String>,
        tail: Vec<PathPart>,
    ) -> Target {
        Target {
            start: at,
            end: at,
            exists: false,
            container,
            needs_comma,
            pad,
            new_key,
            tail,
            key_start: None,
            comma_before: None,
            comma_after: None,
        }
    }

    /// Replace `[start, end)` wholesale with a synthesized chain. Used for
    /// the empty document, a non-container root, and a scalar met mid-path.
    fn overwrite(start: usize, end: usize, tail: Vec<PathPart>) -> Target {
        Target {
            start,
            end,
            exists: false,
            container: Container::None,
            needs_comma: false,
            pad: 0,
            new_key: None,
            tail,
            key_start: None,
            comma_before: None,
            comma_after: None,
        }
    }
}

/// Resolve a compiled path against the document.
///
/// With `for_delete` set, only existing values are reported: missing
/// members, scalar overwrites, and synthesis targets are dropped so that
/// a delete of something absent is a no-op. The append marker `-1` also
/// changes meaning: the last existing element instead of the slot past it.
pub(crate) fn resolve(
    json: &[u8],
    parts: &[PathPart],
    for_delete: bool,
) -> Result<Vec<Target>, SpliceError> {
    let mut out = Vec::new();
    let i = scan::skip_ws(json, 0);
    if i >= json.len() {
        // Empty document: the first part decides the root container kind.
        if !for_delete && synthesizable(parts) {
            out.push(Target::overwrite(i, i, parts.to_vec()));
        }
        return Ok(out);
    }
    match json[i] {
        b'{' => resolve_object(json, i, &parts[0], &parts[1..], for_delete, &mut out)?,
        b'[' => resolve_array(json, i, &parts[0], &parts[1..], for_delete, &mut out)?,
        _ => {
            // Non-container root: set replaces it entirely.
            if for_delete {
                return Ok(out);
            }
            let end = scan::scan_value(json, i)?;
            if synthesizable(parts) {
                out.push(Target::overwrite(i, end, parts.to_vec()));
            }
        }
    }
    Ok(out)
}

/// Whether a missing chain can be built from these parts. Wildcards and
/// queries address existing elements only.
fn synthesizable(parts: &[PathPart]) -> bool {
    parts.iter().all(|p| p.kind == PartKind::Plain)
}

fn resolve_object(
    json: &[u8],
    at: usize,
    part: &PathPart,
    rest: &[PathPart],
    for_delete: bool,
    out: &mut Vec<Target>,
) -> Result<(), SpliceError> {
    if part.kind != PartKind::Plain {
        // Wildcards and queries select array elements, never object members.
        return Ok(());
    }
    let mut i = at + 1;
    let mut members = 0usize;
    let mut last_comma: Option<usize> = None;
    loop {
        i = scan::skip_ws(json, i);
        match json.get(i).copied() {
            None => return Err(SpliceError::Internal),
            Some(b'}') => {
                if for_delete || !synthesizable(rest) {
                    return Ok(());
                }
                let slot = trim_trailing_ws(json, i, at + 1);
                out.push(Target::insertion(
                    slot,
                    Container::Object,
                    members > 0,
                    0,
                    Some(part.text.clone()),
                    rest.to_vec(),
                ));
                return Ok(());
            }
            Some(b',') => {
                last_comma = Some(i);
                i += 1;
            }
            Some(b'"') => {
                let key_start = i;
                let key_end = scan::scan_string(json, i)?;
                let colon = scan::skip_ws(json, key_end);
                if json.get(colon) != Some(&b':') {
                    return Err(SpliceError::Internal);
                }
                let v_start = scan::skip_ws(json, colon + 1);
                let v_end = scan::scan_value(json, v_start)?;
                if key_matches(&json[key_start + 1..key_end - 1], &part.text) {
                    if rest.is_empty() {
                        out.push(Target::existing(
                            v_start,
                            v_end,
                            Container::Object,
                            Some(key_start),
                            last_comma,
                            scan::comma_after(json, v_end),
                        ));
                    } else {
                        descend(json, v_start, v_end, rest, for_delete, out)?;
                    }
                    return Ok(());
                }
                members += 1;
                i = v_end;
            }
            Some(_) => return Err(SpliceError::Internal),
        }
    }
}

fn resolve_array(
    json: &[u8],
    at: usize,
    part: &PathPart,
    rest: &[PathPart],
    for_delete: bool,
    out: &mut Vec<Target>,
) -> Result<(), SpliceError> {
    let index = part.as_index();
    let append = part.is_append();
    let (query, all) = match &part.kind {
        PartKind::Wildcard => (None, true),
        PartKind::Query { expr, all } => (Some(expr.as_str()), *all),
        PartKind::Plain => {
            if index.is_none() && !append {
                // A key part cannot address an array element.
                return Ok(());
            }
            (None, false)
        }
    };
    let broadcast = !matches!(part.kind, PartKind::Plain);

    let mut i = at + 1;
    let mut count = 0usize;
    let mut last_comma: Option<usize> = None;
    let mut last_elem: Option<(usize, usize, Option<usize>)> = None;
    loop {
        i = scan::skip_ws(json, i);
        match json.get(i).copied() {
            None => return Err(SpliceError::Internal),
            Some(b']') => {
                if append {
                    if for_delete {
                        // `-1` under delete targets the last existing element.
                        let Some((s, e, cb)) = last_elem else {
                            return Ok(());
                        };
                        if rest.is_empty() {
                            out.push(Target::existing(
                                s,
                                e,
                                Container::Array,
                                None,
                                cb,
                                scan::comma_after(json, e),
                            ));
                        } else {
                            descend(json, s, e, rest, for_delete, out)?;
                        }
                        return Ok(());
                    }
                    if !synthesizable(rest) {
                        return Ok(());
                    }
                    let slot = trim_trailing_ws(json, i, at + 1);
                    out.push(Target::insertion(
                        slot,
                        Container::Array,
                        count > 0,
                        0,
                        None,
                        rest.to_vec(),
                    ));
                    return Ok(());
                }
                if let Some(n) = index {
                    // Past the end: pad the gap with nulls.
                    if for_delete || !synthesizable(rest) {
                        return Ok(());
                    }
                    let slot = trim_trailing_ws(json, i, at + 1);
                    out.push(Target::insertion(
                        slot,
                        Container::Array,
                        count > 0,
                        n - count,
                        None,
                        rest.to_vec(),
                    ));
                    return Ok(());
                }
                // Broadcast exhausted the elements.
                return Ok(());
            }
            Some(b',') => {
                last_comma = Some(i);
                i += 1;
            }
            Some(_) => {
                let v_start = i;
                let v_end = scan::scan_value(json, i)?;
                if broadcast {
                    let selected = match query {
                        None => true,
                        Some(expr) => json_splice_query::matches(&json[v_start..v_end], expr),
                    };
                    if selected {
                        if rest.is_empty() {
                            out.push(Target::existing(
                                v_start,
                                v_end,
                                Container::Array,
                                None,
                                last_comma,
                                scan::comma_after(json, v_end),
                            ));
                        } else {
                            descend(json, v_start, v_end, rest, for_delete, out)?;
                        }
                        if query.is_some() && !all {
                            return Ok(());
                        }
                    }
                } else if index == Some(count) {
                    if rest.is_empty() {
                        out.push(Target::existing(
                            v_start,
                            v_end,
                            Container::Array,
                            None,
                            last_comma,
                            scan::comma_after(json, v_end),
                        ));
                    } else {
                        descend(json, v_start, v_end, rest, for_delete, out)?;
                    }
                    return Ok(());
                }
                last_elem = Some((v_start, v_end, last_comma));
                count += 1;
                i = v_end;
            }
        }
    }
}

/// Step into a member value with the remaining parts.
fn descend(
    json: &[u8],
    v_start: usize,
    v_end: usize,
    parts: &[PathPart],
    for_delete: bool,
    out: &mut Vec<Target>,
) -> Result<(), SpliceError> {
    match json[v_start] {
        b'{' => resolve_object(json, v_start, &parts[0], &parts[1..], for_delete, out),
        b'[' => resolve_array(json, v_start, &parts[0], &parts[1..], for_delete, out),
        _ => {
            // A scalar where the path expects a container: set replaces it
            // with the synthesized chain, delete treats it as not found.
            if !for_delete && synthesizable(parts) {
                out.push(Target::overwrite(v_start, v_end, parts.to_vec()));
            }
            Ok(())
        }
    }
}

/// Back over interior whitespace so insertions land right after the last
/// member, keeping the container's trailing whitespace outside the edit.
fn trim_trailing_ws(json: &[u8], mut i: usize, floor: usize) -> usize {
    while i > floor && matches!(json[i - 1], b' ' | b'\t' | b'\n' | b'\r') {
        i -= 1;
    }
    i
}

/// Compare a raw (still escaped) object key against a decoded path key.
fn key_matches(raw: &[u8], want: &str) -> bool {
    if !raw.contains(&b'\\') {
        return raw == want.as_bytes();
    }
    match decode_key(raw) {
        Some(key) => key == want,
        None => false,
    }
}

/// Decode the JSON escapes in a key for comparison. Malformed escapes
/// yield `None`, which simply never matches.
fn decode_key(raw: &[u8]) -> Option<String> {
    let s = std::str::from_utf8(raw).ok()?;
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let hi = hex4(&mut chars)?;
                let code = if (0xD800..0xDC00).contains(&hi) {
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let lo = hex4(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&lo) {
                        return None;
                    }
                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                } else {
                    hi
                };
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

fn hex4(chars: &mut std::str::Chars) -> Option<u32> {
    let mut v = 0u32;
    for _ in 0..4 {
        v = v * 16 + chars.next()?.to_digit(16)?;
    }
    Some(v)
}
