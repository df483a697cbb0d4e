//! Edit planning and output emission.
//!
//! A splice emits three regions: the bytes before the edit, the
//! replacement text, and the bytes after it. The replacement text carries
//! the fix-up around the value: a separating comma when the container
//! already has members, `null` padding for sparse array assignment, the
//! quoted key for a new object member, and the nested containers for a
//! missing chain. Deletion cuts the value plus exactly one adjacent comma.

use json_splice_util::strings::append_quoted;

use crate::path::PathPart;
use crate::resolve::{Container, Target};
use crate::scan;

/// Replacement text for a set at this target: fix-up prefix, synthesized
/// chain, encoded value, chain close.
pub(crate) fn build_insert(target: &Target, encoded: &[u8]) -> Vec<u8> {
    if target.exists {
        return encoded.to_vec();
    }
    debug_assert!(target.new_key.is_none() || target.container == Container::Object);
    debug_assert!(target.pad == 0 || target.container == Container::Array);
    let mut out = Vec::with_capacity(encoded.len() + 16);
    if target.needs_comma {
        out.push(b',');
    }
    for _ in 0..target.pad {
        out.extend_from_slice(b"null,");
    }
    if let Some(key) = &target.new_key {
        append_quoted(&mut out, key);
        out.push(b':');
    }
    let (open, close) = chain_wrappers(&target.tail);
    out.extend_from_slice(&open);
    out.extend_from_slice(encoded);
    out.extend_from_slice(&close);
    out
}

/// Opening and closing text for a synthesized container chain: one nested
/// container per part, arrays padded with `null` up to the index.
fn chain_wrappers(tail: &[PathPart]) -> (Vec<u8>, Vec<u8>) {
    let mut open = Vec::new();
    let mut close = Vec::new();
    for part in tail {
        if part.is_append() || part.as_index().is_some() {
            open.push(b'[');
            for _ in 0..part.as_index().unwrap_or(0) {
                open.extend_from_slice(b"null,");
            }
            close.push(b']');
        } else {
            open.push(b'{');
            append_quoted(&mut open, &part.text);
            open.push(b':');
            close.push(b'}');
        }
    }
    close.reverse();
    (open, close)
}

/// Replace `[start, end)` of the buffer with `text`, shifting the tail.
pub(crate) fn splice_bytes(buf: &mut Vec<u8>, start: usize, end: usize, text: &[u8]) {
    let _ = buf.splice(start..end, text.iter().copied());
}

/// Apply set targets to the buffer in place, highest offset first so the
/// lower offsets stay valid.
pub(crate) fn apply_sets(buf: &mut Vec<u8>, targets: &mut [Target], encoded: &[u8]) {
    targets.sort_by(|a, b| b.start.cmp(&a.start));
    for t in targets.iter() {
        let text = build_insert(t, encoded);
        splice_bytes(buf, t.start, t.end, &text);
    }
}

/// Emit set targets into a fresh buffer in one ascending pass.
pub(crate) fn render_sets(
    json: &[u8],
    targets: &mut [Target],
    encoded: &[u8],
    optimistic: bool,
) -> Vec<u8> {
    targets.sort_by_key(|t| t.start);
    let mut out = if optimistic {
        Vec::with_capacity(json.len() + encoded.len() + 16)
    } else {
        Vec::new()
    };
    let mut pos = 0;
    for t in targets.iter() {
        out.extend_from_slice(&json[pos..t.start]);
        out.extend_from_slice(&build_insert(t, encoded));
        pos = t.end;
    }
    out.extend_from_slice(&json[pos..]);
    out
}

/// Apply delete targets, highest offset first. Object members are cut
/// from the key; the comma before the target is preferred, otherwise the
/// single comma after it is consumed along with the whitespace between.
pub(crate) fn apply_deletes(buf: &mut Vec<u8>, targets: &mut [Target]) {
    targets.sort_by(|a, b| b.start.cmp(&a.start));
    for (k, t) in targets.iter().enumerate() {
        let cut_start = t.key_start.unwrap_or(t.start);
        // Earlier cuts in the batch may have consumed the comma recorded at
        // resolve time, so later targets re-derive it from the buffer.
        let comma_after = if k == 0 {
            t.comma_after
        } else {
            scan::comma_after(buf, t.end)
        };
        let (left, right) = match (t.comma_before, comma_after) {
            (Some(cb), _) => (cb, t.end),
            (None, Some(ca)) => (cut_start, ca + 1),
            (None, None) => (cut_start, t.end),
        };
        splice_bytes(buf, left, right, b"");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::compile;

    fn wrappers(path: &str) -> (String, String) {
        let parts = compile(path).unwrap();
        let (open, close) = chain_wrappers(&parts);
        (
            String::from_utf8(open).unwrap(),
            String::from_utf8(close).unwrap(),
        )
    }

    #[test]
    fn test_chain_object_keys() {
        let (open, close) = wrappers("b.this");
        assert_eq!(open, r#"{"b":{"this":"#);
        assert_eq!(close, "}}");
    }

    #[test]
    fn test_chain_array_with_padding() {
        let (open, close) = wrappers("b.this.4");
        assert_eq!(open, r#"{"b":{"this":[null,null,null,null,"#);
        assert_eq!(close, "]}}");
    }

    #[test]
    fn test_chain_append_is_fresh_first_slot() {
        let (open, close) = wrappers("arr.-1");
        assert_eq!(open, r#"{"arr":["#);
        assert_eq!(close, "]}");
    }

    #[test]
    fn test_chain_forced_key_builds_object() {
        let (open, close) = wrappers(":1.x");
        assert_eq!(open, r#"{"1":{"x":"#);
        assert_eq!(close, "}}");
    }

    #[test]
    fn test_chain_escapes_keys() {
        let (open, _) = wrappers("\\:\\\\1");
        assert_eq!(open, r#"{":\\1":"#);
    }
}
