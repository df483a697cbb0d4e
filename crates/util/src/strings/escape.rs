use std::fmt::Write;

/// Escape special characters in a string for JSON serialization.
///
/// Escapes control characters (0x00-0x1F), the double quote, and the
/// backslash. Multi-byte UTF-8 sequences pass through unchanged.
///
/// # Examples
///
/// ```
/// use json_splice_util::strings::escape;
///
/// assert_eq!(escape("hello"), "hello");
/// assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Writing into a String cannot fail.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Append `s` to `out` as a double-quoted, escaped JSON string.
pub fn append_quoted(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');
    out.extend_from_slice(escape(s).as_bytes());
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_quotes_and_backslash() {
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_escape_named_controls() {
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("a\tb"), "a\\tb");
        assert_eq!(escape("a\rb"), "a\\rb");
        assert_eq!(escape("a\x08b"), "a\\bb");
        assert_eq!(escape("a\x0cb"), "a\\fb");
    }

    #[test]
    fn test_escape_other_controls() {
        assert_eq!(escape("null\0byte"), "null\\u0000byte");
        assert_eq!(escape("\x1b"), "\\u001b");
    }

    #[test]
    fn test_escape_unicode_passthrough() {
        assert_eq!(escape("hello 日本語"), "hello 日本語");
        assert_eq!(escape("😇"), "😇");
    }

    #[test]
    fn test_append_quoted() {
        let mut out = Vec::new();
        append_quoted(&mut out, "a\"b");
        assert_eq!(out, b"\"a\\\"b\"");
    }
}
