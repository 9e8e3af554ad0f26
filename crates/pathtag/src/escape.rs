// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reserved-character escaping.
//!
//! Three independent transforms live here:
//!
//! - [`backslash_escape`] and its inverse [`backslash_unescape`],
//! - [`entity_escape`], a one-way XML entity encoder,
//! - [`shell_unescape`], which undoes shell escaping of `#` only.

use crate::error::{Result, try_string};

/// Escapes every `\` in `s` as `\\`. All other characters, including `/`, `.` and
/// `@`, are copied verbatim.
///
/// [`backslash_unescape`] reverses this transform exactly.
///
/// # Examples
///
/// ```
/// use pathtag::{backslash_escape, backslash_unescape};
///
/// let escaped = backslash_escape(r"C:\data\a.nc").unwrap();
/// assert_eq!(escaped, r"C:\\data\\a.nc");
/// assert_eq!(backslash_unescape(&escaped), r"C:\data\a.nc");
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::OutOfMemory`](crate::ErrorKind::OutOfMemory) if the output
/// cannot be allocated.
pub fn backslash_escape(s: &str) -> Result<String> {
    let mut escaped = try_string(s.len() * 2)?;
    for c in s.chars() {
        if c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Ok(escaped)
}

/// Removes backslash escapes from `s`.
///
/// Each `\` is dropped and the character after it is copied verbatim, so `\\`
/// becomes `\` and `\x` becomes `x`. A trailing lone `\` is dropped.
#[must_use]
pub fn backslash_unescape(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                unescaped.push(next);
            }
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}

const fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Replaces `&`, `<`, `>`, `"` and `'` with their XML entity references.
///
/// There is no inverse; the output is meant for an XML-aware reader.
///
/// # Examples
///
/// ```
/// use pathtag::entity_escape;
///
/// assert_eq!(entity_escape("<a&b>").unwrap(), "&lt;a&amp;b&gt;");
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::OutOfMemory`](crate::ErrorKind::OutOfMemory) if the output
/// cannot be allocated.
pub fn entity_escape(s: &str) -> Result<String> {
    let extra: usize = s.chars().filter_map(entity).map(|e| e.len() - 1).sum();
    let mut escaped = try_string(s.len() + extra)?;
    for c in s.chars() {
        match entity(c) {
            Some(e) => escaped.push_str(e),
            None => escaped.push(c),
        }
    }
    Ok(escaped)
}

/// Collapses `\#` to `#`, leaving every other backslash in place.
///
/// Some shells pass an escaped `#` through without removing the backslash; this
/// undoes exactly that and nothing else.
///
/// # Examples
///
/// ```
/// use pathtag::shell_unescape;
///
/// assert_eq!(shell_unescape(r"\#x\y"), r"#x\y");
/// ```
#[must_use]
pub fn shell_unescape(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'#') {
            continue;
        }
        unescaped.push(c);
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslash_escape_doubles_backslash_only() {
        assert_eq!(backslash_escape(r"a\b").unwrap(), r"a\\b");
        assert_eq!(backslash_escape("/x.y@z").unwrap(), "/x.y@z");
    }

    #[test]
    fn backslash_escape_empty() {
        assert_eq!(backslash_escape("").unwrap(), "");
    }

    #[test]
    fn backslash_unescape_drops_marker() {
        assert_eq!(backslash_unescape(r"\\"), r"\");
        assert_eq!(backslash_unescape(r"\a\.b"), "a.b");
    }

    #[test]
    fn backslash_unescape_trailing_marker() {
        assert_eq!(backslash_unescape(r"abc\"), "abc");
    }

    #[test]
    fn backslash_round_trip() {
        for s in ["", r"\", r"\\\", r"a\b\\c", "/p/q.nc@host", r"ünï\cødé", r"\#"] {
            let escaped = backslash_escape(s).unwrap();
            assert_eq!(backslash_unescape(&escaped), s, "round trip failed for {s:?}");
        }
    }

    #[test]
    fn entity_escape_all_reserved() {
        assert_eq!(entity_escape(r#"&<>"'"#).unwrap(), "&amp;&lt;&gt;&quot;&apos;");
    }

    #[test]
    fn entity_escape_passes_other_text() {
        assert_eq!(entity_escape("plain text ü").unwrap(), "plain text ü");
    }

    #[test]
    fn entity_escape_is_not_idempotent() {
        assert_eq!(entity_escape("&amp;").unwrap(), "&amp;amp;");
    }

    #[test]
    fn shell_unescape_only_collapses_hash() {
        assert_eq!(shell_unescape(r"\#x\y"), r"#x\y");
    }

    #[test]
    fn shell_unescape_keeps_trailing_backslash() {
        assert_eq!(shell_unescape(r"x\"), r"x\");
    }

    #[test]
    fn shell_unescape_double_backslash_before_hash() {
        // The first backslash is kept; the second one escapes the hash.
        assert_eq!(shell_unescape(r"\\#"), r"\#");
    }

    #[test]
    fn shell_unescape_url_fragment() {
        assert_eq!(
            shell_unescape(r"http://host/data.nc\#mode=dap4"),
            "http://host/data.nc#mode=dap4"
        );
    }
}
