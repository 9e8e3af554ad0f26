// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::{Error, Result, try_string};

/// Splits `input` on `delimiter` into an ordered list of non-empty segments.
///
/// A single leading delimiter marks an absolute path and is skipped. A single
/// trailing delimiter ends the last segment without starting a new one.
///
/// # Examples
///
/// ```
/// use pathtag::split;
///
/// assert_eq!(split("/a/b/c", '/').unwrap(), ["a", "b", "c"]);
/// assert_eq!(split("dap4,bytes", ',').unwrap(), ["dap4", "bytes"]);
/// assert!(split("", ',').unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedInput`](crate::ErrorKind::MalformedInput) if two
/// delimiters are adjacent, and [`ErrorKind::OutOfMemory`](crate::ErrorKind::OutOfMemory)
/// if the segments cannot be allocated. No segments are returned on failure.
pub fn split(input: &str, delimiter: char) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    let mut rest = input.strip_prefix(delimiter).unwrap_or(input);

    while !rest.is_empty() {
        let (segment, tail) = match rest.find(delimiter) {
            Some(at) => (&rest[..at], &rest[at + delimiter.len_utf8()..]),
            None => (rest, ""),
        };

        if segment.is_empty() {
            let offset = input.len() - rest.len();
            return Err(Error::malformed(format!("empty segment at byte {offset} of {input:?}")));
        }

        let mut owned = try_string(segment.len())?;
        owned.push_str(segment);
        segments.try_reserve(1)?;
        segments.push(owned);

        rest = tail;
    }

    Ok(segments)
}

/// Joins `segments` into a canonical absolute path.
///
/// Every segment is preceded by exactly one `/`; a segment that already starts with
/// `/` is taken as is. An empty list yields the root path `/`. Segment content is
/// not validated.
///
/// # Examples
///
/// ```
/// use pathtag::join;
///
/// assert_eq!(join(&["a", "b"]).unwrap(), "/a/b");
/// assert_eq!(join(&["/a"]).unwrap(), "/a");
/// assert_eq!(join::<&str>(&[]).unwrap(), "/");
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::OutOfMemory`](crate::ErrorKind::OutOfMemory) if the path
/// cannot be allocated.
pub fn join<S: AsRef<str>>(segments: &[S]) -> Result<String> {
    if segments.is_empty() {
        let mut root = try_string(1)?;
        root.push('/');
        return Ok(root);
    }

    let capacity = segments.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut path = try_string(capacity)?;
    for segment in segments {
        let segment = segment.as_ref();
        if !segment.starts_with('/') {
            path.push('/');
        }
        path.push_str(segment);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn split_empty_input() {
        assert!(split("", ',').unwrap().is_empty());
    }

    #[test]
    fn split_lone_delimiter() {
        assert!(split("/", '/').unwrap().is_empty());
    }

    #[test]
    fn split_skips_one_leading_delimiter() {
        assert_eq!(split("/a/b", '/').unwrap(), ["a", "b"]);
        assert_eq!(split("a/b", '/').unwrap(), ["a", "b"]);
    }

    #[test]
    fn split_tolerates_one_trailing_delimiter() {
        assert_eq!(split("a,b,", ',').unwrap(), ["a", "b"]);
    }

    #[test]
    fn split_keeps_duplicates_in_order() {
        assert_eq!(split("x,y,x", ',').unwrap(), ["x", "y", "x"]);
    }

    #[test]
    fn split_single_segment() {
        assert_eq!(split("dap4", ',').unwrap(), ["dap4"]);
    }

    #[test]
    fn split_rejects_adjacent_delimiters() {
        let err = split("a,,b", ',').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn split_rejects_doubled_leading_delimiter() {
        assert_eq!(split("//a", '/').unwrap_err().kind(), ErrorKind::MalformedInput);
        assert_eq!(split(",,", ',').unwrap_err().kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn split_rejects_doubled_trailing_delimiter() {
        assert_eq!(split("a,,", ',').unwrap_err().kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn split_multibyte_delimiter() {
        assert_eq!(split("a→b→c", '→').unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn split_multibyte_segments() {
        assert_eq!(split("/ünï/cødé", '/').unwrap(), ["ünï", "cødé"]);
    }

    #[test]
    fn join_empty_is_root() {
        assert_eq!(join::<String>(&[]).unwrap(), "/");
    }

    #[test]
    fn join_prefixes_each_segment() {
        assert_eq!(join(&["a", "b"]).unwrap(), "/a/b");
    }

    #[test]
    fn join_does_not_double_separator() {
        assert_eq!(join(&["/a"]).unwrap(), "/a");
        assert_eq!(join(&["/a", "b", "/c"]).unwrap(), "/a/b/c");
    }

    #[test]
    fn join_does_not_validate_content() {
        assert_eq!(join(&["a b", "c?d"]).unwrap(), "/a b/c?d");
        assert_eq!(join(&[""]).unwrap(), "/");
    }

    #[test]
    fn join_accepts_owned_segments() {
        let segments = split("/x/y/z", '/').unwrap();
        assert_eq!(join(&segments).unwrap(), "/x/y/z");
    }
}
