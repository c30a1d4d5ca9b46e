//! Functions for common string operations.
//!
//! Delimiter scanning uses `memchr` when the feature is enabled.

/// Returns the position of the first byte equal to `needle`.
#[inline]
#[must_use]
pub(crate) fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    #[cfg(feature = "memchr")]
    {
        memchr::memchr(needle, haystack)
    }
    #[cfg(not(feature = "memchr"))]
    {
        haystack.iter().position(|&b| b == needle)
    }
}

/// Returns the position of the last byte equal to `needle`.
#[inline]
#[must_use]
pub(crate) fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    #[cfg(feature = "memchr")]
    {
        memchr::memrchr(needle, haystack)
    }
    #[cfg(not(feature = "memchr"))]
    {
        haystack.iter().rposition(|&b| b == needle)
    }
}

/// Returns the position of the first byte equal to any of the needles.
#[inline]
#[must_use]
pub(crate) fn find3(haystack: &[u8], n1: u8, n2: u8, n3: u8) -> Option<usize> {
    #[cfg(feature = "memchr")]
    {
        memchr::memchr3(n1, n2, n3, haystack)
    }
    #[cfg(not(feature = "memchr"))]
    {
        haystack.iter().position(|&b| b == n1 || b == n2 || b == n3)
    }
}

/// Splits the string at the first occurrence of the byte, removing the byte.
///
/// Returns `None` if the byte is not found.
#[inline]
#[must_use]
pub(crate) fn find_split_hole(s: &str, needle: u8) -> Option<(&str, &str)> {
    find(s.as_bytes(), needle).map(|pos| (&s[..pos], &s[(pos + 1)..]))
}

/// Splits the string at the first occurrence of any of the bytes.
///
/// The delimiter is kept at the head of the second string.
#[inline]
#[must_use]
pub(crate) fn find_split3(s: &str, n1: u8, n2: u8, n3: u8) -> Option<(&str, &str)> {
    find3(s.as_bytes(), n1, n2, n3).map(|pos| s.split_at(pos))
}

/// Splits the string at the first `:`, `/`, `?`, or `#`.
///
/// Returns the string before the delimiter, the delimiter, and the rest after
/// the delimiter.
#[must_use]
pub(crate) fn find_split4_hole(s: &str) -> Option<(&str, u8, &str)> {
    let pos = s
        .bytes()
        .position(|b| matches!(b, b':' | b'/' | b'?' | b'#'))?;
    Some((&s[..pos], s.as_bytes()[pos], &s[(pos + 1)..]))
}

/// Returns `true` if the string starts with a percent-encoded triplet.
#[inline]
#[must_use]
pub(crate) fn starts_with_pct_triplet(s: &[u8]) -> bool {
    matches!(s, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_hole() {
        assert_eq!(find_split_hole("user:pass", b':'), Some(("user", "pass")));
        assert_eq!(find_split_hole("user", b':'), None);
        assert_eq!(find_split_hole(":", b':'), Some(("", "")));
    }

    #[test]
    fn split3_keeps_delimiter() {
        assert_eq!(
            find_split3("host/path?q", b'/', b'?', b'#'),
            Some(("host", "/path?q"))
        );
        assert_eq!(find_split3("host", b'/', b'?', b'#'), None);
    }

    #[test]
    fn split4_stops_at_first_delimiter() {
        assert_eq!(find_split4_hole("http://x"), Some(("http", b':', "//x")));
        assert_eq!(find_split4_hole("a/b:c"), Some(("a", b'/', "b:c")));
        assert_eq!(find_split4_hole("abc"), None);
    }

    #[test]
    fn reverse_find() {
        assert_eq!(rfind(b"/a/b/c", b'/'), Some(4));
        assert_eq!(rfind(b"abc", b'/'), None);
    }

    #[test]
    fn pct_triplet() {
        assert!(starts_with_pct_triplet(b"%2Fx"));
        assert!(starts_with_pct_triplet(b"%a0"));
        assert!(!starts_with_pct_triplet(b"%2"));
        assert!(!starts_with_pct_triplet(b"%zz"));
    }
}
