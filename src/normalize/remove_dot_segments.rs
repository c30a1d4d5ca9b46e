//! Dot segment removal.
//!
//! Equivalent to the `remove_dot_segments` algorithm of [RFC 3986 5.2.4],
//! expressed as rewrite rules applied until none of them matches.
//!
//! Segments spelled with percent-encoded dots (`%2E`, `%2e`, `.%2E`, ...)
//! are dot segments too, since they normalize to `.` and `..`.
//!
//! For paths not starting with `/` the result differs from the RFC
//! algorithm: a leading segment popped by `..` leaves nothing behind. So
//! `a/..` becomes the empty path (the RFC gives `/`), and `a/./b/../../c`
//! becomes `c` (the RFC gives `/c`). Such paths only appear in relative
//! references, where a leading `/` would make them absolute.
//!
//! [RFC 3986 5.2.4]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4

use alloc::string::String;

/// Returns `true` if the segment is `.` or `..`.
#[inline]
#[must_use]
fn is_dot_segment(seg: &str) -> bool {
    seg == "." || seg == ".."
}

/// Returns `.` or `..` if the segment is one of them, possibly with its
/// dots percent-encoded.
#[must_use]
fn decoded_dot_segment(seg: &str) -> Option<&'static str> {
    let mut rest = seg.as_bytes();
    let mut dots = 0;
    while !rest.is_empty() {
        if rest[0] == b'.' {
            rest = &rest[1..];
        } else if rest.len() >= 3 && rest[..3].eq_ignore_ascii_case(b"%2e") {
            rest = &rest[3..];
        } else {
            return None;
        }
        dots += 1;
    }
    match dots {
        1 => Some("."),
        2 => Some(".."),
        _ => None,
    }
}

/// Decodes the percent-encoded dots of dot segments.
#[must_use]
fn decode_dot_segments(path: &str) -> String {
    let mut decoded = String::with_capacity(path.len());
    for (i, seg) in path.split('/').enumerate() {
        if i != 0 {
            decoded.push('/');
        }
        decoded.push_str(decoded_dot_segment(seg).unwrap_or(seg));
    }
    decoded
}

/// Returns the start position of the segment ending at `end`, and the
/// position of the slash preceding it if any.
#[must_use]
fn segment_before(path: &str, end: usize) -> (Option<usize>, &str) {
    match path[..end].rfind('/') {
        Some(slash) => (Some(slash), &path[(slash + 1)..end]),
        None => (None, &path[..end]),
    }
}

/// Concatenates the two parts.
#[inline]
#[must_use]
fn concat(head: &str, tail: &str) -> String {
    let mut buf = String::with_capacity(head.len() + tail.len());
    buf.push_str(head);
    buf.push_str(tail);
    buf
}

/// Pops the parent segment of the `/..` at `pos`, if that parent is a
/// normal segment.
///
/// `pos` is the position of the slash before `..`, and `tail` is what is
/// left after the `..` (with its slash, if any).
#[must_use]
fn pop_parent(path: &str, pos: usize, tail: &str) -> Option<String> {
    if pos == 0 {
        return None;
    }
    match segment_before(path, pos) {
        (_, seg) if is_dot_segment(seg) => None,
        // `seg/..` at the start: nothing is left of the segment.
        (None, _) => Some(String::from(tail.strip_prefix('/').unwrap_or(tail))),
        (Some(slash), _) => Some(concat(&path[..slash], if tail.is_empty() { "/" } else { tail })),
    }
}

/// Applies the first matching rewrite rule, and returns `None` if nothing matches.
#[must_use]
fn rewrite_once(path: &str) -> Option<String> {
    // `/./` => `/`.
    if let Some(pos) = path.find("/./") {
        return Some(concat(&path[..pos], &path[(pos + 2)..]));
    }
    // Trailing `/.` => `/`.
    if let Some(head) = path.strip_suffix("/.") {
        return Some(concat(head, "/"));
    }
    // `/seg/../` => `/`.
    for (pos, _) in path.match_indices("/../") {
        if let Some(rewritten) = pop_parent(path, pos, &path[(pos + 3)..]) {
            return Some(rewritten);
        }
    }
    // Trailing `/seg/..` => `/`.
    if path.ends_with("/..") {
        if let Some(rewritten) = pop_parent(path, path.len() - 3, "") {
            return Some(rewritten);
        }
    }
    // Leading `./` and `../` are dropped, as is a bare `.` or `..`.
    if let Some(rest) = path.strip_prefix("./").or_else(|| path.strip_prefix("../")) {
        return Some(rest.into());
    }
    if is_dot_segment(path) {
        return Some(String::new());
    }
    // No parent above the root.
    if let Some(rest) = path.strip_prefix("/../") {
        return Some(concat("/", rest));
    }
    if path == "/.." {
        return Some("/".into());
    }
    None
}

/// Removes dot segments from the path.
///
/// # Examples
///
/// ```
/// use generic_uri::normalize::normalize_path;
///
/// assert_eq!(normalize_path("/a/b/../c"), "/a/c");
/// assert_eq!(normalize_path("/a/b/./c"), "/a/b/c");
/// assert_eq!(normalize_path("/a/../../b"), "/b");
/// assert_eq!(normalize_path("a/./b/../../c"), "c");
/// assert_eq!(normalize_path("/a/b/%2E%2e/c"), "/a/c");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut current = if path.contains('%') {
        decode_dot_segments(path)
    } else {
        path.into()
    };
    while let Some(next) = rewrite_once(&current) {
        current = next;
    }
    current
}
