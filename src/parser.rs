//! Reference parser.
//!
//! Splits a URI reference into its components without validating them.
//! Components are delimited by fixed marker characters, so the string is
//! scanned once from the head, as in the regular expression of
//! [RFC 3986 appendix B](https://tools.ietf.org/html/rfc3986#appendix-B):
//!
//! ```text
//! ^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?
//! ```

pub(crate) mod char;
pub(crate) mod str;

use crate::components::Components;
use crate::log::trace;

use self::str::{find_split3, find_split4_hole, find_split_hole, rfind};

/// Decomposed authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AuthorityComponents<'a> {
    /// User.
    pub(crate) user: Option<&'a str>,
    /// Password.
    pub(crate) password: Option<&'a str>,
    /// Host.
    pub(crate) host: &'a str,
    /// Port. Empty port is treated as absent.
    pub(crate) port: Option<&'a str>,
}

/// Eats a `scheme` and a following colon if available, and returns the rest and the scheme.
#[must_use]
fn scheme_colon_opt(i: &str) -> (&str, Option<&str>) {
    match find_split4_hole(i) {
        Some((scheme, b':', rest)) if !scheme.is_empty() => (rest, Some(scheme)),
        _ => (i, None),
    }
}

/// Eats double slash and the following authority if available, and returns the authority.
#[must_use]
fn slash_slash_authority_opt(i: &str) -> (&str, Option<&str>) {
    let s = match i.strip_prefix("//") {
        Some(rest) => rest,
        None => return (i, None),
    };
    match find_split3(s, b'/', b'?', b'#') {
        Some((authority, rest)) => (rest, Some(authority)),
        None => ("", Some(s)),
    }
}

/// Eats a string until the query or the fragment, and returns that part.
#[must_use]
fn until_query(i: &str) -> (&str, &str) {
    match i.bytes().position(|b| b == b'?' || b == b'#') {
        Some(pos) => (&i[pos..], &i[..pos]),
        None => ("", i),
    }
}

/// Decomposes query and fragment, if available.
///
/// The string must start with `?`, or `#`, or be empty.
#[must_use]
fn decompose_query_and_fragment(i: &str) -> (Option<&str>, Option<&str>) {
    match i.as_bytes().first().copied() {
        None => (None, None),
        Some(b'?') => {
            let rest = &i[1..];
            match find_split_hole(rest, b'#') {
                Some((query, fragment)) => (Some(query), Some(fragment)),
                None => (Some(rest), None),
            }
        }
        Some(c) => {
            debug_assert_eq!(c, b'#');
            (None, Some(&i[1..]))
        }
    }
}

/// Splits the userinfo into the user and the password at the first colon.
#[must_use]
pub(crate) fn split_userinfo(userinfo: &str) -> (&str, Option<&str>) {
    match find_split_hole(userinfo, b':') {
        Some((user, password)) => (user, Some(password)),
        None => (userinfo, None),
    }
}

/// Decomposes the authority into userinfo, host, and port.
///
/// The userinfo ends at the last `@` before any bracket, and the port starts
/// after the last colon that is not followed by a bracket.
#[must_use]
pub(crate) fn decompose_authority(authority: &str) -> AuthorityComponents<'_> {
    let bracket = authority
        .bytes()
        .position(|b| b == b'[' || b == b']')
        .unwrap_or(authority.len());
    let (userinfo, host_port) = match rfind(&authority.as_bytes()[..bracket], b'@') {
        Some(at) => (Some(&authority[..at]), &authority[(at + 1)..]),
        None => (None, authority),
    };
    let (host, port) = match rfind(host_port.as_bytes(), b':') {
        Some(colon) if !host_port[colon..].contains(['[', ']']) => {
            (&host_port[..colon], Some(&host_port[(colon + 1)..]))
        }
        _ => (host_port, None),
    };
    let (user, password) = match userinfo.map(split_userinfo) {
        Some((user, password)) => (Some(user), password),
        None => (None, None),
    };
    AuthorityComponents {
        user,
        password,
        host,
        port: port.filter(|port| !port.is_empty()),
    }
}

/// Decomposes the URI reference into components.
///
/// This never fails; validation is done when a [`Uri`][`crate::Uri`] is built
/// from the components.
#[must_use]
pub(crate) fn decompose(i: &str) -> Components<'_> {
    let (rest, scheme) = scheme_colon_opt(i);
    let (after_authority, authority) = slash_slash_authority_opt(rest);
    let (query_and_fragment, path) = until_query(after_authority);
    let (query, fragment) = decompose_query_and_fragment(query_and_fragment);

    let authority = authority.map(decompose_authority);

    if scheme == Some("feed") && authority.map(|a| a.host) == Some("http") {
        // `feed://http://example.com/` is a misspelling of `feed:http://example.com/`.
        // The region after `//` is kept verbatim as an opaque path.
        let path_end = rest.len() - query_and_fragment.len();
        trace!("reinterpreting {i:?} as a feed URI with an opaque path");
        return Components {
            scheme,
            path: Some(&rest[2..path_end]),
            query,
            fragment,
            ..Components::default()
        };
    }

    let mut components = Components {
        scheme,
        path: Some(path),
        query,
        fragment,
        ..Components::default()
    };
    if let Some(authority) = authority {
        components.user = authority.user;
        components.password = authority.password;
        components.host = Some(authority.host);
        components.port = authority.port;
    }
    components
}
