//! Normalization.
//!
//! Normalization makes equivalent URIs textually equal. The steps are:
//!
//! 1. Lowercase the scheme, and correct the `ssh+svn` alias to `svn+ssh`.
//! 2. Unwrap `feed:http:...` into the embedded `http:` URI and normalize it.
//! 3. Trim the userinfo, the query, and the fragment.
//! 4. Decode what is safe to decode in the host, lowercase and trim it, and
//!    convert it to the ASCII-compatible form through the [IDNA
//!    service][`crate::idna`]. Conversion failures keep the host as is.
//! 5. Drop the port if it is zero or the default port of the scheme, and
//!    strip its leading zeros otherwise.
//! 6. Normalize percent-encodings in the path, then remove dot segments.
//! 7. Normalize percent-encodings in the other components, each with its own
//!    character class.
//! 8. Re-parse the result.
//!
//! # Examples
//!
//! ```
//! use generic_uri::Uri;
//!
//! let uri = Uri::parse("HTTP://User@Example.COM:80/a/./b/../%7Ec?x=%41&y=%26#%66rag")?;
//! assert_eq!(uri.normalize()?.to_string(), "http://User@example.com/a/~c?x=A&y=%26#frag");
//! # Ok::<_, generic_uri::validate::Error>(())
//! ```

mod host;
mod remove_dot_segments;

use alloc::string::{String, ToString};

use crate::components::Components;
use crate::idna::{self, IdnaService};
use crate::log::trace;
use crate::percent_encoding::{normalize_component, CharClass};
use crate::scheme;
use crate::uri::Uri;
use crate::validate::Error;

pub use self::remove_dot_segments::normalize_path;

/// Nothing is left encoded beyond what the component class requires.
const LEAVE_NONE: CharClass = CharClass::gen(b"");
/// Delimiters left encoded in paths.
const LEAVE_IN_PATH: CharClass = CharClass::gen(b"/");
/// Delimiters left encoded in queries.
const LEAVE_IN_QUERY: CharClass = CharClass::gen(b"&=+;");

/// Trims ASCII whitespace.
#[inline]
#[must_use]
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Returns the embedded `http:` URI of a `feed:` URI, if any.
#[must_use]
fn unwrap_feed(uri: &Uri) -> Option<String> {
    let scheme_len = uri.scheme()?.len();
    let s = uri.to_string();
    let embedded = s.get((scheme_len + 1)..)?.trim_start_matches('/');
    if embedded.starts_with("http:") {
        Some(embedded.into())
    } else {
        None
    }
}

/// Normalizes the path.
///
/// `scheme` is the normalized scheme.
#[must_use]
fn path(uri: &Uri, scheme: Option<&str>, has_host: bool) -> Option<String> {
    let path = match uri.path() {
        None if scheme.is_some() && has_host => return Some("/".into()),
        None => return None,
        Some(path) => path,
    };

    let mut path = normalize_path(&normalize_component(path, &CharClass::PATH, &LEAVE_IN_PATH));
    if path.is_empty() && scheme.map_or(false, scheme::has_root_path) {
        path.push('/');
    }

    if !has_host {
        if path.starts_with("//") {
            // Re-parsing would take the first segment as an authority.
            path.insert_str(0, "/.");
        } else if scheme.is_none() {
            // Re-parsing would take the first segment as a scheme.
            let first_end = path.find('/').unwrap_or(path.len());
            if path[..first_end].contains(':') {
                let first = path[..first_end].replace(':', "%3A");
                path.replace_range(..first_end, &first);
            }
        }
    }
    Some(path)
}

impl Uri {
    /// Returns the normalized URI, using the process-wide IDNA service.
    ///
    /// # Failures
    ///
    /// Fails only if the normalized components do not form a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com:80")?;
    /// let normalized = uri.normalize()?;
    /// assert_eq!(normalized.port(), None);
    /// assert_eq!(normalized.to_string(), "http://example.com/");
    ///
    /// let uri = Uri::parse("http://example.com:8080")?;
    /// assert_eq!(uri.normalize()?.port(), Some("8080"));
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    pub fn normalize(&self) -> Result<Self, Error> {
        self.normalize_with(idna::service())
    }

    /// Returns the normalized URI, using the given IDNA service.
    pub fn normalize_with(&self, idna: &dyn IdnaService) -> Result<Self, Error> {
        let scheme = self.scheme().map(scheme::canonicalize);
        if scheme.as_deref() == Some("feed") {
            if let Some(embedded) = unwrap_feed(self) {
                trace!("normalizing the embedded URI {embedded:?} of a feed URI");
                return Self::parse(&embedded)?.normalize_with(idna);
            }
        }

        let host = self.host().map(|h| host::normalize(h, idna));
        let default_port = scheme.as_deref().and_then(scheme::default_port);
        let port = match (self.port(), self.port_number()) {
            (_, Some(0)) => None,
            (_, Some(port)) if Some(port) == default_port => None,
            (port, _) => port.map(|port| port.trim_start_matches('0')),
        };
        let path = path(self, scheme.as_deref(), host.is_some());
        let user = self
            .user()
            .map(|s| normalize_component(trim(s), &CharClass::USER, &LEAVE_NONE));
        let password = self
            .password()
            .map(|s| normalize_component(trim(s), &CharClass::PASSWORD, &LEAVE_NONE));
        let query = self
            .query()
            .map(|s| normalize_component(trim(s), &CharClass::QUERY, &LEAVE_IN_QUERY));
        let fragment = self
            .fragment()
            .map(|s| normalize_component(trim(s), &CharClass::FRAGMENT, &LEAVE_NONE));

        let assembled = Self::from_components(Components {
            scheme: scheme.as_deref(),
            user: user.as_deref(),
            password: password.as_deref(),
            host: host.as_deref(),
            port,
            path: path.as_deref(),
            query: query.as_deref(),
            fragment: fragment.as_deref(),
        })?;
        Self::parse(&assembled.to_string())
    }

    /// Normalizes the URI in place.
    ///
    /// On failure, `self` is left unchanged.
    pub fn normalize_mut(&mut self) -> Result<(), Error> {
        let normalized = self.normalize()?;
        self.replace(normalized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::idna::{Error as IdnaError, ErrorKind as IdnaErrorKind, Unavailable};

    /// Converts `b\u{FC}cher` only.
    struct Fake;

    impl IdnaService for Fake {
        fn to_ascii(&self, host: &str) -> Result<String, IdnaError> {
            match host {
                "b\u{FC}cher.example" => Ok("xn--bcher-kva.example".into()),
                _ if host.is_ascii() => Ok(host.into()),
                _ => Err(IdnaError::new(IdnaErrorKind::Failed)),
            }
        }

        fn to_unicode(&self, host: &str) -> Result<String, IdnaError> {
            match host {
                "xn--bcher-kva.example" => Ok("b\u{FC}cher.example".into()),
                _ => Ok(host.into()),
            }
        }
    }

    fn normalized(s: &str) -> String {
        Uri::parse(s)
            .and_then(|uri| uri.normalize_with(&Fake))
            .expect("test case should be normalizable")
            .to_string()
    }

    #[test]
    fn scheme_alias() {
        assert_eq!(normalized("SSH+SVN://h/repo"), "svn+ssh://h/repo");
        assert_eq!(normalized("svn+ssh://h:22/repo"), "svn+ssh://h/repo");
    }

    #[test]
    fn feed_is_unwrapped() {
        assert_eq!(
            normalized("feed://http://Example.com:80/entries"),
            "http://example.com/entries"
        );
        assert_eq!(normalized("feed:http:example.com"), "http:example.com");
        assert_eq!(normalized("feed://example.com/x"), "feed://example.com/x");
    }

    #[test]
    fn idna_host() {
        assert_eq!(normalized("http://B\u{DC}CHER.example/"), "http://xn--bcher-kva.example/");
        assert_eq!(
            normalized("http://b%C3%BCcher.example/"),
            "http://xn--bcher-kva.example/"
        );
    }

    #[test]
    fn idna_failure_keeps_host() {
        let uri = Uri::parse("http://\u{FC}ber.example/").expect("valid URI");
        assert_eq!(
            uri.normalize_with(&Unavailable).expect("normalizable").host(),
            Some("\u{FC}ber.example")
        );
        assert_eq!(
            uri.normalize_with(&Fake).expect("normalizable").host(),
            Some("\u{FC}ber.example")
        );
    }

    #[test]
    fn default_port() {
        assert_eq!(normalized("http://h:80/"), "http://h/");
        assert_eq!(normalized("https://h:80/"), "https://h:80/");
        assert_eq!(normalized("http://h:0/"), "http://h/");
        assert_eq!(normalized("http://h:/"), "http://h/");
        assert_eq!(normalized("http://h:0080/"), "http://h/");
        assert_eq!(normalized("http://h:000/"), "http://h/");
        assert_eq!(normalized("http://h:08080/"), "http://h:8080/");
        assert_eq!(normalized("http://h:99999/"), "http://h:99999/");
    }

    #[test]
    fn root_path() {
        assert_eq!(normalized("http://h"), "http://h/");
        assert_eq!(normalized("ftp://h"), "ftp://h/");
        assert_eq!(normalized("foo://h"), "foo://h");
        assert_eq!(normalized("http://h/a/.."), "http://h/");
    }

    #[test]
    fn components_are_trimmed() {
        let mut uri = Uri::parse("http://h/").expect("valid URI");
        uri.set_query(Some(" q ")).expect("valid query");
        uri.set_fragment(Some("\tf\n")).expect("valid fragment");
        uri.set_user(Some(" u ")).expect("valid user");
        let uri = uri.normalize_with(&Fake).expect("normalizable");
        assert_eq!(uri.to_string(), "http://u@h/?q#f");
    }

    #[test]
    fn percent_encoding() {
        assert_eq!(normalized("http://h/%7e%41/a%2fb"), "http://h/~A/a%2Fb");
        assert_eq!(normalized("http://h/?a%3db%26c=%2B&d%20"), "http://h/?a%3Db%26c=%2B&d%20");
        assert_eq!(normalized("http://h/?%61"), "http://h/?a");
        assert_eq!(normalized("http://h/#a%23b%7E"), "http://h/#a%23b~");
        assert_eq!(normalized("http://h/a b"), "http://h/a%20b");
    }

    #[test]
    fn encoded_dots_are_removed() {
        assert_eq!(normalized("http://h/a/%2E%2E/b"), "http://h/b");
        assert_eq!(normalized("http://h/a/%2e/b"), "http://h/a/b");
    }

    #[test]
    fn userinfo_delimiters_stay_encoded() {
        let mut uri = Uri::parse("http://h/").expect("valid URI");
        uri.set_user(Some("a@b:c")).expect("valid user");
        uri.set_password(Some("p@ss:w")).expect("valid password");
        assert_eq!(
            uri.normalize_with(&Fake).expect("normalizable").to_string(),
            "http://a%40b%3Ac:p%40ss:w@h/"
        );
    }

    #[test]
    fn relative_references() {
        assert_eq!(normalized("a:b/c"), "a:b/c");
        let uri = Uri::from_components(Components {
            path: Some("a:b/c"),
            ..Components::default()
        })
        .expect("valid components");
        assert_eq!(uri.normalize_with(&Fake).expect("normalizable").to_string(), "a%3Ab/c");
        assert_eq!(normalized("./a:b"), "a%3Ab");
        assert_eq!(normalized("../a/./b"), "a/b");
    }

    #[test]
    fn ambiguous_double_slash() {
        assert_eq!(normalized("scheme:/a/..//b"), "scheme:/.//b");
        assert_eq!(normalized("scheme:/.//b"), "scheme:/.//b");
    }

    #[test]
    fn idempotence() {
        for s in [
            "HTTP://Example.COM:80/a/./b/../%7Ec?x=%41&y=%26#%66rag",
            "feed://http://example.com/",
            "scheme:/a/..//b",
            "mailto:User@Example.COM",
            "//h/%2e%2E/x",
            "http://[::1]:8080",
            "http://example.com./",
        ] {
            let once = normalized(s);
            assert_eq!(normalized(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn normalize_mut_replaces() {
        let mut uri = Uri::parse("HTTP://H:80").expect("valid URI");
        uri.normalize_mut().expect("normalizable");
        assert_eq!(uri.to_string(), "http://h/");
    }
}
