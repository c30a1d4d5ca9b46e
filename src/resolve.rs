//! Reference resolution.
//!
//! Resolution follows [RFC 3986 section 5.2], with the dot segments of the
//! resulting path removed by [`normalize_path`].
//!
//! [RFC 3986 section 5.2]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2
//!
//! # Paths starting with `//`
//!
//! A URI without authority cannot have a path starting with `//`, since it
//! would be read as an authority. For example, `..//bar` against
//! `scheme:foo/baz` would result in the path `//bar`. Such a path is written
//! with a `/.` prefix (`scheme:/.//bar`), as the WHATWG URL Standard
//! serializes it. This keeps resolution infallible for valid inputs.
//!
//! # Examples
//!
//! ```
//! use generic_uri::Uri;
//!
//! let base = Uri::parse("http://a/b/c/d;p?q")?;
//! assert_eq!(base.resolve("../g")?.to_string(), "http://a/b/g");
//! assert_eq!(base.resolve("g?y#s")?.to_string(), "http://a/b/c/g?y#s");
//! assert_eq!((&base + "//g")?.to_string(), "http://g");
//! # Ok::<_, generic_uri::validate::Error>(())
//! ```


use core::ops::Add;

use alloc::string::String;

use crate::components::Components;
use crate::convert::UriInput;
use crate::normalize::normalize_path;
use crate::uri::Uri;
use crate::validate::Error;

/// Returns the path without its last segment, keeping the trailing slash.
#[must_use]
fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(slash) => &path[..=slash],
        None => "",
    }
}

/// Merges the relative reference path to the base path.
///
/// See [RFC 3986 section 5.2.3](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.3).
#[must_use]
fn merge_paths(base: &Uri, reference: &str) -> String {
    let dir = match base.path() {
        None | Some("") if base.host().is_some() => "/",
        None => "",
        Some(path) => dirname(path),
    };
    let mut merged = String::with_capacity(dir.len() + reference.len());
    merged.push_str(dir);
    merged.push_str(reference);
    merged
}

/// Resolves the reference against the base.
///
/// The fragment of the result is always the fragment of the reference.
///
/// # Failures
///
/// Fails if the resulting components do not form a valid URI. This does not
/// happen when the base has a scheme and either a host or a non-empty path.
pub fn resolve(base: &Uri, reference: &Uri) -> Result<Uri, Error> {
    let r = reference.to_components();
    let b = base.to_components();

    let normalized_ref_path = r.path.map(normalize_path);
    let merged_path: Option<String>;
    let target = if r.scheme.is_some() {
        Components {
            path: normalized_ref_path.as_deref(),
            ..r
        }
    } else if r.has_authority() {
        Components {
            scheme: b.scheme,
            path: normalized_ref_path.as_deref(),
            ..r
        }
    } else {
        let (path, query) = match r.path {
            None | Some("") => (b.path, r.query.or(b.query)),
            Some(path) if path.starts_with('/') => (normalized_ref_path.as_deref(), r.query),
            Some(path) => {
                merged_path = Some(normalize_path(&merge_paths(base, path)));
                (merged_path.as_deref(), r.query)
            }
        };
        Components {
            path,
            query,
            fragment: r.fragment,
            ..b
        }
    };

    let prefixed: String;
    let target = match target.path {
        Some(path) if target.host.is_none() && path.starts_with("//") => {
            prefixed = alloc::format!("/.{path}");
            Components {
                path: Some(&prefixed),
                ..target
            }
        }
        _ => target,
    };
    Uri::from_components(target)
}

impl Uri {
    /// Resolves the reference against `self`.
    ///
    /// String references are parsed first.
    pub fn resolve<'a, R: Into<UriInput<'a>>>(&self, reference: R) -> Result<Self, Error> {
        let reference = reference.into().to_uri()?;
        resolve(self, &reference)
    }

    /// Resolves the reference against `self`, and replaces `self` with the result.
    ///
    /// On failure, `self` is left unchanged.
    pub fn merge_mut<'a, R: Into<UriInput<'a>>>(&mut self, reference: R) -> Result<(), Error> {
        let resolved = self.resolve(reference)?;
        self.replace(resolved);
        Ok(())
    }

    /// Resolves the references one after another, each against the previous result.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/a/b")?;
    /// let joined = base.join(["c/", "d?x", "#f"])?;
    /// assert_eq!(joined.to_string(), "http://example.com/a/c/d?x#f");
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    pub fn join<'a, I>(&self, references: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<UriInput<'a>>,
    {
        references
            .into_iter()
            .try_fold(self.clone(), |base, reference| base.resolve(reference))
    }
}

impl Add<&Uri> for &Uri {
    type Output = Result<Uri, Error>;

    #[inline]
    fn add(self, reference: &Uri) -> Self::Output {
        resolve(self, reference)
    }
}

impl Add<&str> for &Uri {
    type Output = Result<Uri, Error>;

    #[inline]
    fn add(self, reference: &str) -> Self::Output {
        self.resolve(reference)
    }
}
