//! Relative reference computation.
//!
//! [`Uri::route_from`] is the left inverse of resolution: for absolute
//! `base` and `target`, resolving `target.route_from(&base)` against the
//! normalized `base` results in the normalized `target`.
//!
//! # Examples
//!
//! ```
//! use generic_uri::Uri;
//!
//! let base = Uri::parse("http://example.com/a/b/c")?;
//! let target = Uri::parse("http://example.com/a/d/e?q")?;
//! let relative = target.route_from(&base)?;
//! assert_eq!(relative.to_string(), "../d/e?q");
//! assert_eq!(base.resolve(&relative)?.to_string(), "http://example.com/a/d/e?q");
//! # Ok::<_, generic_uri::relative::RouteError>(())
//! ```

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use crate::components::Components;
use crate::convert::UriInput;
use crate::log::trace;
use crate::uri::Uri;
use crate::validate::Error as ValidationError;

/// Error of relative reference computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteError {
    /// Error kind.
    kind: RouteErrorKind,
    /// Validation error, if the kind is [`RouteErrorKind::InvalidUri`].
    source: Option<ValidationError>,
}

impl RouteError {
    /// Creates a new error of the kind.
    #[inline]
    #[must_use]
    fn new(kind: RouteErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> RouteErrorKind {
        self.kind
    }

    /// Returns the validation error, if the error is caused by an invalid URI.
    #[inline]
    #[must_use]
    pub fn validation_error(&self) -> Option<ValidationError> {
        self.source
    }
}

impl From<ValidationError> for RouteError {
    #[inline]
    fn from(e: ValidationError) -> Self {
        Self {
            kind: RouteErrorKind::InvalidUri,
            source: Some(e),
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RouteErrorKind::RelativeBase => f.write_str("expected an absolute base URI"),
            RouteErrorKind::RelativeTarget => f.write_str("expected an absolute target URI"),
            RouteErrorKind::InvalidUri => match &self.source {
                Some(e) => e.fmt(f),
                None => f.write_str("Invalid URI"),
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Reason of a relative reference computation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteErrorKind {
    /// The base has no scheme after normalization.
    RelativeBase,
    /// The target has no scheme after normalization.
    RelativeTarget,
    /// An operand could not be parsed or normalized.
    InvalidUri,
}

/// Computes the path reference from the base path to the target path.
///
/// Both paths must be free of dot segments. Returns `None` if no relative
/// path resolves to the target.
#[must_use]
fn relative_path(base: &str, target: &str, base_has_host: bool) -> Option<String> {
    let target_rooted = target.starts_with('/');
    let base_rooted = base.starts_with('/') || (base.is_empty() && base_has_host);
    let absolute = (target_rooted && !target.starts_with("//")).then_some(target);

    if !target_rooted && base_rooted {
        // Merging with a rooted base always results in a rooted path.
        return None;
    }
    if target_rooted && !base_rooted {
        return absolute.map(Into::into);
    }

    let base_dir: Vec<&str> = match base.rfind('/') {
        Some(slash) => base[..slash].split('/').skip(usize::from(base_rooted)).collect(),
        None => Vec::new(),
    };
    let target_segs: Vec<&str> = target.split('/').skip(usize::from(target_rooted)).collect();
    let (target_dirs, _) = target_segs.split_at(target_segs.len() - 1);
    let common = base_dir
        .iter()
        .zip(target_dirs)
        .take_while(|(b, t)| b == t)
        .count();

    let mut rel = String::new();
    for _ in common..base_dir.len() {
        rel.push_str("../");
    }
    rel.push_str(&target_segs[common..].join("/"));

    let first_end = rel.find('/').unwrap_or(rel.len());
    if rel.is_empty() || rel.starts_with('/') || rel[..first_end].contains(':') {
        // An empty path would not change the base path, a leading slash
        // would be an absolute path, and a colon would be a scheme.
        rel.insert_str(0, "./");
    }

    match absolute {
        Some(absolute) if absolute.len() < rel.len() => Some(absolute.into()),
        _ => Some(rel),
    }
}

/// Returns `true` if the authorities of the two URIs are the same.
#[must_use]
fn same_authority(a: &Uri, b: &Uri) -> bool {
    a.user() == b.user()
        && a.password() == b.password()
        && a.host() == b.host()
        && a.port() == b.port()
}

impl Uri {
    /// Computes the shortest reference which resolves to `self` against `base`.
    ///
    /// Both operands are normalized first.
    ///
    /// # Failures
    ///
    /// Fails if either operand is relative after normalization.
    pub fn route_from<'a, B: Into<UriInput<'a>>>(&self, base: B) -> Result<Self, RouteError> {
        let base = base.into().to_uri()?.normalize()?;
        let target = self.normalize()?;
        if base.scheme().is_none() {
            return Err(RouteError::new(RouteErrorKind::RelativeBase));
        }
        if target.scheme().is_none() {
            return Err(RouteError::new(RouteErrorKind::RelativeTarget));
        }

        let full = || {
            trace!("no relative reference from {base} to {target}");
            target.clone()
        };
        if target.scheme() != base.scheme() || !same_authority(&target, &base) {
            return Ok(full());
        }

        let target_path = target.path().unwrap_or("");
        let base_path = base.path().unwrap_or("");
        let (path, query) = if target_path == base_path {
            match (target.query(), base.query()) {
                (Some(t), b) if Some(t) != b => (String::new(), Some(t)),
                // The empty path would inherit the query of the base.
                (None, Some(_)) => return Ok(full()),
                _ => (String::new(), None),
            }
        } else if target_path.is_empty() {
            // The empty path would inherit the path of the base.
            return Ok(full());
        } else {
            match relative_path(base_path, target_path, base.host().is_some()) {
                Some(path) => (path, target.query()),
                None => return Ok(full()),
            }
        };

        Ok(Self::from_components(Components {
            path: Some(&path),
            query,
            fragment: target.fragment(),
            ..Components::default()
        })?)
    }

    /// Computes the shortest reference from `self` to `target`.
    ///
    /// This is `target.route_from(self)`.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/a/b")?;
    /// assert_eq!(base.route_to("http://example.com/a/c#x")?.to_string(), "c#x");
    /// assert_eq!(base.route_to("https://example.com/a/c")?.to_string(), "https://example.com/a/c");
    /// # Ok::<_, generic_uri::relative::RouteError>(())
    /// ```
    pub fn route_to<'a, T: Into<UriInput<'a>>>(&self, target: T) -> Result<Self, RouteError> {
        target.into().to_uri()?.route_from(self)
    }
}
