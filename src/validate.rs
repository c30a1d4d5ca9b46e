//! Validation of URI components.

use core::fmt;

use crate::parser::char::{is_forbidden_in_host, is_scheme};

/// Invalid URI error.
///
/// Returned when the components of a URI violate its invariants, on
/// construction and on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
}

impl Error {
    /// Creates a new `Error`.
    ///
    /// For internal use.
    #[inline]
    #[must_use]
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::NoComponents => "all components are absent",
            ErrorKind::MissingHierarchicalPart => "absolute URI missing hierarchical segment",
            ErrorKind::InvalidPort => "port must be composed of decimal digits",
            ErrorKind::InvalidScheme => "invalid scheme format",
            ErrorKind::MissingHost => "userinfo or port is given without a host",
            ErrorKind::AmbiguousPath => "path starts with `//` without an authority",
            ErrorKind::InvalidHost => "invalid character in host",
        };
        write!(f, "Invalid URI: {msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Reason of an invalid URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// All eight components are absent.
    NoComponents,
    /// The scheme is present but both the host and the path are absent or empty.
    MissingHierarchicalPart,
    /// The port is not composed of decimal digits.
    InvalidPort,
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    InvalidScheme,
    /// User, password, or port is present without a host.
    MissingHost,
    /// The path starts with `//` but there is no authority.
    AmbiguousPath,
    /// The host contains a character that cannot appear in a host.
    InvalidHost,
}

/// Checks the port string.
///
/// An empty string is an absent port. The digits are kept as written, so
/// leading zeros and values above 65535 are allowed.
pub(crate) fn port(s: &str) -> Result<Option<&str>, Error> {
    if s.is_empty() {
        return Ok(None);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(ErrorKind::InvalidPort));
    }
    Ok(Some(s))
}

/// Borrowed view of the fields to be validated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    /// Scheme.
    pub(crate) scheme: Option<&'a str>,
    /// User.
    pub(crate) user: Option<&'a str>,
    /// Password.
    pub(crate) password: Option<&'a str>,
    /// Host.
    pub(crate) host: Option<&'a str>,
    /// Whether the port is present.
    pub(crate) has_port: bool,
    /// Path.
    pub(crate) path: Option<&'a str>,
    /// Query.
    pub(crate) query: Option<&'a str>,
    /// Fragment.
    pub(crate) fragment: Option<&'a str>,
}

/// Checks the invariants of a URI.
pub(crate) fn fields(f: &Fields<'_>) -> Result<(), Error> {
    let all_absent = f.scheme.is_none()
        && f.user.is_none()
        && f.password.is_none()
        && f.host.is_none()
        && !f.has_port
        && f.path.is_none()
        && f.query.is_none()
        && f.fragment.is_none();
    if all_absent {
        return Err(Error::new(ErrorKind::NoComponents));
    }

    if let Some(scheme) = f.scheme {
        if !is_scheme(scheme) {
            return Err(Error::new(ErrorKind::InvalidScheme));
        }
        let host_empty = f.host.map_or(true, str::is_empty);
        let path_empty = f.path.map_or(true, str::is_empty);
        if host_empty && path_empty {
            return Err(Error::new(ErrorKind::MissingHierarchicalPart));
        }
    }

    match f.host {
        None => {
            if f.user.is_some() || f.password.is_some() || f.has_port {
                return Err(Error::new(ErrorKind::MissingHost));
            }
            if f.path.map_or(false, |path| path.starts_with("//")) {
                return Err(Error::new(ErrorKind::AmbiguousPath));
            }
        }
        Some(host) => {
            if host.chars().any(is_forbidden_in_host) {
                return Err(Error::new(ErrorKind::InvalidHost));
            }
        }
    }

    Ok(())
}
