//! Scheme-dependent constants.
//!
//! The tables are plain constant data, so no runtime initialization is needed
//! before concurrent use.

/// Well-known default ports.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("http", 80),
    ("https", 443),
    ("ftp", 21),
    ("tftp", 69),
    ("ssh", 22),
    ("svn+ssh", 22),
    ("telnet", 23),
    ("nntp", 119),
    ("gopher", 70),
    ("wais", 210),
    ("ldap", 389),
    ("prospero", 1525),
];

/// Schemes whose normalized empty path is `/`.
const ROOT_PATH_SCHEMES: &[&str] = &["http", "https", "ftp", "tftp"];

/// Returns the well-known default port of the scheme.
///
/// The scheme is compared case-insensitively.
///
/// ```
/// use generic_uri::scheme::default_port;
///
/// assert_eq!(default_port("HTTPS"), Some(443));
/// assert_eq!(default_port("svn+ssh"), Some(22));
/// assert_eq!(default_port("mailto"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

/// Returns `true` if the scheme has a well-known default port.
///
/// Such schemes are IP-based: they address a host over the network.
#[inline]
#[must_use]
pub fn is_ip_based(scheme: &str) -> bool {
    default_port(scheme).is_some()
}

/// Returns `true` if an empty path of the (lowercase) scheme normalizes to `/`.
#[inline]
#[must_use]
pub(crate) fn has_root_path(scheme: &str) -> bool {
    ROOT_PATH_SCHEMES.contains(&scheme)
}

/// Lowercases the scheme and corrects the known misspelled alias.
#[must_use]
pub(crate) fn canonicalize(scheme: &str) -> alloc::string::String {
    let lower = scheme.to_ascii_lowercase();
    if lower == "ssh+svn" {
        "svn+ssh".into()
    } else {
        lower
    }
}
