//! Internationalized domain names.
//!
//! Host conversion between Unicode and the ASCII-compatible encoding is
//! delegated to an [`IdnaService`]. A process-wide service can be installed
//! once with [`install`]; until then the default service is used on first
//! access. The default is [`Uts46`] when the `idna` feature is enabled, and
//! [`Unavailable`] otherwise.
//!
//! A missing or failing service never makes normalization fail: the host is
//! kept as is.

use core::fmt;

#[cfg(feature = "std")]
use alloc::boxed::Box;
use alloc::string::String;

/// IDNA conversion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
}

impl Error {
    /// Creates a new error of the kind.
    #[inline]
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
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
        match self.kind {
            ErrorKind::Unavailable => f.write_str("IDNA conversion is not available"),
            ErrorKind::Failed => f.write_str("IDNA conversion failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// IDNA error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No conversion backend is available.
    Unavailable,
    /// The backend rejected the input.
    Failed,
}

/// Conversion between Unicode host names and their ASCII-compatible form.
pub trait IdnaService: Send + Sync {
    /// Converts the host to its ASCII-compatible form (`xn--` labels).
    fn to_ascii(&self, host: &str) -> Result<String, Error>;

    /// Converts the host to its Unicode form.
    fn to_unicode(&self, host: &str) -> Result<String, Error>;

    /// Returns `false` if every conversion is known to fail as unavailable.
    #[inline]
    fn is_available(&self) -> bool {
        true
    }
}

impl fmt::Debug for dyn IdnaService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdnaService")
            .field("available", &self.is_available())
            .finish()
    }
}

/// Service without a backend. Every conversion fails as unavailable.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable;

impl IdnaService for Unavailable {
    #[inline]
    fn to_ascii(&self, _host: &str) -> Result<String, Error> {
        Err(Error::new(ErrorKind::Unavailable))
    }

    #[inline]
    fn to_unicode(&self, _host: &str) -> Result<String, Error> {
        Err(Error::new(ErrorKind::Unavailable))
    }

    #[inline]
    fn is_available(&self) -> bool {
        false
    }
}

/// UTS #46 processing by the `idna` crate.
#[cfg(feature = "idna")]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uts46;

#[cfg(feature = "idna")]
impl IdnaService for Uts46 {
    fn to_ascii(&self, host: &str) -> Result<String, Error> {
        ::idna::domain_to_ascii(host).map_err(|_| Error::new(ErrorKind::Failed))
    }

    fn to_unicode(&self, host: &str) -> Result<String, Error> {
        let (unicode, result) = ::idna::domain_to_unicode(host);
        result
            .map(|()| unicode)
            .map_err(|_| Error::new(ErrorKind::Failed))
    }
}

/// Process-wide service.
#[cfg(feature = "std")]
static SERVICE: std::sync::OnceLock<Box<dyn IdnaService>> = std::sync::OnceLock::new();

/// Returns the service used when nothing is installed.
#[cfg(feature = "std")]
fn default_service() -> Box<dyn IdnaService> {
    #[cfg(feature = "idna")]
    {
        Box::new(Uts46)
    }
    #[cfg(not(feature = "idna"))]
    {
        Box::new(Unavailable)
    }
}

/// Installs the process-wide service.
///
/// Installation succeeds at most once, and only if the service has not been
/// used yet. Otherwise the given service is returned back.
///
/// # Examples
///
/// ```
/// use generic_uri::idna::{self, Unavailable};
///
/// // The first access fixes the default service.
/// let _ = idna::service();
/// assert!(idna::install(Box::new(Unavailable)).is_err());
/// ```
#[cfg(feature = "std")]
pub fn install(service: Box<dyn IdnaService>) -> Result<(), Box<dyn IdnaService>> {
    SERVICE.set(service)
}

/// Returns the process-wide service.
#[cfg(feature = "std")]
#[must_use]
pub fn service() -> &'static dyn IdnaService {
    SERVICE.get_or_init(default_service).as_ref()
}

/// Returns the process-wide service.
///
/// Without `std` there is no registry and no backend.
#[cfg(not(feature = "std"))]
#[must_use]
pub fn service() -> &'static dyn IdnaService {
    &Unavailable
}

/// Converts the host to its ASCII-compatible form with the process-wide service.
#[inline]
pub fn to_ascii(host: &str) -> Result<String, Error> {
    service().to_ascii(host)
}

/// Converts the host to its Unicode form with the process-wide service.
#[inline]
pub fn to_unicode(host: &str) -> Result<String, Error> {
    service().to_unicode(host)
}
