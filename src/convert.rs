//! Inputs accepted where either a string or a parsed URI will do.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::uri::Uri;
use crate::validate::Error;

/// A URI reference given as a string or as a parsed URI.
///
/// Operations taking `impl Into<UriInput>` parse string operands, and use
/// parsed ones as they are.
///
/// # Examples
///
/// ```
/// use generic_uri::{Uri, UriInput};
///
/// let parsed = Uri::parse("http://example.com/")?;
/// assert!(matches!(UriInput::from(&parsed), UriInput::Uri(_)));
/// assert!(matches!(UriInput::from("http://example.com/"), UriInput::Str(_)));
///
/// let uri = UriInput::from("http://example.com/").to_uri()?;
/// assert!(uri.eq_raw(&parsed));
/// # Ok::<_, generic_uri::validate::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub enum UriInput<'a> {
    /// Unparsed string.
    Str(&'a str),
    /// Parsed URI.
    Uri(&'a Uri),
}

impl<'a> UriInput<'a> {
    /// Returns the input as a URI, parsing it if necessary.
    ///
    /// # Failures
    ///
    /// Fails if the string is not a valid URI reference.
    pub fn to_uri(self) -> Result<Cow<'a, Uri>, Error> {
        match self {
            Self::Str(s) => Uri::parse(s).map(Cow::Owned),
            Self::Uri(uri) => Ok(Cow::Borrowed(uri)),
        }
    }
}

impl<'a> From<&'a str> for UriInput<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for UriInput<'a> {
    #[inline]
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a Uri> for UriInput<'a> {
    #[inline]
    fn from(uri: &'a Uri) -> Self {
        Self::Uri(uri)
    }
}
