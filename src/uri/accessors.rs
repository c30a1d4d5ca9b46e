//! Derived accessors and form-style query handling.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::log::debug;
use crate::percent_encoding::{decode_utf8_lossy, encode, CharClass};
use crate::scheme;
use crate::uri::Uri;
use crate::validate::Error;

/// Characters that are left as-is in form-style query keys and values.
const FORM_VALUE: CharClass = CharClass::UNRESERVED;

/// Classification and ports.
impl Uri {
    /// Returns `true` if the URI has a scheme.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme().is_some()
    }

    /// Returns `true` if the URI has no scheme.
    #[inline]
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns `true` if the scheme is known to address a network host.
    #[must_use]
    pub fn is_ip_based(&self) -> bool {
        self.scheme().map_or(false, scheme::is_ip_based)
    }

    /// Returns the well-known default port of the scheme.
    #[inline]
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        self.scheme().and_then(scheme::default_port)
    }

    /// Returns the effective port.
    ///
    /// This is the specified port if it is present and non-zero, and the
    /// default port of the scheme otherwise. A specified port above 65535
    /// has no effective port.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com:8080/")?.inferred_port(), Some(8080));
    /// assert_eq!(Uri::parse("https://example.com/")?.inferred_port(), Some(443));
    /// assert_eq!(Uri::parse("http://example.com:0/")?.inferred_port(), Some(80));
    /// assert_eq!(Uri::parse("foo://example.com/")?.inferred_port(), None);
    /// assert_eq!(Uri::parse("http://example.com:70000/")?.inferred_port(), None);
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    #[must_use]
    pub fn inferred_port(&self) -> Option<u16> {
        if self.port().is_none() {
            return self.default_port();
        }
        match self.port_number() {
            Some(0) => self.default_port(),
            port => port,
        }
    }
}

/// Derived strings.
impl Uri {
    /// Returns the origin in its serialized form.
    ///
    /// The origin is `scheme://host[:port]` with the scheme and the host
    /// lowercased and the default port omitted. A URI without a scheme or a
    /// non-empty host has an opaque origin, serialized as `null`.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("HTTPS://user@Example.COM:443/path?q")?;
    /// assert_eq!(uri.origin(), "https://example.com");
    /// assert_eq!(Uri::parse("http://example.com:08080/")?.origin(), "http://example.com:8080");
    /// assert_eq!(Uri::parse("mailto:user@example.com")?.origin(), "null");
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    #[must_use]
    pub fn origin(&self) -> String {
        let (scheme, host) = match (self.scheme(), self.host()) {
            (Some(scheme), Some(host)) if !host.is_empty() => (scheme, host),
            _ => return "null".into(),
        };
        let scheme = scheme::canonicalize(scheme);
        let mut origin = alloc::format!("{scheme}://{}", host.to_ascii_lowercase());
        if let Some(port) = self.port() {
            let digits = port.trim_start_matches('0');
            match self.port_number() {
                Some(0) => {}
                Some(port) if Some(port) == scheme::default_port(&scheme) => {}
                _ => {
                    origin.push(':');
                    origin.push_str(digits);
                }
            }
        }
        origin
    }

    /// Returns the scheme and the authority, i.e. `scheme://authority`.
    ///
    /// Returns `None` if both are absent.
    #[must_use]
    pub fn site(&self) -> Option<String> {
        let authority = self.authority();
        if self.scheme().is_none() && authority.is_none() {
            return None;
        }
        let mut site = String::new();
        if let Some(scheme) = self.scheme() {
            site.push_str(scheme);
            site.push(':');
        }
        if let Some(authority) = authority {
            site.push_str("//");
            site.push_str(&authority);
        }
        Some(site)
    }

    /// Returns the HTTP request target, i.e. the path and the query.
    ///
    /// Returns `None` unless the scheme is `http` or `https`. An empty path
    /// is written as `/`.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com?q")?.request_uri().as_deref(), Some("/?q"));
    /// assert_eq!(Uri::parse("ftp://example.com/a")?.request_uri(), None);
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    #[must_use]
    pub fn request_uri(&self) -> Option<String> {
        let scheme = self.scheme()?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return None;
        }
        let path = match self.path() {
            None | Some("") => "/",
            Some(path) => path,
        };
        let mut target = String::from(path);
        if let Some(query) = self.query() {
            target.push('?');
            target.push_str(query);
        }
        Some(target)
    }

    /// Returns the last path segment, without trailing slashes and without
    /// `;` parameters.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/dir/file.tar.gz;type=a")?;
    /// assert_eq!(uri.basename(), Some("file.tar.gz"));
    /// assert_eq!(uri.extname(), Some(".gz"));
    ///
    /// let uri = Uri::parse("http://example.com/dir/")?;
    /// assert_eq!(uri.basename(), Some("dir"));
    /// assert_eq!(uri.extname(), Some(""));
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    #[must_use]
    pub fn basename(&self) -> Option<&str> {
        let path = self.path()?.trim_end_matches('/');
        let base = match path.rfind('/') {
            Some(slash) => &path[(slash + 1)..],
            None => path,
        };
        Some(match base.find(';') {
            Some(semicolon) => &base[..semicolon],
            None => base,
        })
    }

    /// Returns the extension of the [basename][`Self::basename`], including the dot.
    ///
    /// A leading dot (as in `.profile`) or a trailing dot does not start an
    /// extension, and the extension is empty in that case.
    #[must_use]
    pub fn extname(&self) -> Option<&str> {
        let base = self.basename()?;
        Some(match base.rfind('.') {
            Some(dot) if dot != 0 && dot + 1 != base.len() => &base[dot..],
            _ => "",
        })
    }

    /// Returns a copy for display, with the host converted to Unicode.
    ///
    /// The conversion uses the installed [IDNA service][`crate::idna`]. If
    /// the conversion fails, the host is kept as is.
    #[must_use]
    pub fn display_uri(&self) -> Self {
        let mut uri = self.clone();
        if let Some(host) = self.host() {
            match crate::idna::to_unicode(host) {
                Ok(unicode) => {
                    if let Err(_e) = uri.set_host(Some(&unicode)) {
                        debug!("keeping host {host:?} for display: {_e}");
                    }
                }
                Err(_e) => {
                    debug!("keeping host {host:?} for display: {_e}");
                }
            }
        }
        uri
    }
}

/// Form-style query.
impl Uri {
    /// Decodes the query as `key=value` pairs separated by `&`.
    ///
    /// `+` is decoded as a space. A pair without `=` has no value, and empty
    /// pairs are skipped. Returns `None` if the query is absent.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/?q=a+b%21&flag&&x=")?;
    /// let values = uri.query_values().expect("query is present");
    /// assert_eq!(
    ///     values,
    ///     [
    ///         ("q".to_owned(), Some("a b!".to_owned())),
    ///         ("flag".to_owned(), None),
    ///         ("x".to_owned(), Some(String::new())),
    ///     ]
    /// );
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    #[must_use]
    pub fn query_values(&self) -> Option<Vec<(String, Option<String>)>> {
        let query = self.query()?;
        let values = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_form(key), Some(decode_form(value))),
                None => (decode_form(pair), None),
            })
            .collect();
        Some(values)
    }

    /// Sets the query from `key=value` pairs.
    ///
    /// Keys and values are percent-encoded except unreserved characters. A
    /// pair with no value is written as the key alone.
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/")?;
    /// uri.set_query_values([("q", Some("a b&c")), ("flag", None)])?;
    /// assert_eq!(uri.query(), Some("q=a%20b%26c&flag"));
    /// # Ok::<_, generic_uri::validate::Error>(())
    /// ```
    pub fn set_query_values<I, K, V>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = String::new();
        for (key, value) in values {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&encode(key.as_ref(), &FORM_VALUE));
            if let Some(value) = value {
                query.push('=');
                query.push_str(&encode(value.as_ref(), &FORM_VALUE));
            }
        }
        self.set_query(Some(&query))
    }
}

/// Decodes a form-encoded key or value.
fn decode_form(s: &str) -> String {
    let s: Cow<'_, str> = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };
    decode_utf8_lossy(&s).into_owned()
}
