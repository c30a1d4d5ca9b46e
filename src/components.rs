//! Components of URI references.

use core::fmt;

use crate::uri::Uri;
use crate::validate::Error as ValidationError;

/// The eight logical components of a URI reference.
///
/// This is the input of [`Uri::from_components`], and the output of the
/// reference parser before validation. Every component is optional; note that
/// an empty string is distinct from an absent component.
///
/// # Examples
///
/// ```
/// use generic_uri::{Components, Uri};
///
/// let uri = Uri::from_components(Components {
///     scheme: Some("https"),
///     host: Some("example.com"),
///     port: Some("8443"),
///     path: Some("/a/b"),
///     query: Some("q=1"),
///     ..Components::default()
/// })?;
/// assert_eq!(uri.to_string(), "https://example.com:8443/a/b?q=1");
/// # Ok::<_, generic_uri::validate::Error>(())
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Components<'a> {
    /// Scheme.
    pub scheme: Option<&'a str>,
    /// User part of the userinfo (before the first colon).
    pub user: Option<&'a str>,
    /// Password part of the userinfo (after the first colon).
    pub password: Option<&'a str>,
    /// Host, either a registered name or a bracketed IP literal.
    pub host: Option<&'a str>,
    /// Port as written in the source. Must consist of decimal digits.
    pub port: Option<&'a str>,
    /// Path.
    pub path: Option<&'a str>,
    /// Query, without the leading `?`.
    pub query: Option<&'a str>,
    /// Fragment, without the leading `#`.
    pub fragment: Option<&'a str>,
}

impl Components<'_> {
    /// Returns `true` if any of the authority sub-components is present.
    #[inline]
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.user.is_some() || self.password.is_some() || self.host.is_some() || self.port.is_some()
    }
}

/// Component names, used to select components by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Scheme.
    Scheme,
    /// User.
    User,
    /// Password.
    Password,
    /// User and password.
    Userinfo,
    /// Host.
    Host,
    /// Port.
    Port,
    /// Userinfo, host, and port.
    Authority,
    /// Path.
    Path,
    /// Query.
    Query,
    /// Fragment.
    Fragment,
}

impl Component {
    /// Returns the component for the option key, if it is a known one.
    ///
    /// ```
    /// use generic_uri::Component;
    ///
    /// assert_eq!(Component::from_key("host"), Some(Component::Host));
    /// assert_eq!(Component::from_key("hostname"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let component = match key {
            "scheme" => Self::Scheme,
            "user" => Self::User,
            "password" => Self::Password,
            "userinfo" => Self::Userinfo,
            "host" => Self::Host,
            "port" => Self::Port,
            "authority" => Self::Authority,
            "path" => Self::Path,
            "query" => Self::Query,
            "fragment" => Self::Fragment,
            _ => return None,
        };
        Some(component)
    }

    /// Returns the option key for the component.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::User => "user",
            Self::Password => "password",
            Self::Userinfo => "userinfo",
            Self::Host => "host",
            Self::Port => "port",
            Self::Authority => "authority",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        }
    }

    /// Returns `true` if the component is a part of the authority.
    #[inline]
    #[must_use]
    fn is_authority_part(self) -> bool {
        matches!(
            self,
            Self::User | Self::Password | Self::Userinfo | Self::Host | Self::Port
        )
    }
}

impl fmt::Display for Component {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error of construction from keyed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionError {
    /// Inner error representation.
    repr: OptionErrorRepr,
}

/// Internal representation of [`OptionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum OptionErrorRepr {
    /// The key is not a component name.
    UnknownKey(alloc::string::String),
    /// The two keys cannot be specified together.
    Conflict(Component, Component),
    /// The resulting components do not form a valid URI.
    Invalid(ValidationError),
}

impl OptionError {
    /// Returns the unrecognized key, if the error is caused by one.
    #[must_use]
    pub fn unknown_key(&self) -> Option<&str> {
        match &self.repr {
            OptionErrorRepr::UnknownKey(key) => Some(key),
            _ => None,
        }
    }

    /// Returns the validation error, if the options were accepted but the
    /// resulting URI is invalid.
    #[must_use]
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.repr {
            OptionErrorRepr::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            OptionErrorRepr::UnknownKey(key) => write!(f, "invalid option: unknown key {key:?}"),
            OptionErrorRepr::Conflict(a, b) => {
                write!(f, "invalid option: `{a}` cannot be specified with `{b}`")
            }
            OptionErrorRepr::Invalid(e) => e.fmt(f),
        }
    }
}

impl From<ValidationError> for OptionError {
    #[inline]
    fn from(e: ValidationError) -> Self {
        Self {
            repr: OptionErrorRepr::Invalid(e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.repr {
            OptionErrorRepr::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl Uri {
    /// Creates a URI from keyed component options.
    ///
    /// Recognized keys are the names returned by [`Component::key`]. The
    /// `userinfo` key cannot be combined with `user` or `password`, and the
    /// `authority` key cannot be combined with any of the authority parts.
    ///
    /// # Failures
    ///
    /// Fails with an invalid-option error on an unknown or conflicting key, or
    /// if the resulting components are not a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::Uri;
    ///
    /// let uri = Uri::from_options([("scheme", "http"), ("authority", "u@h:81"), ("path", "/")])?;
    /// assert_eq!(uri.to_string(), "http://u@h:81/");
    ///
    /// let err = Uri::from_options([("scheme", "http"), ("hostname", "h")]).unwrap_err();
    /// assert_eq!(err.unknown_key(), Some("hostname"));
    /// # Ok::<_, generic_uri::components::OptionError>(())
    /// ```
    pub fn from_options<'a, I>(options: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut seen: alloc::vec::Vec<(Component, &'a str)> = alloc::vec::Vec::new();
        for (key, value) in options {
            let component = Component::from_key(key).ok_or_else(|| OptionError {
                repr: OptionErrorRepr::UnknownKey(key.into()),
            })?;
            if let Some(&(other, _)) = seen.iter().find(|(c, _)| conflicts(*c, component)) {
                return Err(OptionError {
                    repr: OptionErrorRepr::Conflict(other, component),
                });
            }
            match seen.iter_mut().find(|(c, _)| *c == component) {
                Some(entry) => entry.1 = value,
                None => seen.push((component, value)),
            }
        }

        let mut components = Components::default();
        for (component, value) in seen {
            match component {
                Component::Scheme => components.scheme = Some(value),
                Component::User => components.user = Some(value),
                Component::Password => components.password = Some(value),
                Component::Userinfo => {
                    let (user, password) = crate::parser::split_userinfo(value);
                    components.user = Some(user);
                    components.password = password;
                }
                Component::Host => components.host = Some(value),
                Component::Port => components.port = Some(value),
                Component::Authority => {
                    let authority = crate::parser::decompose_authority(value);
                    components.user = authority.user;
                    components.password = authority.password;
                    components.host = Some(authority.host);
                    components.port = authority.port;
                }
                Component::Path => components.path = Some(value),
                Component::Query => components.query = Some(value),
                Component::Fragment => components.fragment = Some(value),
            }
        }
        Ok(Self::from_components(components)?)
    }
}

/// Returns `true` if the two option keys cannot be specified together.
fn conflicts(a: Component, b: Component) -> bool {
    match (a, b) {
        (Component::Authority, other) | (other, Component::Authority) => {
            other != Component::Authority && other.is_authority_part()
        }
        (Component::Userinfo, other) | (other, Component::Userinfo) => {
            matches!(other, Component::User | Component::Password)
        }
        _ => false,
    }
}
