//! Processor for [RFC 6570] URI Template.
//!
//! [RFC 6570]: https://www.rfc-editor.org/rfc/rfc6570.html
//!
//! Only expansion is supported.
//!
//! # Usage
//!
//! 1. Prepare a template with [`UriTemplate::new`].
//! 2. Prepare a context.
//!     * Insert key-value pairs into a [`Context`].
//! 3. Expand.
//!     * Pass the context to [`UriTemplate::expand`], or to
//!       [`UriTemplate::expand_uri`] to get a parsed [`Uri`].
//!     * To check or transform values, pass a [`Processor`] to
//!       [`UriTemplate::expand_with`].
//!
//! # Examples
//!
//! ```
//! use generic_uri::template::{Context, UriTemplate};
//!
//! let mut context = Context::new();
//! context.insert("username", "foo");
//! // U+2713 CHECK MARK
//! context.insert("utf8", "\u{2713}");
//!
//! let template = UriTemplate::new("/users/{username}{?utf8}")?;
//!
//! assert_eq!(template.expand(&context)?, "/users/foo?utf8=%E2%9C%93");
//! # Ok::<_, generic_uri::template::Error>(())
//! ```
//!
//! Literals are copied to the result, with characters not allowed in URIs
//! percent-encoded.
mod components;
mod context;
mod error;
mod expand;
mod parser;

use core::fmt;
use core::str::FromStr;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::uri::Uri;

use self::components::Part;
pub use self::context::{Context, Value};
pub use self::error::{Error, ErrorKind};

/// Value validation function of a [`Processor`].
type ValidateFn<'a> = dyn Fn(&str, &Value) -> bool + 'a;

/// Value transformation function of a [`Processor`].
type TransformFn<'a> = dyn Fn(&str, &str) -> String + 'a;

/// Hooks run on the values during expansion.
///
/// Both hooks are optional.
///
/// * `validate(name, value)` is called for each defined variable in the
///   template. If it returns `false`, the expansion fails with
///   [`ErrorKind::InvalidTemplateValue`].
/// * `transform(name, value)` is called for each string value, list item,
///   and associative array value. The result is written as is, without
///   percent-encoding. Keys of associative arrays are not transformed.
///
/// # Examples
///
/// ```
/// use generic_uri::template::{Context, ErrorKind, Processor, UriTemplate, Value};
///
/// let template = UriTemplate::new("/{id}/{+rest}")?;
/// let processor = Processor::new()
///     .with_validate(|name, value| name != "id" || matches!(value, Value::String(s) if s.bytes().all(|b| b.is_ascii_digit())))
///     .with_transform(|_name, value| value.to_ascii_uppercase());
///
/// let context: Context = [("id", "42"), ("rest", "a b")].into_iter().collect();
/// assert_eq!(template.expand_with(&context, &processor)?, "/42/A B");
///
/// let context: Context = [("id", "x")].into_iter().collect();
/// assert_eq!(
///     template.expand_with(&context, &processor).map_err(|e| e.kind()),
///     Err(ErrorKind::InvalidTemplateValue)
/// );
/// # Ok::<_, generic_uri::template::Error>(())
/// ```
#[derive(Default)]
pub struct Processor<'a> {
    /// Validation hook.
    validate: Option<Box<ValidateFn<'a>>>,
    /// Transformation hook.
    transform: Option<Box<TransformFn<'a>>>,
}

impl<'a> Processor<'a> {
    /// Creates a processor without hooks.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation hook.
    #[must_use]
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str, &Value) -> bool + 'a,
    {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Sets the transformation hook.
    #[must_use]
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &str) -> String + 'a,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Returns `false` if the validation hook rejects the value.
    #[must_use]
    fn is_valid(&self, name: &str, value: &Value) -> bool {
        self.validate
            .as_ref()
            .map_or(true, |validate| validate(name, value))
    }

    /// Returns the transformation hook.
    #[inline]
    #[must_use]
    fn transform_fn(&self) -> Option<&TransformFn<'a>> {
        self.transform.as_deref()
    }
}

impl fmt::Debug for Processor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("validate", &self.validate.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Parsed URI template.
///
/// # Examples
///
/// ```
/// use generic_uri::template::UriTemplate;
///
/// assert!(UriTemplate::new("http://example.com/{+path}{?q*}").is_ok());
/// assert!(UriTemplate::new("{unclosed").is_err());
/// assert!(UriTemplate::new("{=reserved}").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriTemplate {
    /// Template string.
    template: String,
    /// Literals and expressions.
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Parses the template.
    ///
    /// # Failures
    ///
    /// Fails if an expression is malformed.
    pub fn new(template: &str) -> Result<Self, Error> {
        let parts = parser::parse(template)?;
        Ok(Self {
            template: template.into(),
            parts,
        })
    }

    /// Returns the template string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the variable names in the order of first appearance.
    ///
    /// ```
    /// use generic_uri::template::UriTemplate;
    ///
    /// let template = UriTemplate::new("{a}/{+b,a}{?c*}")?;
    /// assert_eq!(template.variables(), ["a", "b", "c"]);
    /// # Ok::<_, generic_uri::template::Error>(())
    /// ```
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let exprs = self.parts.iter().filter_map(|part| match part {
            Part::Expression(expr) => Some(expr),
            Part::Literal(_) => None,
        });
        for varspec in exprs.flat_map(|expr| &expr.variables) {
            let name = &self.template[varspec.name.clone()];
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Expands the template with the context.
    ///
    /// Undefined variables are omitted.
    ///
    /// # Failures
    ///
    /// Fails if a prefix modifier is applied to a list or an associative array.
    pub fn expand(&self, context: &Context) -> Result<String, Error> {
        expand::expand(&self.template, &self.parts, context, None)
    }

    /// Expands the template with the context, running the processor hooks.
    ///
    /// # Failures
    ///
    /// Fails if the processor rejects a value, or if a prefix modifier is
    /// applied to a list or an associative array.
    pub fn expand_with(&self, context: &Context, processor: &Processor<'_>) -> Result<String, Error> {
        expand::expand(&self.template, &self.parts, context, Some(processor))
    }

    /// Expands the template and parses the result as a URI.
    ///
    /// ```
    /// use generic_uri::template::{Context, UriTemplate, Value};
    ///
    /// let template = UriTemplate::new("http://example.com{/path*}{?q}")?;
    /// let mut context = Context::new();
    /// context.insert("path", Value::from(&["a", "b c"][..]));
    /// context.insert("q", "x");
    ///
    /// let uri = template.expand_uri(&context)?;
    /// assert_eq!(uri.path(), Some("/a/b%20c"));
    /// assert_eq!(uri.query(), Some("q=x"));
    /// # Ok::<_, generic_uri::template::Error>(())
    /// ```
    ///
    /// # Failures
    ///
    /// Fails if the expansion fails, or if the result is not a valid URI.
    pub fn expand_uri(&self, context: &Context) -> Result<Uri, Error> {
        let expanded = self.expand(context)?;
        Uri::parse(&expanded).map_err(Error::invalid_uri)
    }

    /// Expands the template with the processor hooks and parses the result as a URI.
    ///
    /// # Failures
    ///
    /// Fails if the expansion fails, or if the result is not a valid URI.
    pub fn expand_uri_with(
        &self,
        context: &Context,
        processor: &Processor<'_>,
    ) -> Result<Uri, Error> {
        let expanded = self.expand_with(context, processor)?;
        Uri::parse(&expanded).map_err(Error::invalid_uri)
    }
}

impl fmt::Display for UriTemplate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl FromStr for UriTemplate {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for UriTemplate {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
