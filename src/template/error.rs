//! Template errors.

use core::fmt;

use crate::validate::Error as ValidationError;

/// Template creation or expansion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
    /// Byte offset in the template where the error is detected.
    location: usize,
    /// Validation error of the expanded URI.
    source: Option<ValidationError>,
}

impl Error {
    /// Creates a new error.
    #[inline]
    #[must_use]
    pub(super) fn new(kind: ErrorKind, location: usize) -> Self {
        Self {
            kind,
            location,
            source: None,
        }
    }

    /// Creates an error for an expansion result that is not a valid URI.
    #[inline]
    #[must_use]
    pub(super) fn invalid_uri(source: ValidationError) -> Self {
        Self {
            kind: ErrorKind::InvalidUri,
            location: 0,
            source: Some(source),
        }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the byte offset in the template where the error is detected.
    ///
    /// For value errors, this is the offset of the expression.
    #[inline]
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::UnclosedExpression => "unclosed expression",
            ErrorKind::UnexpectedBrace => "unexpected brace",
            ErrorKind::EmptyExpression => "empty variable list",
            ErrorKind::ReservedOperator => "operator reserved for future extensions",
            ErrorKind::InvalidVarName => "invalid variable name",
            ErrorKind::InvalidModifier => "invalid variable modifier",
            ErrorKind::InvalidTemplateValue => "value rejected by the processor",
            ErrorKind::UnexpectedValueType => "prefix modifier applied to a composite value",
            ErrorKind::InvalidUri => {
                return match &self.source {
                    Some(e) => e.fmt(f),
                    None => f.write_str("Invalid URI"),
                };
            }
        };
        write!(f, "{msg} (at byte {})", self.location)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Reason of a template error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An expression has no closing brace.
    UnclosedExpression,
    /// A `}` outside of expressions, or a `{` inside an expression.
    UnexpectedBrace,
    /// An expression has no variables.
    EmptyExpression,
    /// The operator is one of `= , ! @ |`.
    ReservedOperator,
    /// A variable name is empty or contains a disallowed character.
    InvalidVarName,
    /// A prefix length is not a number from 1 to 9999.
    InvalidModifier,
    /// The processor rejected a value.
    InvalidTemplateValue,
    /// A prefix modifier is applied to a list or an associative array.
    UnexpectedValueType,
    /// The expansion result is not a valid URI.
    InvalidUri,
}
