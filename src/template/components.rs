//! Syntactic components of a template.

use core::ops::Range;

/// Variable modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Modifier {
    /// No modifiers.
    None,
    /// Prefix of the value, greater than 0 and less than 10000 characters.
    MaxLen(u16),
    /// Explode the variable, i.e. the varspec ends with `*`.
    Explode,
}

/// Variable specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct VarSpec {
    /// Range of the variable name in the template.
    pub(super) name: Range<usize>,
    /// Variable modifier.
    pub(super) modifier: Modifier,
}

/// Working operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Operator {
    /// No operator. String expansion.
    String,
    /// Reserved expansion by `+`.
    Reserved,
    /// Fragment expansion by `#`.
    Fragment,
    /// Label expansion by `.`.
    Label,
    /// Path segments by `/`.
    PathSegments,
    /// Path-style parameters by `;`.
    PathParams,
    /// Form-style query by `?`.
    FormQuery,
    /// Form-style query continuation by `&`.
    FormQueryCont,
}

impl Operator {
    /// Returns the operator for the given character.
    #[must_use]
    pub(super) fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Reserved),
            b'#' => Some(Self::Fragment),
            b'.' => Some(Self::Label),
            b'/' => Some(Self::PathSegments),
            b';' => Some(Self::PathParams),
            b'?' => Some(Self::FormQuery),
            b'&' => Some(Self::FormQueryCont),
            _ => None,
        }
    }

    /// Returns `true` if the character is an operator reserved for future extensions.
    #[inline]
    #[must_use]
    pub(super) fn is_reserved_for_future(b: u8) -> bool {
        matches!(b, b'=' | b',' | b'!' | b'@' | b'|')
    }
}

/// Expression, i.e. `{...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct Expression {
    /// Byte offset of the opening brace.
    pub(super) start: usize,
    /// Operator.
    pub(super) operator: Operator,
    /// Variable list.
    pub(super) variables: alloc::vec::Vec<VarSpec>,
}

/// A part of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) enum Part {
    /// Literal, as the range in the template.
    Literal(Range<usize>),
    /// Expression.
    Expression(Expression),
}
