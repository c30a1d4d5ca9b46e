//! Expansion.
//!
//! See [RFC 6570 section 3](https://www.rfc-editor.org/rfc/rfc6570#section-3).

use core::mem;

use alloc::string::String;

use crate::parser::str::starts_with_pct_triplet;
use crate::percent_encoding::{encode, encode_preserving_escapes, CharClass};

use super::components::{Expression, Modifier, Operator, Part};
use super::context::{Context, Value};
use super::error::{Error, ErrorKind};
use super::{Processor, TransformFn};

/// Characters written as is by the reserved and fragment expansions.
const ALLOW_RESERVED: CharClass = CharClass::UNRESERVED.or(&CharClass::RESERVED);

/// Properties of an operator.
///
/// See [RFC 6570 Appendix A](https://www.rfc-editor.org/rfc/rfc6570#appendix-A).
#[derive(Debug, Clone, Copy)]
struct OpProps {
    /// Prefix for the first element.
    first: &'static str,
    /// Separator.
    sep: &'static str,
    /// Whether or not the expansion includes the variable or key name.
    named: bool,
    /// Result string if the variable is empty.
    ifemp: &'static str,
    /// Whether or not the reserved values can be written without being encoded.
    allow_reserved: bool,
}

impl OpProps {
    /// Creates the properties.
    const fn new(
        first: &'static str,
        sep: &'static str,
        named: bool,
        ifemp: &'static str,
        allow_reserved: bool,
    ) -> Self {
        Self {
            first,
            sep,
            named,
            ifemp,
            allow_reserved,
        }
    }

    /// Returns the properties for the operator.
    #[must_use]
    fn from_op(op: Operator) -> Self {
        match op {
            Operator::String => Self::new("", ",", false, "", false),
            Operator::Reserved => Self::new("", ",", false, "", true),
            Operator::Fragment => Self::new("#", ",", false, "", true),
            Operator::Label => Self::new(".", ".", false, "", false),
            Operator::PathSegments => Self::new("/", "/", false, "", false),
            Operator::PathParams => Self::new(";", ";", true, "", false),
            Operator::FormQuery => Self::new("?", "&", true, "=", false),
            Operator::FormQueryCont => Self::new("&", "&", true, "=", false),
        }
    }
}

/// Output buffer of a single expression.
struct Writer<'a, 'p> {
    /// Output.
    out: &'a mut String,
    /// Operator properties.
    props: OpProps,
    /// Value transformation of the processor.
    transform: Option<&'a TransformFn<'p>>,
}

impl Writer<'_, '_> {
    /// Writes the string as is.
    #[inline]
    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Writes the string, percent-encoding it as the operator requires.
    fn escaped(&mut self, s: &str) {
        if self.props.allow_reserved {
            self.out.push_str(&encode_preserving_escapes(s, &ALLOW_RESERVED));
        } else {
            self.out.push_str(&encode(s, &CharClass::UNRESERVED));
        }
    }

    /// Writes the value of the variable.
    ///
    /// Transformed values are written without being encoded.
    fn value(&mut self, name: &str, s: &str) {
        match self.transform {
            Some(transform) => self.out.push_str(&transform(name, s)),
            None => self.escaped(s),
        }
    }

    /// Writes `=` followed by the value, or `ifemp` if the value is empty.
    fn named_value(&mut self, name: &str, s: &str) {
        if s.is_empty() {
            self.raw(self.props.ifemp);
        } else {
            self.raw("=");
            self.value(name, s);
        }
    }
}

/// Returns the prefix of at most `max_len` characters.
///
/// A percent-encoded triplet is a single character if `keep_escapes` is true.
#[must_use]
fn prefix(s: &str, max_len: u16, keep_escapes: bool) -> &str {
    let mut rest = s;
    for _ in 0..max_len {
        let len = match rest.chars().next() {
            None => break,
            Some(_) if keep_escapes && starts_with_pct_triplet(rest.as_bytes()) => 3,
            Some(c) => c.len_utf8(),
        };
        rest = &rest[len..];
    }
    &s[..(s.len() - rest.len())]
}

/// Expands the template.
pub(super) fn expand(
    template: &str,
    parts: &[Part],
    context: &Context,
    processor: Option<&Processor<'_>>,
) -> Result<String, Error> {
    let mut out = String::with_capacity(template.len());
    for part in parts {
        match part {
            Part::Literal(range) => {
                out.push_str(&encode_preserving_escapes(&template[range.clone()], &ALLOW_RESERVED));
            }
            Part::Expression(expr) => expand_expr(&mut out, template, expr, context, processor)?,
        }
    }
    Ok(out)
}

/// Expands the expression.
fn expand_expr(
    out: &mut String,
    template: &str,
    expr: &Expression,
    context: &Context,
    processor: Option<&Processor<'_>>,
) -> Result<(), Error> {
    let props = OpProps::from_op(expr.operator);
    let mut w = Writer {
        out,
        props,
        transform: processor.and_then(Processor::transform_fn),
    };

    let mut is_first_varspec = true;
    for varspec in &expr.variables {
        let name = &template[varspec.name.clone()];
        let value = match context.get(name) {
            Some(value) if !value.is_undefined() => value,
            _ => continue,
        };
        if let Some(processor) = processor {
            if !processor.is_valid(name, value) {
                return Err(Error::new(ErrorKind::InvalidTemplateValue, expr.start));
            }
        }
        if matches!(varspec.modifier, Modifier::MaxLen(_)) && !matches!(value, Value::String(_)) {
            return Err(Error::new(ErrorKind::UnexpectedValueType, expr.start));
        }

        if mem::replace(&mut is_first_varspec, false) {
            w.raw(props.first);
        } else {
            w.raw(props.sep);
        }

        let explode = varspec.modifier == Modifier::Explode;
        match value {
            Value::Undefined => {}
            Value::String(s) => {
                let s = match varspec.modifier {
                    Modifier::MaxLen(max_len) => prefix(s, max_len, props.allow_reserved),
                    Modifier::None | Modifier::Explode => s,
                };
                if props.named {
                    w.raw(name);
                    w.named_value(name, s);
                } else {
                    w.value(name, s);
                }
            }
            Value::List(list) if explode => {
                for (i, item) in list.iter().enumerate() {
                    if i != 0 {
                        w.raw(props.sep);
                    }
                    if props.named {
                        w.raw(name);
                        w.named_value(name, item);
                    } else {
                        w.value(name, item);
                    }
                }
            }
            Value::Assoc(assoc) if explode => {
                for (i, (key, item)) in assoc.iter().enumerate() {
                    if i != 0 {
                        w.raw(props.sep);
                    }
                    w.escaped(key);
                    if props.named {
                        w.named_value(name, item);
                    } else {
                        w.raw("=");
                        w.value(name, item);
                    }
                }
            }
            Value::List(list) => {
                if props.named {
                    w.raw(name);
                    w.raw("=");
                }
                for (i, item) in list.iter().enumerate() {
                    if i != 0 {
                        w.raw(",");
                    }
                    w.value(name, item);
                }
            }
            Value::Assoc(assoc) => {
                if props.named {
                    w.raw(name);
                    w.raw("=");
                }
                for (i, (key, item)) in assoc.iter().enumerate() {
                    if i != 0 {
                        w.raw(",");
                    }
                    w.escaped(key);
                    w.raw(",");
                    w.value(name, item);
                }
            }
        }
    }
    Ok(())
}
