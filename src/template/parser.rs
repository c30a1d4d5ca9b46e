//! Template parser.
//!
//! See [RFC 6570 section 2](https://www.rfc-editor.org/rfc/rfc6570#section-2).

use alloc::vec::Vec;

use crate::parser::str::{find, find_split_hole, starts_with_pct_triplet};

use super::components::{Expression, Modifier, Operator, Part, VarSpec};
use super::error::{Error, ErrorKind};

/// Parses the template into literals and expressions.
pub(super) fn parse(template: &str) -> Result<Vec<Part>, Error> {
    let bytes = template.as_bytes();
    let mut parts = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let literal_end = bytes[pos..]
            .iter()
            .position(|&b| b == b'{' || b == b'}')
            .map_or(bytes.len(), |i| pos + i);
        if literal_end > pos {
            parts.push(Part::Literal(pos..literal_end));
        }
        if literal_end == bytes.len() {
            break;
        }
        if bytes[literal_end] == b'}' {
            return Err(Error::new(ErrorKind::UnexpectedBrace, literal_end));
        }

        let start = literal_end;
        let close = find(&bytes[(start + 1)..], b'}')
            .map(|i| start + 1 + i)
            .ok_or_else(|| Error::new(ErrorKind::UnclosedExpression, start))?;
        parts.push(Part::Expression(expression(template, start, close)?));
        pos = close + 1;
    }
    Ok(parts)
}

/// Parses the expression between the braces at `start` and `close`.
fn expression(template: &str, start: usize, close: usize) -> Result<Expression, Error> {
    let body_start = start + 1;
    let body = &template[body_start..close];
    if let Some(i) = find(body.as_bytes(), b'{') {
        return Err(Error::new(ErrorKind::UnexpectedBrace, body_start + i));
    }

    let (operator, mut offset) = match body.bytes().next() {
        None => return Err(Error::new(ErrorKind::EmptyExpression, start)),
        Some(b) if Operator::is_reserved_for_future(b) => {
            return Err(Error::new(ErrorKind::ReservedOperator, body_start))
        }
        Some(b) => match Operator::from_byte(b) {
            Some(op) => (op, body_start + 1),
            None => (Operator::String, body_start),
        },
    };
    if offset == close {
        return Err(Error::new(ErrorKind::EmptyExpression, start));
    }

    let mut variables = Vec::new();
    for spec in template[offset..close].split(',') {
        variables.push(varspec(spec, offset)?);
        offset += spec.len() + 1;
    }
    Ok(Expression {
        start,
        operator,
        variables,
    })
}

/// Parses the varspec at the given offset.
fn varspec(spec: &str, offset: usize) -> Result<VarSpec, Error> {
    let (name, modifier) = if let Some(name) = spec.strip_suffix('*') {
        (name, Modifier::Explode)
    } else if let Some((name, len)) = find_split_hole(spec, b':') {
        let len = max_len(len)
            .ok_or_else(|| Error::new(ErrorKind::InvalidModifier, offset + name.len()))?;
        (name, Modifier::MaxLen(len))
    } else {
        (spec, Modifier::None)
    };
    if !is_varname(name) {
        return Err(Error::new(ErrorKind::InvalidVarName, offset));
    }
    Ok(VarSpec {
        name: offset..(offset + name.len()),
        modifier,
    })
}

/// Parses `max-length = %x31-39 0*3DIGIT`.
fn max_len(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 4 || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    s.parse().ok()
}

/// Returns `true` if the string is a `varname`.
///
/// `varname = varchar *( ["."] varchar )` where
/// `varchar = ALPHA / DIGIT / "_" / pct-encoded`.
fn is_varname(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut after_varchar = false;
    while i < bytes.len() {
        match bytes[i] {
            b'.' if after_varchar => {
                after_varchar = false;
                i += 1;
            }
            b'%' if starts_with_pct_triplet(&bytes[i..]) => {
                after_varchar = true;
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' => {
                after_varchar = true;
                i += 1;
            }
            _ => return false,
        }
    }
    after_varchar
}
