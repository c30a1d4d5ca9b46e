//! Percent-encoding and percent-decoding.
//!
//! See [RFC 3986 section 2.1](https://tools.ietf.org/html/rfc3986#section-2.1).
//!
//! Absent components are represented by `Option::None` everywhere in this
//! crate; encoding or decoding an absent component is `Option::map` over
//! these functions, so absence propagates instead of being an error.
//!
//! # Examples
//!
//! ```
//! use generic_uri::percent_encoding::{decode_utf8, encode, CharClass};
//!
//! let encoded = encode("caf\u{E9} & bar", &CharClass::UNRESERVED);
//! assert_eq!(encoded, "caf%C3%A9%20%26%20bar");
//! assert_eq!(decode_utf8(&encoded)?, "caf\u{E9} & bar");
//! # Ok::<_, std::string::FromUtf8Error>(())
//! ```

use alloc::borrow::Cow;
use alloc::string::{FromUtf8Error, String};
use alloc::vec::Vec;

pub use crate::parser::char::CharClass;
use crate::parser::str::{find, starts_with_pct_triplet};

/// Uppercase hexadecimal digits.
const HEXDIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Appends the `%XX` triplet for the byte.
#[inline]
fn push_triplet(buf: &mut String, b: u8) {
    buf.push('%');
    buf.push(char::from(HEXDIGITS[usize::from(b >> 4)]));
    buf.push(char::from(HEXDIGITS[usize::from(b & 0xF)]));
}

/// Returns the value of an ASCII hexadecimal digit.
#[inline]
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!("[precondition] the byte must be a hexdigit"),
    }
}

/// Decodes the triplet at the head of the slice.
///
/// # Precondition
///
/// The slice must start with a valid triplet.
#[inline]
pub(crate) fn triplet_value(s: &[u8]) -> u8 {
    (hex_value(s[1]) << 4) | hex_value(s[2])
}

/// Percent-encodes every byte of `text` not in `class`.
///
/// The `%` character is never in a class, so a literal `%` in the input is
/// always encoded as `%25` and `decode(encode(s, C)) == s` holds for any `s`.
///
/// # Examples
///
/// ```
/// use generic_uri::percent_encoding::{encode, CharClass};
///
/// assert_eq!(encode("a b/c", &CharClass::PATH), "a%20b/c");
/// assert_eq!(encode("a b/c", &CharClass::SEGMENT), "a%20b%2Fc");
/// assert_eq!(encode("100%", &CharClass::UNRESERVED), "100%25");
/// ```
#[must_use]
pub fn encode<'a>(text: &'a str, class: &CharClass) -> Cow<'a, str> {
    encode_bytes_impl(text.as_bytes(), class, false)
        .map_or(Cow::Borrowed(text), Cow::Owned)
}

/// Percent-encodes arbitrary bytes.
///
/// The result is always ASCII.
#[must_use]
pub fn encode_bytes(bytes: &[u8], class: &CharClass) -> String {
    match encode_bytes_impl(bytes, class, false) {
        Some(encoded) => encoded,
        // Every byte is in the class, so the bytes are ASCII.
        None => bytes.iter().copied().map(char::from).collect(),
    }
}

/// Percent-encodes every byte not in `class`, keeping valid `%XX` triplets.
///
/// This is the encoding of the reserved expansion of URI templates.
///
/// ```
/// use generic_uri::percent_encoding::{encode_preserving_escapes, CharClass};
///
/// let class = CharClass::UNRESERVED.or(&CharClass::RESERVED);
/// assert_eq!(encode_preserving_escapes("50%25 off%", &class), "50%25%20off%25");
/// ```
#[must_use]
pub fn encode_preserving_escapes<'a>(text: &'a str, class: &CharClass) -> Cow<'a, str> {
    encode_bytes_impl(text.as_bytes(), class, true).map_or(Cow::Borrowed(text), Cow::Owned)
}

/// Encodes the bytes, returning `None` if nothing needs to be encoded.
fn encode_bytes_impl(bytes: &[u8], class: &CharClass, keep_escapes: bool) -> Option<String> {
    let needs_encoding = |rest: &[u8]| {
        let b = rest[0];
        !class.contains(b) && !(keep_escapes && starts_with_pct_triplet(rest))
    };
    let first = (0..bytes.len()).find(|&i| needs_encoding(&bytes[i..]))?;

    let mut buf = String::with_capacity(bytes.len() + 8);
    // Bytes before `first` are in the class, so they are ASCII.
    buf.extend(bytes[..first].iter().copied().map(char::from));
    let mut i = first;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if keep_escapes && starts_with_pct_triplet(rest) {
            buf.push('%');
            buf.push(char::from(rest[1]));
            buf.push(char::from(rest[2]));
            i += 3;
            continue;
        }
        let b = rest[0];
        if class.contains(b) {
            buf.push(char::from(b));
        } else {
            push_triplet(&mut buf, b);
        }
        i += 1;
    }
    Some(buf)
}

/// Percent-decodes the string into raw bytes.
///
/// Malformed triplets (`%` not followed by two hexdigits) are kept as
/// literal text. The decoded bytes are not checked to be valid UTF-8.
///
/// # Examples
///
/// ```
/// use generic_uri::percent_encoding::decode;
///
/// assert_eq!(&*decode("a%20b"), b"a b");
/// assert_eq!(&*decode("100%"), b"100%");
/// assert_eq!(&*decode("%zz%4a"), b"%zzJ");
/// assert_eq!(&*decode("%FF"), &[0xFF]);
/// ```
#[must_use]
pub fn decode(text: &str) -> Cow<'_, [u8]> {
    let bytes = text.as_bytes();
    let mut pos = match find(bytes, b'%') {
        Some(pos) => pos,
        None => return Cow::Borrowed(bytes),
    };
    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..pos]);
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if starts_with_pct_triplet(rest) {
            buf.push(triplet_value(rest));
            pos += 3;
        } else {
            buf.push(rest[0]);
            pos += 1;
        }
    }
    Cow::Owned(buf)
}

/// Percent-decodes the string, requiring the result to be valid UTF-8.
///
/// # Failures
///
/// Fails if the decoded bytes are not a valid UTF-8 sequence.
pub fn decode_utf8(text: &str) -> Result<Cow<'_, str>, FromUtf8Error> {
    match decode(text) {
        Cow::Borrowed(_) => Ok(Cow::Borrowed(text)),
        Cow::Owned(bytes) => String::from_utf8(bytes).map(Cow::Owned),
    }
}

/// Percent-decodes the string, replacing invalid UTF-8 sequences with U+FFFD.
#[must_use]
pub fn decode_utf8_lossy(text: &str) -> Cow<'_, str> {
    match decode(text) {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Cow::Owned(s),
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        },
    }
}

/// Decodes the component and re-encodes it with `class`.
///
/// Triplets whose decoded byte is in `leave_encoded` stay encoded (with
/// uppercase hexdigits); every other triplet is decoded, and the decoded
/// bytes are then encoded again unless they are in `class`.
///
/// ```
/// use generic_uri::percent_encoding::{normalize_component, CharClass};
///
/// let path = normalize_component("/%7euser/a%2fb/%e3%81%82 x", &CharClass::PATH, &CharClass::gen(b"/"));
/// assert_eq!(path, "/~user/a%2Fb/%E3%81%82%20x");
/// ```
#[must_use]
pub fn normalize_component<'a>(
    text: &'a str,
    class: &CharClass,
    leave_encoded: &CharClass,
) -> Cow<'a, str> {
    let bytes = text.as_bytes();
    let mut buf = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if starts_with_pct_triplet(rest) {
            let decoded = triplet_value(rest);
            if leave_encoded.contains(decoded) || !class.contains(decoded) {
                push_triplet(&mut buf, decoded);
            } else {
                buf.push(char::from(decoded));
            }
            i += 3;
            continue;
        }
        let b = rest[0];
        if class.contains(b) {
            buf.push(char::from(b));
        } else {
            push_triplet(&mut buf, b);
        }
        i += 1;
    }
    if buf == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(buf)
    }
}
