//! Host normalization.

use alloc::string::String;
use alloc::vec::Vec;

use crate::idna::IdnaService;
use crate::log::debug;
use crate::parser::char::CharClass;
use crate::parser::str::starts_with_pct_triplet;
use crate::percent_encoding::triplet_value;

/// Returns `true` if the byte can be decoded from a triplet in a host.
#[inline]
#[must_use]
fn is_decodable(b: u8) -> bool {
    !b.is_ascii() || CharClass::UNRESERVED.contains(b)
}

/// Decodes unreserved and non-ASCII triplets.
///
/// If the decoded non-ASCII bytes are not valid UTF-8, only the unreserved
/// triplets are decoded.
#[must_use]
fn decode(host: &str) -> String {
    let decode_with = |pred: fn(u8) -> bool| -> Vec<u8> {
        let bytes = host.as_bytes();
        let mut buf = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let rest = &bytes[i..];
            if starts_with_pct_triplet(rest) {
                let value = triplet_value(rest);
                if pred(value) {
                    buf.push(value);
                    i += 3;
                    continue;
                }
            }
            buf.push(rest[0]);
            i += 1;
        }
        buf
    };
    match String::from_utf8(decode_with(is_decodable)) {
        Ok(decoded) => decoded,
        Err(_) => {
            let unreserved_only = decode_with(|b| CharClass::UNRESERVED.contains(b));
            // Only ASCII bytes were decoded, so the result is still UTF-8.
            String::from_utf8(unreserved_only).unwrap_or_else(|_| host.into())
        }
    }
}

/// Uppercases the hexdigits of the remaining triplets.
#[must_use]
fn uppercase_triplets(host: String) -> String {
    if !host.contains('%') {
        return host;
    }
    let mut bytes = host.into_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if starts_with_pct_triplet(&bytes[i..]) {
            bytes[i + 1].make_ascii_uppercase();
            bytes[i + 2].make_ascii_uppercase();
            i += 3;
        } else {
            i += 1;
        }
    }
    // Only ASCII hexdigits were changed.
    String::from_utf8(bytes).unwrap_or_default()
}

/// Normalizes the host.
///
/// The host is percent-decoded where it is safe, lowercased, trimmed, and
/// converted to the ASCII-compatible form. IP literals are not converted.
/// A single trailing dot is removed.
#[must_use]
pub(super) fn normalize(host: &str, idna: &dyn IdnaService) -> String {
    let host = uppercase_triplets(decode(host).to_lowercase());
    let host = host.trim();
    if host.is_empty() {
        return String::new();
    }

    let mut host: String = if host.starts_with('[') {
        host.into()
    } else {
        match idna.to_ascii(host) {
            Ok(ascii) => ascii,
            Err(_e) => {
                debug!("keeping host {host:?} as is: {_e}");
                host.into()
            }
        }
    };
    if host.len() > 1 && host.ends_with('.') {
        host.pop();
    }
    host
}
