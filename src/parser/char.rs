//! Character classes of RFC 3986 productions.
//!
//! See [RFC 3986 section 2](https://tools.ietf.org/html/rfc3986#section-2)
//! and [appendix A](https://tools.ietf.org/html/rfc3986#appendix-A).

/// A set of ASCII bytes allowed to appear unencoded in some component.
///
/// Every byte outside of the set (including all non-ASCII bytes) is
/// percent-encoded by [`encode`][`crate::percent_encoding::encode`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CharClass {
    /// Membership table for ASCII bytes.
    table: [bool; 128],
}

impl CharClass {
    /// `ALPHA = A-Z / a-z`
    pub const ALPHA: Self = Self::gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

    /// `DIGIT = 0-9`
    pub const DIGIT: Self = Self::gen(b"0123456789");

    /// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
    pub const GEN_DELIMS: Self = Self::gen(b":/?#[]@");

    /// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
    pub const SUB_DELIMS: Self = Self::gen(b"!$&'()*+,;=");

    /// `reserved = gen-delims / sub-delims`
    pub const RESERVED: Self = Self::GEN_DELIMS.or(&Self::SUB_DELIMS);

    /// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
    pub const UNRESERVED: Self = Self::ALPHA.or(&Self::DIGIT).or(&Self::gen(b"-._~"));

    /// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    pub const SCHEME: Self = Self::ALPHA.or(&Self::DIGIT).or(&Self::gen(b"+-."));

    /// The user part of `userinfo`: `unreserved / sub-delims`.
    pub const USER: Self = Self::UNRESERVED.or(&Self::SUB_DELIMS);

    /// The password part of `userinfo`: `unreserved / sub-delims / ":"`.
    pub const PASSWORD: Self = Self::USER.or(&Self::gen(b":"));

    /// `host`, including the brackets of IP literals: `unreserved / sub-delims / ":" / "[" / "]"`.
    pub const HOST: Self = Self::UNRESERVED.or(&Self::SUB_DELIMS).or(&Self::gen(b":[]"));

    /// `authority = [ userinfo "@" ] host [ ":" port ]`
    pub const AUTHORITY: Self = Self::HOST.or(&Self::gen(b"@"));

    /// `pchar = unreserved / sub-delims / ":" / "@"`, i.e. a path segment.
    pub const SEGMENT: Self = Self::UNRESERVED.or(&Self::SUB_DELIMS).or(&Self::gen(b":@"));

    /// `path = *( pchar / "/" )`
    pub const PATH: Self = Self::SEGMENT.or(&Self::gen(b"/"));

    /// `query = *( pchar / "/" / "?" )`
    pub const QUERY: Self = Self::PATH.or(&Self::gen(b"?"));

    /// `fragment = *( pchar / "/" / "?" )`
    pub const FRAGMENT: Self = Self::QUERY;

    /// Creates a class allowing exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or is `%`.
    #[must_use]
    pub const fn gen(bytes: &[u8]) -> Self {
        let mut table = [false; 128];
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            assert!(b.is_ascii() && b != b'%', "non-ASCII or `%`");
            table[b as usize] = true;
            i += 1;
        }
        Self { table }
    }

    /// Returns the union of the two classes.
    #[must_use]
    pub const fn or(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < 128 {
            self.table[i] |= other.table[i];
            i += 1;
        }
        self
    }

    /// Returns the class without the bytes of `other`.
    #[must_use]
    pub const fn without(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < 128 {
            if other.table[i] {
                self.table[i] = false;
            }
            i += 1;
        }
        self
    }

    /// Returns `true` if the byte may appear unencoded.
    #[inline]
    #[must_use]
    pub const fn contains(&self, b: u8) -> bool {
        b.is_ascii() && self.table[b as usize]
    }
}

impl core::fmt::Debug for CharClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut set = f.debug_set();
        for b in 0..128_u8 {
            if self.table[usize::from(b)] {
                set.entry(&char::from(b));
            }
        }
        set.finish()
    }
}

/// Returns `true` if the string matches the `scheme` rule.
#[must_use]
pub(crate) fn is_scheme(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => bytes.all(|b| CharClass::SCHEME.contains(b)),
        _ => false,
    }
}

/// Returns `true` if the byte is not allowed anywhere in a host.
#[inline]
#[must_use]
pub(crate) fn is_forbidden_in_host(c: char) -> bool {
    matches!(c, '/' | '?' | '#' | '@' | '<' | '>' | '{' | '}' | '\\' | '"') || c.is_whitespace()
}
