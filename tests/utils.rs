//! Utilities.
#![allow(dead_code, unused_macros)]

use generic_uri::Uri;

/// Asserts that the two values are displayed as the same string.
macro_rules! assert_eq_display {
    ($left:expr, $right:expr $(,)?) => {{
        let left = &$left;
        let right = &$right;
        assert_eq!(
            format!("{left}"),
            format!("{right}"),
            "`left` and `right` should be displayed as the same string"
        );
    }};
    ($left:expr, $right:expr, $($args:tt)*) => {{
        let left = &$left;
        let right = &$right;
        assert_eq!(
            format!("{left}"),
            format!("{right}"),
            "`left` and `right` should be displayed as the same string: {}",
            format_args!($($args)*)
        );
    }};
}

/// Parses the string, panicking on failure.
#[track_caller]
#[must_use]
pub fn uri(s: &str) -> Uri {
    Uri::parse(s).unwrap_or_else(|e| panic!("{s:?} should be a valid URI: {e}"))
}
