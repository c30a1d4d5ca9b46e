//! Diagnostic records.
//!
//! The macros expand to nothing unless the `log` feature is enabled.
#![allow(unused_macros, unused_imports)]

/// Emits a debug record through the `log` facade.
macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!($($tt)*);
    };
}

/// Emits a trace record through the `log` facade.
macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($tt)*);
    };
}

pub(crate) use {debug, trace};
