//! Generic URI values for [RFC 3986].
//!
//! [RFC 3986]: https://tools.ietf.org/html/rfc3986
//!
//! A [`Uri`] is a URI reference held as eight optional components: scheme,
//! user, password, host, port, path, query, and fragment. Components are
//! kept as given (percent-encoded text), and every construction and mutation
//! checks the invariants listed in [`validate::ErrorKind`].
//!
//! On top of the value type, the crate provides:
//!
//! * [percent-encoding](`percent_encoding`) by character class,
//! * [normalization](`normalize`) into a canonical string form, which is
//!   also used by `PartialEq` and `Hash`,
//! * [reference resolution](`resolve`) and its
//!   [left inverse](`relative`),
//! * [URI Template](`template`) expansion,
//! * a pluggable [IDNA service](`idna`) for internationalized hosts.
//!
//! # Examples
//!
//! ```
//! use generic_uri::Uri;
//!
//! let base = Uri::parse("HTTP://Example.COM:80/a/b/../c?q#f")?;
//! assert_eq!(base.scheme(), Some("HTTP"));
//! assert_eq!(base.port(), Some("80"));
//!
//! let normalized = base.normalize()?;
//! assert_eq!(normalized.to_string(), "http://example.com/a/c?q#f");
//! assert_eq!(base, normalized);
//!
//! let resolved = normalized.resolve("../d")?;
//! assert_eq!(resolved.to_string(), "http://example.com/d");
//! # Ok::<_, generic_uri::validate::Error>(())
//! ```
//!
//! # `std` and `alloc` support
//!
//! This crate supports `no_std` usage, but always requires the `alloc` crate.
//!
//! * `std` feature (**enabled by default**):
//!     + The feature let the crate utilize std-specific stuff, such as
//!       `std::error::Error` trait and the process-wide IDNA service registry.
//! * Without `std`:
//!     + The IDNA service is always [`idna::Unavailable`].
//!
//! # Features
//!
//! * `memchr`: scans delimiters with the `memchr` crate.
//! * `serde`: implements `Serialize` and `Deserialize` for [`Uri`].
//! * `idna`: uses the `idna` crate as the default IDNA service. Implies `std`.
//! * `log`: emits diagnostic records through the `log` facade.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod components;
pub mod convert;
pub mod idna;
pub(crate) mod log;
pub mod normalize;
pub(crate) mod parser;
pub mod percent_encoding;
pub mod relative;
pub mod resolve;
pub mod scheme;
pub mod template;
mod uri;
pub mod validate;

pub use self::components::{Component, Components};
pub use self::convert::UriInput;
pub use self::uri::Uri;
