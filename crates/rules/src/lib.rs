//! Atomic style rules as produced by the source-to-rule compiler.
//!
//! Every other strata crate speaks in terms of [`StyleRule`]. This crate also
//! owns the string helpers that slice and rewrite opaque rule text, since the
//! compiler and the build surface must agree on them byte for byte.

/// Locale-aware string ordering used to sort rule text.
pub mod collate;
/// Errors raised while reading embedded rule metadata.
pub mod error;
/// Embedded rule metadata in transformed module code.
pub mod metadata;
/// The rule tuple and its LTR/RTL variant.
pub mod rule;
/// Slicing and rewriting of rule text.
pub mod selector;

pub use collate::locale_compare;
pub use error::{MetadataError, Result};
pub use rule::{StyleRule, Variant};
