//! Canonical primitives shared by every mediaprep crate.
//!
//! Nothing in here knows about media records or search schemas. The crate
//! provides the building blocks the higher layers agree on:
//! - stable canonical JSON bytes, used to decide whether two trees differ
//! - SHA-256 fingerprints over those bytes
//! - UTC timestamps and the permissive date parser that produces them
//! - validated string newtypes (durations, language tags)
//! - the non-blocking warning type every operation reports through
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic comparison.
pub mod canonicalizer;
/// Digest/fingerprint primitives.
pub mod digest;
/// Validated string newtypes.
pub mod identifiers;
/// Dotted field paths.
pub mod path;
/// Permissive date parsing into [`Timestamp`].
pub mod time;
/// Validation helpers used by canonical types.
pub mod validation;
/// Non-blocking warnings.
pub mod warning;

/// The literal string upstream producers use in place of a missing value.
pub const SENTINEL_NULL: &str = "NULL";

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use digest::{Digest, DigestAlg};
pub use identifiers::{DurationSpec, LanguageTag, Timestamp};
pub use path::FieldPath;
pub use validation::ValidationError;
pub use warning::{Warning, WarningCode};
