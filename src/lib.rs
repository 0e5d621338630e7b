//! Static validator for event-bus subscription filter patterns.
//!
//! A filter pattern routes pipeline-triggering events by matching top-level
//! envelope fields (`source`, `detail-type`, ...) and arbitrary nesting under
//! `detail`. This crate validates a candidate pattern's *shape* before it is
//! persisted: the operator grammar, numeric-range semantics, CIDR and
//! wildcard syntax, and `$or` combinatorial fan-out. It does not match
//! events at runtime.
//!
//! ```text
//! parse(json) → Value → validate(&value) → ValidationResult
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let pattern = json!({
//!     "source": ["media.ingest"],
//!     "detail": {
//!         "size": [{ "numeric": [">", 0, "<=", 1048576] }],
//!         "origin": [{ "cidr": "10.0.0.0/24" }]
//!     }
//! });
//!
//! let result = eventpattern::validate(&pattern);
//! assert!(result.valid);
//! ```
//!
//! Validation never fails with an `Err`: every problem, from an unknown
//! operator to an oversized pattern, is reported as a [`ValidationError`]
//! entry with a dot/bracket path into the document (e.g. `$.detail.size[0]`).
//! `valid == false` is the sole authoritative signal to reject a pattern;
//! warnings never block.

pub mod error;
pub mod operators;
pub mod parse;
pub mod validate;

pub use error::*;
pub use operators::{NumericComparator, Operator, ROOT_FIELDS};

// Re-export entry-point functions at the crate root for convenience.
pub use parse::parse;
pub use validate::validate;

/// Convenience entry point composing parse → validate for callers holding
/// the raw JSON text from an upstream form or editor.
///
/// # Errors
///
/// Returns `Err(ParseError)` only when the input is not decodable JSON.
/// A decodable pattern always yields `Ok`, with any structural problems
/// carried inside the [`ValidationResult`].
///
/// # Example
///
/// ```rust
/// let result = eventpattern::check(r#"{ "source": ["media.ingest"] }"#)
///     .expect("decodable JSON");
/// assert!(result.valid);
/// ```
pub fn check(input: &str) -> Result<ValidationResult, ParseError> {
    let pattern = parse::parse(input)?;
    Ok(validate::validate(&pattern))
}
