//! Error types produced by the routing pipeline.
//!
//! The router distinguishes two failure scopes, and keeping them apart is
//! what makes at-least-once redelivery safe:
//!
//! | Error | Scope | Retry behavior |
//! |-------|-------|----------------|
//! | [`DecodeError`] | One record | Permanent. Never retried here; the record is tagged `ProcessingFailed` and routed to the `errors` partition with its raw bytes intact. |
//! | [`BatchError`] | Whole batch | Transient. Reported to the caller, which redelivers the entire batch later. No internal retry loop. |
//!
//! Classification ambiguity (a decision field that is absent, empty, or
//! unrecognized) is **not** an error at all; it is a defined, successful
//! classification into [`Category::Errored`](crate::Category::Errored).
//!
//! # Examples
//!
//! ```rust
//! use fwlog::DecodeError;
//!
//! let err = DecodeError::InvalidEncoding("Invalid symbol 45, offset 3.".into());
//! assert!(err.to_string().contains("not valid base64"));
//! ```
use thiserror::Error;

/// Permanent, per-record decode failure.
///
/// Produced by [`decode`](crate::decode()) when a payload cannot be turned into
/// a structured event. No partial event is ever produced. All variants are
/// cloneable and comparable so tests can match on them precisely.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The payload is not valid base64.
    #[error("payload is not valid base64: {0}")]
    InvalidEncoding(String),

    /// The payload decoded, but its content is not a JSON object.
    ///
    /// Covers both unparseable JSON and well-formed JSON of the wrong shape
    /// (an array, a bare string, a number). Either way the event structure
    /// the classifier needs does not exist.
    #[error("payload is not a structured event: {0}")]
    InvalidStructure(String),
}

/// Batch-level failure for conditions outside any single record.
///
/// When this is returned, the entire batch is considered unprocessed and the
/// external delivery layer is expected to retry it wholesale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BatchError {
    /// The one-output-per-input invariant was violated.
    ///
    /// This cannot happen through any per-record failure path and indicates
    /// an internal bug; surfacing it as a batch failure keeps the broken
    /// result set from reaching storage.
    #[error("produced {produced} output records for {expected} input records")]
    CardinalityMismatch {
        /// Number of records in the incoming batch.
        expected: usize,
        /// Number of output records actually produced.
        produced: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_messages_name_the_failure() {
        let enc = DecodeError::InvalidEncoding("bad symbol".into());
        assert_eq!(enc.to_string(), "payload is not valid base64: bad symbol");

        let st = DecodeError::InvalidStructure("expected value at line 1".into());
        assert!(st.to_string().starts_with("payload is not a structured event"));
    }

    #[test]
    fn batch_error_reports_both_counts() {
        let err = BatchError::CardinalityMismatch {
            expected: 3,
            produced: 2,
        };
        assert_eq!(
            err.to_string(),
            "produced 2 output records for 3 input records"
        );
    }
}
