//! Core data model types for the routing pipeline.
//!
//! These types represent the shape of records as they move from the streaming
//! delivery service through classification and back out for durable delivery.
//! They are designed to be:
//!
//! - **Serializable**: Support for JSON via serde
//! - **Cloneable**: Payloads are [`Bytes`], so clones are reference-counted
//! - **Comparable**: Support equality checks for testing
//!
//! # Type Hierarchy
//!
//! ```text
//! IncomingRecord
//! ├── id: String
//! └── payload: Bytes (opaque transport blob, base64 text)
//!
//!         ↓ decode()
//!
//! DecodedEvent
//! ├── decision: Option<String> (trimmed decision token, casing preserved)
//! └── fields: serde_json::Value (full event, preserved verbatim)
//!
//!         ↓ classify() → assign_key() → encode()
//!
//! OutputRecord
//! ├── id: String (same id, same batch position)
//! ├── status: RecordStatus (Ok | ProcessingFailed)
//! ├── payload: Bytes (byte-identical to the input payload)
//! └── partition_key: PartitionKey
//! ```
//!
//! # Examples
//!
//! ```rust
//! use bytes::Bytes;
//! use fwlog::IncomingRecord;
//!
//! let record = IncomingRecord {
//!     id: "49546986683135544286507457936321625675700192471156785154".into(),
//!     payload: Bytes::from_static(b"eyJhY3Rpb24iOiJCTE9DSyJ9"),
//! };
//! ```
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::partition::PartitionKey;

/// One record as handed over by the delivery service.
///
/// The payload is opaque to the pipeline until decoded: an encoded byte blob
/// (base64-wrapped structured text) whose size is bounded by the delivery
/// service's per-record limit. That limit is owned by the collaborator and is
/// not enforced here.
///
/// The record is immutable for the duration of one invocation; the batch
/// processor is its sole owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingRecord {
    /// Identifier assigned by the delivery service.
    ///
    /// Echoed back verbatim on the matching [`OutputRecord`] so the service
    /// can correlate results with inputs.
    pub id: String,

    /// The opaque transport blob.
    pub payload: Bytes,
}

/// Structured view of a payload, produced by [`decode`](crate::decode()).
///
/// Created once, never mutated. All original fields are preserved verbatim in
/// `fields`; `decision` is a normalized lookup of the configured decision
/// field so classification does not have to walk the JSON again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// The decision token, trimmed but with its original casing.
    ///
    /// `None` when the field is absent or is not a JSON string. Comparison
    /// against the known tokens happens case-insensitively at classify time.
    pub decision: Option<String>,

    /// The full decoded event, preserved for re-encoding and inspection.
    pub fields: serde_json::Value,
}

impl DecodedEvent {
    /// Returns the decision token, if one was found.
    pub fn decision(&self) -> Option<&str> {
        self.decision.as_deref()
    }
}

/// Closed classification outcome for a record.
///
/// `Errored` covers both malformed input and events whose decision field is
/// missing, empty, or unrecognized. The enum is deliberately exhaustive:
/// adding a variant is a breaking contract change that must be communicated
/// to downstream retention configuration together with a new partition key
/// mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The firewall let the request through.
    Allowed,
    /// The firewall rejected the request.
    Blocked,
    /// No recognizable decision. Also the sink for decode failures.
    Errored,
}

impl Category {
    /// Stable lowercase name, used in structured log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Allowed => "allowed",
            Category::Blocked => "blocked",
            Category::Errored => "errored",
        }
    }
}

/// Per-record processing outcome reported back to the delivery service.
///
/// The serialized variant names (`"Ok"`, `"ProcessingFailed"`) are part of
/// the egress wire contract and must not change.
///
/// Note that a record classified as [`Category::Errored`] still reports
/// `Ok` when its payload decoded cleanly: classification ambiguity is a
/// defined, successful outcome, distinguishable from a true decode failure
/// by this status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// The record was decoded and classified; deliver it under its
    /// partition key.
    Ok,
    /// The payload could not be decoded; route to the failure sink.
    ProcessingFailed,
}

impl RecordStatus {
    /// Returns true for successfully processed records.
    pub const fn is_ok(self) -> bool {
        matches!(self, RecordStatus::Ok)
    }
}

/// The result for one input record.
///
/// Exactly one `OutputRecord` exists per [`IncomingRecord`], with the same
/// `id` at the same position in the batch ordering. The payload is always
/// byte-for-byte the input payload: the pipeline tags records, it never
/// rewrites their content. Even un-decodable payloads are preserved so
/// operators can inspect the raw bytes later.
///
/// The partition key is always present. For decode failures it is the
/// `errors` key; whether the wire response also carries partition metadata
/// for failed records is decided by the egress encoder, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Mirrors [`IncomingRecord::id`].
    pub id: String,

    /// Processing outcome for this record.
    pub status: RecordStatus,

    /// Byte-identical copy of the input payload.
    pub payload: Bytes,

    /// Storage partition this record is delivered under.
    pub partition_key: PartitionKey,
}
