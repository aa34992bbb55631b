//! Firewall log classification and partition routing.
//!
//! This is where firewall decision records pass through on their way to
//! object storage. Batches arrive from a managed streaming delivery service,
//! each record carrying an opaque base64 blob; we decode it, classify the
//! decision inside, tag the record with a storage partition key, and hand
//! everything back for durable delivery. Each partition is governed by its
//! own retention policy downstream.
//!
//! ## What we do here
//!
//! - **Decode** - Unwrap the base64, parse the JSON event, look up the
//!   decision field. Malformed payloads get a typed error, never a panic.
//! - **Classify** - `BLOCK` goes to `Blocked`, `ALLOW` to `Allowed` (any
//!   casing), everything else to `Errored`. No silent default to allowed.
//! - **Assign a partition key** - A fixed three-entry map, the only place a
//!   key may come from.
//! - **Encode** - One output per input, same id, same order, payload
//!   byte-identical. Decode failures keep their raw bytes and land in the
//!   `errors` partition.
//! - **Log everything** - Structured logs via tracing for debugging
//!   production issues.
//!
//! ## Delivery semantics
//!
//! The delivery layer is at-least-once: the same batch may be redelivered
//! after a timeout or a batch-level failure. Every function here is
//! deterministic and side-effect-free over its inputs (no wall-clock
//! reads, no randomness, no cross-batch state), so redelivery is safe by
//! construction. Concurrent invocations share nothing mutable.
//!
//! ## Main entry points
//!
//! Call [`process`] with a batch of [`IncomingRecord`]s, or [`route_event`]
//! with the delivery service's wire envelope.
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use fwlog::{process, IncomingRecord, PartitionKey, RecordStatus, RouterConfig};
//!
//! let cfg = RouterConfig::default();
//! let batch = vec![IncomingRecord {
//!     id: "rec-1".into(),
//!     // {"action":"BLOCK"}
//!     payload: Bytes::from_static(b"eyJhY3Rpb24iOiJCTE9DSyJ9"),
//! }];
//!
//! let outputs = process(&batch, &cfg).unwrap();
//!
//! assert_eq!(outputs.len(), 1);
//! assert_eq!(outputs[0].status, RecordStatus::Ok);
//! assert_eq!(outputs[0].partition_key, PartitionKey::Blocked);
//! ```
use std::time::Instant;

use tracing::{Level, debug, info, warn};

mod classify;
mod config;
mod decode;
mod encode;
mod error;
mod partition;
mod types;
mod wire;

pub use crate::classify::{ALLOW_TOKEN, BLOCK_TOKEN, classify};
pub use crate::config::{ConfigError, RouterConfig};
pub use crate::decode::decode;
pub use crate::encode::{encode, encode_failure};
pub use crate::error::{BatchError, DecodeError};
pub use crate::partition::{PartitionKey, assign_key};
pub use crate::types::{Category, DecodedEvent, IncomingRecord, OutputRecord, RecordStatus};
pub use crate::wire::{
    EventRecord, PartitionKeys, RecordMetadata, ResponseRecord, TransformationEvent,
    TransformationResponse,
};

/// Processes one batch: decodes, classifies, and tags every record.
///
/// Records are handled independently; a decode failure on one record never
/// aborts the rest of the batch. The output list has exactly one record per
/// input record, id-for-id, in input order; no record is ever silently
/// dropped.
///
/// # Errors
///
/// [`BatchError`] is returned only for conditions outside any single record
/// (an internal invariant violation). The caller treats the whole batch as
/// unprocessed and redelivers it.
pub fn process(
    batch: &[IncomingRecord],
    cfg: &RouterConfig,
) -> Result<Vec<OutputRecord>, BatchError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "router.process", records = batch.len());
    let _guard = span.enter();

    let mut outputs = Vec::with_capacity(batch.len());
    let mut allowed = 0usize;
    let mut blocked = 0usize;
    let mut errors = 0usize;
    let mut failed = 0usize;

    for record in batch {
        let output = route_record(record, cfg);
        match output.partition_key {
            PartitionKey::Allowed => allowed += 1,
            PartitionKey::Blocked => blocked += 1,
            PartitionKey::Errors => errors += 1,
        }
        if output.status == RecordStatus::ProcessingFailed {
            failed += 1;
        }
        outputs.push(output);
    }

    if outputs.len() != batch.len() {
        let err = BatchError::CardinalityMismatch {
            expected: batch.len(),
            produced: outputs.len(),
        };
        warn!(error = %err, "batch_invariant_violated");
        return Err(err);
    }

    let elapsed_micros = start.elapsed().as_micros();
    info!(
        records = batch.len(),
        allowed,
        blocked,
        errors,
        failed,
        elapsed_micros,
        "batch_processed"
    );
    Ok(outputs)
}

/// Routes a single record through decode, classify, key assignment, and
/// encoding. Infallible: every failure mode has a defined output record.
fn route_record(record: &IncomingRecord, cfg: &RouterConfig) -> OutputRecord {
    match decode(&record.payload, cfg) {
        Ok(event) => {
            let category = classify(&event);
            let key = assign_key(category);
            debug!(
                record_id = %record.id,
                category = category.as_str(),
                partition_key = %key,
                "record_classified"
            );
            encode(record, category, key)
        }
        Err(err) => {
            warn!(record_id = %record.id, error = %err, "record_decode_failed");
            encode_failure(record)
        }
    }
}

/// Wire-level entry point: envelope in, envelope out.
///
/// Unpacks the delivery service's invocation event, runs [`process`], and
/// reassembles the response document the service expects.
pub fn route_event(
    event: TransformationEvent,
    cfg: &RouterConfig,
) -> Result<TransformationResponse, BatchError> {
    let span = tracing::span!(
        Level::INFO,
        "router.invocation",
        invocation_id = %event.invocation_id
    );
    let _guard = span.enter();

    let batch: Vec<IncomingRecord> = event
        .records
        .into_iter()
        .map(EventRecord::into_incoming)
        .collect();
    let outputs = process(&batch, cfg)?;

    Ok(TransformationResponse {
        records: outputs.iter().map(ResponseRecord::from_output).collect(),
    })
}
