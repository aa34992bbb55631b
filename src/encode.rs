//! Result encoding.
//!
//! Reassembles the (unmodified) payload plus partition metadata into the
//! [`OutputRecord`] handed back to the delivery service. The pipeline tags
//! records, it never rewrites their content, so the payload leaves this
//! module byte-for-byte as it arrived, including payloads that failed to
//! decode, which operators need intact for forensic inspection.
use crate::partition::{PartitionKey, assign_key};
use crate::types::{Category, IncomingRecord, OutputRecord, RecordStatus};

/// Encodes a successfully classified record.
///
/// The key must come from the fixed mapping for the record's category;
/// partition/category consistency is what downstream audits rely on.
pub fn encode(original: &IncomingRecord, category: Category, key: PartitionKey) -> OutputRecord {
    debug_assert_eq!(
        key,
        assign_key(category),
        "partition key must come from the fixed category mapping"
    );
    OutputRecord {
        id: original.id.clone(),
        status: RecordStatus::Ok,
        payload: original.payload.clone(),
        partition_key: key,
    }
}

/// Encodes a record whose payload failed to decode.
///
/// The record does not vanish: it reports `ProcessingFailed`, keeps its
/// original bytes, and is tagged with the `errors` partition key.
pub fn encode_failure(original: &IncomingRecord) -> OutputRecord {
    OutputRecord {
        id: original.id.clone(),
        status: RecordStatus::ProcessingFailed,
        payload: original.payload.clone(),
        partition_key: assign_key(Category::Errored),
    }
}
