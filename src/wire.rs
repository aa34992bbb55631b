//! Wire types for the delivery service's invocation contract.
//!
//! The streaming delivery layer invokes the router with one JSON document per
//! batch and expects one JSON document back. These types are the serde
//! rendering of that contract; field names and the `"Ok"` /
//! `"ProcessingFailed"` result tokens are owned by the collaborator and must
//! match it exactly.
//!
//! Batch assembly, buffering intervals, and size bounds all live on the
//! collaborator's side. This module only maps the envelope to the domain
//! batch and the results back.
//!
//! Ingress:
//!
//! ```json
//! {
//!   "invocationId": "a1b2c3",
//!   "deliveryStreamArn": "arn:...:deliverystream/firewall-logs",
//!   "records": [
//!     { "recordId": "49546...", "data": "eyJhY3Rpb24iOiJCTE9DSyJ9",
//!       "approximateArrivalTimestamp": 1495072949453 }
//!   ]
//! }
//! ```
//!
//! Egress mirrors the record list, adding the result and, for delivered
//! records, the partition metadata:
//!
//! ```json
//! {
//!   "records": [
//!     { "recordId": "49546...", "result": "Ok",
//!       "data": "eyJhY3Rpb24iOiJCTE9DSyJ9",
//!       "metadata": { "partitionKeys": { "log_type": "blocked" } } }
//!   ]
//! }
//! ```
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{IncomingRecord, OutputRecord, RecordStatus};

/// One batch invocation as delivered by the streaming layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationEvent {
    /// Unique id for this invocation, for log correlation.
    pub invocation_id: String,

    /// Source stream identifier, when the delivery layer provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_stream_arn: Option<String>,

    /// The ordered batch.
    pub records: Vec<EventRecord>,
}

/// One record inside the invocation envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Delivery-service record id; echoed back verbatim in the response.
    pub record_id: String,

    /// The opaque payload, base64 text as delivered.
    pub data: String,

    /// When the record reached the delivery stream, as epoch milliseconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "epoch_millis"
    )]
    pub approximate_arrival_timestamp: Option<DateTime<Utc>>,
}

impl EventRecord {
    /// Converts the wire record into the domain record the pipeline runs on.
    ///
    /// The arrival timestamp is envelope metadata only; it does not enter the
    /// pipeline, which must stay free of any wall-clock dependency.
    pub fn into_incoming(self) -> IncomingRecord {
        IncomingRecord {
            id: self.record_id,
            payload: Bytes::from(self.data.into_bytes()),
        }
    }
}

/// The response document handed back to the delivery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationResponse {
    /// One entry per input record, same order.
    pub records: Vec<ResponseRecord>,
}

/// Result for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// Mirrors the ingress `recordId`.
    pub record_id: String,

    /// `"Ok"` or `"ProcessingFailed"`.
    pub result: RecordStatus,

    /// The payload, passed through unchanged.
    pub data: String,

    /// Partition metadata. Present on `Ok` records; omitted on
    /// `ProcessingFailed` records, whose routing is the caller's failure
    /// sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl ResponseRecord {
    /// Builds the wire result from a pipeline output record.
    pub fn from_output(output: &OutputRecord) -> Self {
        let metadata = match output.status {
            RecordStatus::Ok => Some(RecordMetadata {
                partition_keys: PartitionKeys {
                    log_type: output.partition_key.as_str().to_owned(),
                },
            }),
            RecordStatus::ProcessingFailed => None,
        };
        ResponseRecord {
            record_id: output.id.clone(),
            result: output.status,
            data: String::from_utf8_lossy(&output.payload).into_owned(),
            metadata,
        }
    }
}

/// Partition metadata attached to delivered records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Keys the delivery service expands into the storage prefix.
    pub partition_keys: PartitionKeys,
}

/// The partition key set. `log_type` is the single dimension retention
/// policies are bound to; its field name is part of the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionKeys {
    /// One of `"allowed"`, `"blocked"`, `"errors"`.
    pub log_type: String,
}

/// Epoch-millisecond serialization for optional arrival timestamps.
mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_i64(ts.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<i64>::deserialize(deserializer)?;
        millis
            .map(|m| {
                DateTime::from_timestamp_millis(m).ok_or_else(|| {
                    serde::de::Error::custom(format!("timestamp {m} out of range"))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::PartitionKey;

    const INGRESS: &str = r#"{
        "invocationId": "invocation-1",
        "deliveryStreamArn": "arn:aws:firehose:us-east-1:123456789012:deliverystream/firewall-logs",
        "records": [
            {
                "recordId": "rec-1",
                "data": "eyJhY3Rpb24iOiJCTE9DSyJ9",
                "approximateArrivalTimestamp": 1495072949453
            },
            {
                "recordId": "rec-2",
                "data": "bm90LWpzb24="
            }
        ]
    }"#;

    #[test]
    fn ingress_envelope_deserializes() {
        let event: TransformationEvent =
            serde_json::from_str(INGRESS).expect("ingress deserializes");

        assert_eq!(event.invocation_id, "invocation-1");
        assert_eq!(event.records.len(), 2);
        assert_eq!(event.records[0].record_id, "rec-1");
        assert_eq!(
            event.records[0]
                .approximate_arrival_timestamp
                .expect("timestamp present")
                .timestamp_millis(),
            1495072949453
        );
        assert_eq!(event.records[1].approximate_arrival_timestamp, None);
    }

    #[test]
    fn ingress_record_maps_to_domain_record() {
        let event: TransformationEvent =
            serde_json::from_str(INGRESS).expect("ingress deserializes");
        let incoming = event.records[0].clone().into_incoming();

        assert_eq!(incoming.id, "rec-1");
        assert_eq!(&incoming.payload[..], b"eyJhY3Rpb24iOiJCTE9DSyJ9");
    }

    #[test]
    fn delivered_record_serializes_with_partition_metadata() {
        let output = OutputRecord {
            id: "rec-1".into(),
            status: RecordStatus::Ok,
            payload: Bytes::from_static(b"eyJhY3Rpb24iOiJCTE9DSyJ9"),
            partition_key: PartitionKey::Blocked,
        };

        let json = serde_json::to_value(ResponseRecord::from_output(&output))
            .expect("response serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "recordId": "rec-1",
                "result": "Ok",
                "data": "eyJhY3Rpb24iOiJCTE9DSyJ9",
                "metadata": { "partitionKeys": { "log_type": "blocked" } }
            })
        );
    }

    #[test]
    fn failed_record_serializes_without_metadata() {
        let output = OutputRecord {
            id: "rec-3".into(),
            status: RecordStatus::ProcessingFailed,
            payload: Bytes::from_static(b"not-valid"),
            partition_key: PartitionKey::Errors,
        };

        let json = serde_json::to_value(ResponseRecord::from_output(&output))
            .expect("response serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "recordId": "rec-3",
                "result": "ProcessingFailed",
                "data": "not-valid"
            })
        );
    }

    #[test]
    fn envelope_round_trips() {
        let event: TransformationEvent =
            serde_json::from_str(INGRESS).expect("ingress deserializes");
        let text = serde_json::to_string(&event).expect("serializes");
        let again: TransformationEvent = serde_json::from_str(&text).expect("round trip");
        assert_eq!(event, again);
    }
}
