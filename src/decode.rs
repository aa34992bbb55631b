//! Transport payload decoding.
//!
//! Turns the opaque blob carried by an [`IncomingRecord`](crate::IncomingRecord)
//! into a [`DecodedEvent`], or flags it as unparseable with a typed
//! [`DecodeError`]. Decode failures are permanent: this component never
//! retries them, and no partial event is ever produced.
//!
//! The payload arrives base64-wrapped from the delivery service, so decoding
//! is two steps: unwrap the base64, then parse the JSON event inside. The
//! per-record size limit is owned by the delivery service and is not enforced
//! here.
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config::RouterConfig;
use crate::error::DecodeError;
use crate::types::DecodedEvent;

/// Decodes an opaque transport payload into a structured event.
///
/// On success the returned event preserves every original field verbatim and
/// carries a normalized lookup of the decision field named by
/// `cfg.decision_field`. A decision field that is present but not a JSON
/// string is treated as absent; the payload itself is well-formed, so that
/// is a classification question, not a decode failure.
///
/// # Errors
///
/// - [`DecodeError::InvalidEncoding`] if the payload is not valid base64
/// - [`DecodeError::InvalidStructure`] if the decoded bytes are not a JSON
///   object
///
/// # Examples
///
/// ```rust
/// use fwlog::{decode, RouterConfig};
///
/// let cfg = RouterConfig::default();
/// // {"action":"BLOCK"}
/// let event = decode(b"eyJhY3Rpb24iOiJCTE9DSyJ9", &cfg).unwrap();
/// assert_eq!(event.decision(), Some("BLOCK"));
///
/// assert!(decode(b"not-valid", &cfg).is_err());
/// ```
pub fn decode(payload: &[u8], cfg: &RouterConfig) -> Result<DecodedEvent, DecodeError> {
    let decoded = BASE64
        .decode(payload)
        .map_err(|err| DecodeError::InvalidEncoding(err.to_string()))?;

    let fields: serde_json::Value = serde_json::from_slice(&decoded)
        .map_err(|err| DecodeError::InvalidStructure(err.to_string()))?;

    if !fields.is_object() {
        return Err(DecodeError::InvalidStructure(format!(
            "expected a JSON object, got {}",
            json_kind(&fields)
        )));
    }

    let decision = fields
        .get(cfg.decision_field.as_str())
        .and_then(serde_json::Value::as_str)
        .map(|token| token.trim().to_owned());

    Ok(DecodedEvent { decision, fields })
}

/// JSON type name for error messages.
fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_json(value: &serde_json::Value) -> Vec<u8> {
        let text = serde_json::to_string(value).expect("serialize test event");
        BASE64.encode(text).into_bytes()
    }

    #[test]
    fn decodes_event_and_extracts_decision() {
        let payload = encode_json(&serde_json::json!({
            "action": "BLOCK",
            "httpRequest": { "uri": "/admin", "clientIp": "198.51.100.7" },
        }));

        let event = decode(&payload, &RouterConfig::default()).expect("decode succeeds");
        assert_eq!(event.decision(), Some("BLOCK"));
        assert_eq!(event.fields["httpRequest"]["uri"], "/admin");
    }

    #[test]
    fn decision_token_is_trimmed_but_casing_preserved() {
        let payload = encode_json(&serde_json::json!({ "action": "  Block \n" }));
        let event = decode(&payload, &RouterConfig::default()).expect("decode succeeds");
        assert_eq!(event.decision(), Some("Block"));
    }

    #[test]
    fn missing_decision_field_yields_none() {
        let payload = encode_json(&serde_json::json!({ "httpRequest": {} }));
        let event = decode(&payload, &RouterConfig::default()).expect("decode succeeds");
        assert_eq!(event.decision(), None);
    }

    #[test]
    fn non_string_decision_field_yields_none() {
        for value in [
            serde_json::json!({ "action": 7 }),
            serde_json::json!({ "action": true }),
            serde_json::json!({ "action": null }),
            serde_json::json!({ "action": ["BLOCK"] }),
        ] {
            let event =
                decode(&encode_json(&value), &RouterConfig::default()).expect("decode succeeds");
            assert_eq!(event.decision(), None, "value: {value}");
        }
    }

    #[test]
    fn decision_field_name_comes_from_config() {
        let cfg = RouterConfig {
            decision_field: "verdict".into(),
            ..Default::default()
        };
        let payload = encode_json(&serde_json::json!({ "verdict": "ALLOW", "action": "BLOCK" }));
        let event = decode(&payload, &cfg).expect("decode succeeds");
        assert_eq!(event.decision(), Some("ALLOW"));
    }

    #[test]
    fn invalid_base64_is_an_encoding_error() {
        let res = decode(b"not-valid", &RouterConfig::default());
        assert!(matches!(res, Err(DecodeError::InvalidEncoding(_))));
    }

    #[test]
    fn unparseable_json_is_a_structure_error() {
        let payload = BASE64.encode("{\"action\": ").into_bytes();
        let res = decode(&payload, &RouterConfig::default());
        assert!(matches!(res, Err(DecodeError::InvalidStructure(_))));
    }

    #[test]
    fn non_object_json_is_a_structure_error() {
        for text in ["[1, 2]", "\"BLOCK\"", "42", "null"] {
            let payload = BASE64.encode(text).into_bytes();
            let res = decode(&payload, &RouterConfig::default());
            assert!(
                matches!(res, Err(DecodeError::InvalidStructure(_))),
                "payload text: {text}"
            );
        }
    }

    #[test]
    fn empty_payload_is_a_structure_error() {
        // Empty input is valid base64 for zero bytes; the failure is the
        // missing JSON document inside.
        let res = decode(b"", &RouterConfig::default());
        assert!(matches!(res, Err(DecodeError::InvalidStructure(_))));
    }
}
