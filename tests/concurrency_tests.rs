//! Concurrency tests for the router.
//!
//! The delivery layer may run many invocations in parallel across threads or
//! processes. The pipeline holds no shared mutable state, so concurrent
//! invocations over the same data must always agree with a sequential run.

use std::thread;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use fwlog::{IncomingRecord, OutputRecord, RouterConfig, process};

fn build_batch(tag: usize) -> Vec<IncomingRecord> {
    (0..32)
        .map(|i| {
            let text = match i % 4 {
                0 => r#"{"action":"BLOCK"}"#.to_owned(),
                1 => r#"{"action":"allow"}"#.to_owned(),
                2 => format!(r#"{{"uri":"/batch-{tag}/record-{i}"}}"#),
                _ => return IncomingRecord {
                    id: format!("b{tag}-r{i}"),
                    payload: Bytes::from_static(b"not base64 at all"),
                },
            };
            IncomingRecord {
                id: format!("b{tag}-r{i}"),
                payload: Bytes::from(BASE64.encode(text).into_bytes()),
            }
        })
        .collect()
}

#[test]
fn parallel_invocations_match_sequential_results() {
    let cfg = RouterConfig::default();

    let expected: Vec<Vec<OutputRecord>> = (0..8)
        .map(|tag| process(&build_batch(tag), &cfg).expect("sequential run"))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|tag| {
            let cfg = cfg.clone();
            thread::spawn(move || process(&build_batch(tag), &cfg).expect("parallel run"))
        })
        .collect();

    for (tag, handle) in handles.into_iter().enumerate() {
        let outputs = handle.join().expect("thread completes");
        assert_eq!(outputs, expected[tag], "batch {tag}");
    }
}

#[test]
fn same_batch_processed_concurrently_agrees_everywhere() {
    let cfg = RouterConfig::default();
    let batch = build_batch(0);
    let reference = process(&batch, &cfg).expect("reference run");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cfg = cfg.clone();
            let batch = batch.clone();
            thread::spawn(move || process(&batch, &cfg).expect("concurrent run"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), reference);
    }
}
