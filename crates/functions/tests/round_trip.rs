//! Round trips payloads from the outbound functions through the decompression function.

use gzip_envelope::{InboundRequest, OutboundRequest, OutboundResponse};
use gzip_functions::{
    CachedSource, DecompressionFunction, DocumentPayloadFunction, FileSource, Function,
    ReplicatedPayloadFunction, StaticSource,
};
use proptest::{collection::vec, prelude::any, proptest};
use serde_json::{json, Value};
use std::sync::Arc;

/// Hands an outbound response to the decompression function the way a front door
/// would, and returns the reported decompressed length.
fn receive(response: &OutboundResponse) -> usize {
    let event = InboundRequest {
        is_base64_encoded: response.is_base64_encoded,
        body: response.body.clone(),
    };
    let report = DecompressionFunction.invoke(event).unwrap().report().unwrap();

    assert!(report.is_base64_encoded);
    assert_eq!(report.request_body_length, response.body.len());
    report.decompressed_body_length.unwrap()
}

proptest! {
    #[test]
    fn test_round_trip(records in vec((any::<i64>(), "[a-z ]{0,12}", any::<bool>()), 0..16), factor in 1usize..4) {
        let source: Value = records
            .iter()
            .map(|(id, name, active)| json!({ "id": id, "name": name, "active": active }))
            .collect();
        let text = serde_json::to_string(&source).unwrap();

        let function = ReplicatedPayloadFunction::new(StaticSource::new(text.as_str()))
            .with_replication(factor);
        let response = function.invoke(OutboundRequest::default()).unwrap();
        let payload = gzip_envelope::open_envelope(&response.body).unwrap();

        let decoded: Vec<Value> = serde_json::from_str(&payload).unwrap();
        let source = source.as_array().unwrap();
        assert_eq!(decoded.len(), source.len() * factor);
        for copy in decoded.chunks(source.len().max(1)) {
            assert_eq!(copy, source.as_slice());
        }
        assert_eq!(receive(&response), payload.len());
    }
}

#[test]
fn scenario_reports_exact_serialized_length() {
    let function = ReplicatedPayloadFunction::new(StaticSource::new(r#"[{"a":1},{"a":2}]"#))
        .with_replication(3);
    let response = function.invoke(OutboundRequest::default()).unwrap();

    let expected = r#"[{"a":1},{"a":2},{"a":1},{"a":2},{"a":1},{"a":2}]"#;
    assert_eq!(receive(&response), expected.len());
}

#[test]
fn shared_cache_serves_both_outbound_functions() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "[{\"a\": 1}]\n").unwrap();

    let source = Arc::new(CachedSource::new(FileSource::new(file.path())));
    let replicated = ReplicatedPayloadFunction::new(Arc::clone(&source)).with_replication(2);
    let document = DocumentPayloadFunction::new(Arc::clone(&source));

    let a = replicated.invoke(OutboundRequest::default()).unwrap();
    let b = document.invoke(OutboundRequest::default()).unwrap();
    assert!(source.is_loaded());

    assert_eq!(receive(&a), r#"[{"a":1},{"a":1}]"#.len());
    assert_eq!(receive(&b), "[{\"a\": 1}]\n".len());
}

#[test]
fn outbound_functions_are_idempotent() {
    let document = DocumentPayloadFunction::new(StaticSource::new("[1, 2, 3]"));
    let first = document.invoke(OutboundRequest::default()).unwrap();
    let second = document.invoke(OutboundRequest::default()).unwrap();
    assert_eq!(first, second);
}
