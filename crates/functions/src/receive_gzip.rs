//! This module contains the [DecompressionFunction], deployed as `receive-gzip`.

use crate::{traces::info, Function};
use gzip_envelope::{open_envelope, DecodedReport, InboundRequest, InboundResponse, Result};

/// The [DecompressionFunction] opens a base64 gzip request body and reports the length
/// of what it received and of what it decompressed. A body that is not flagged as
/// base64-encoded is measured but never decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressionFunction;

impl DecompressionFunction {
    /// Builds the [DecodedReport] for `event`.
    pub fn report(&self, event: &InboundRequest) -> Result<DecodedReport> {
        let decompressed_body_length = if event.is_base64_encoded {
            Some(open_envelope(&event.body)?.len())
        } else {
            None
        };

        Ok(DecodedReport {
            is_base64_encoded: event.is_base64_encoded,
            request_body_length: event.body.len(),
            decompressed_body_length,
        })
    }
}

impl Function for DecompressionFunction {
    const NAME: &'static str = "receive-gzip";

    type Event = InboundRequest;
    type Response = InboundResponse;

    fn invoke(&self, event: InboundRequest) -> Result<InboundResponse> {
        info!(target: "gzip-functions::receive-gzip", "> handler isBase64Encoded={}", event.is_base64_encoded);
        InboundResponse::from_report(&self.report(&event)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gzip_envelope::{compress_bytes, encode_base64, TransportError};

    fn encoded(text: &str) -> InboundRequest {
        InboundRequest {
            is_base64_encoded: true,
            body: encode_base64(&compress_bytes(text.as_bytes()).unwrap()),
        }
    }

    #[test]
    fn unflagged_body_is_only_measured() {
        // Valid gzip text, but the flag says otherwise; it must not be opened.
        let mut event = encoded("hello");
        event.is_base64_encoded = false;

        let report = DecompressionFunction.report(&event).unwrap();
        assert_eq!(
            report,
            DecodedReport {
                is_base64_encoded: false,
                request_body_length: event.body.len(),
                decompressed_body_length: None,
            }
        );
    }

    #[test]
    fn unflagged_garbage_is_fine() {
        let event = InboundRequest {
            is_base64_encoded: false,
            body: "%%% not base64, not gzip %%%".to_string(),
        };
        let response = DecompressionFunction.invoke(event).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            r#"{"isBase64Encoded":false,"requestBodyLength":28}"#
        );
    }

    #[test]
    fn flagged_body_is_decompressed() {
        let text = r#"[{"a":1},{"a":2}]"#;
        let event = encoded(text);

        let report = DecompressionFunction.invoke(event.clone()).unwrap().report().unwrap();
        assert!(report.is_base64_encoded);
        assert_eq!(report.request_body_length, event.body.len());
        assert_eq!(report.decompressed_body_length, Some(text.len()));
    }

    #[test]
    fn multi_member_body_is_fully_decompressed() {
        let mut stream = compress_bytes(b"hello ").unwrap();
        stream.extend(compress_bytes(b"world").unwrap());
        let event = InboundRequest {
            is_base64_encoded: true,
            body: encode_base64(&stream),
        };

        let report = DecompressionFunction.report(&event).unwrap();
        assert_eq!(report.request_body_length, event.body.len());
        assert_eq!(report.decompressed_body_length, Some("hello world".len()));
    }

    #[test]
    fn decompressed_length_counts_utf8_bytes() {
        let report = DecompressionFunction.report(&encoded("héllo")).unwrap();
        assert_eq!(report.decompressed_body_length, Some(6));
    }

    #[test]
    fn empty_unflagged_body() {
        let report = DecompressionFunction.report(&InboundRequest::default()).unwrap();
        assert_eq!(report.request_body_length, 0);
        assert_eq!(report.decompressed_body_length, None);
    }

    #[test]
    fn malformed_base64_fails_without_partial_report() {
        let event = InboundRequest {
            is_base64_encoded: true,
            body: "not*base64".to_string(),
        };

        let err = DecompressionFunction.invoke(event.clone()).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");

        let response = DecompressionFunction.respond(event).unwrap_err();
        assert_eq!(response.status_code, 500);
        assert!(response.body.contains("DecodeError"));
        assert!(!response.body.contains("decompressedBodyLength"));
    }

    #[test]
    fn non_gzip_body_is_a_decompression_error() {
        let event = InboundRequest {
            is_base64_encoded: true,
            body: encode_base64(b"{\"plain\":\"json\"}"),
        };

        let err = DecompressionFunction.invoke(event).unwrap_err();
        assert!(matches!(err, TransportError::Decompression(_)), "got {err:?}");
    }
}
