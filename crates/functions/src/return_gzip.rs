//! This module contains the [DocumentPayloadFunction], deployed as `return-gzip`.

use crate::{
    traces::{debug, info},
    Function, SourceStore,
};
use gzip_envelope::{CompressedEnvelope, OutboundRequest, OutboundResponse, Result};

/// The [DocumentPayloadFunction] returns its source document as a gzip envelope. The
/// document text is compressed exactly as stored, without being parsed or
/// re-serialized.
#[derive(Debug, Clone)]
pub struct DocumentPayloadFunction<S> {
    source: S,
}

impl<S: SourceStore> DocumentPayloadFunction<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: SourceStore> Function for DocumentPayloadFunction<S> {
    const NAME: &'static str = "return-gzip";

    type Event = OutboundRequest;
    type Response = OutboundResponse;

    fn invoke(&self, _: OutboundRequest) -> Result<OutboundResponse> {
        info!(target: "gzip-functions::return-gzip", "> handler");

        let data = self.source.load()?;
        let envelope = CompressedEnvelope::seal(data.as_bytes())?;

        debug!(target: "gzip-functions::return-gzip", "data.length={}", data.len());
        debug!(target: "gzip-functions::return-gzip", "compressedData.length={}", envelope.encoded.len());

        Ok(envelope.into_response())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{FileSource, StaticSource};
    use gzip_envelope::{open_envelope, TransportError};

    #[test]
    fn document_is_passed_through_verbatim() {
        // Not canonical JSON, and not even an array.
        let text = "{\n    \"records\" : [ 1,2 ,3 ]\n}\n";
        let response = DocumentPayloadFunction::new(StaticSource::new(text))
            .invoke(OutboundRequest::default())
            .unwrap();

        assert!(response.is_base64_encoded);
        assert_eq!(response.headers.content_encoding, "gzip");
        assert_eq!(open_envelope(&response.body).unwrap(), text);
    }

    #[test]
    fn missing_document_is_a_payload_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let function = DocumentPayloadFunction::new(FileSource::new(dir.path().join("nope.json")));

        let err = function.invoke(OutboundRequest::default()).unwrap_err();
        assert!(matches!(err, TransportError::PayloadRead(_)), "got {err:?}");
    }
}
