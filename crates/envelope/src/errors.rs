//! This module contains the error taxonomy of the transport contract.

use crate::ErrorResponse;

/// Result type alias using [`TransportError`]
pub type Result<T, E = TransportError> = std::result::Result<T, E>;

/// The [TransportError] enum covers every way a single invocation can fail. All of
/// the variants are terminal for the invocation: nothing is retried and no partial
/// response is produced.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The source document is missing, unreadable, or not shaped as expected.
    #[error("source document unavailable: {0}")]
    PayloadRead(String),

    /// An in-memory payload could not be turned into text or bytes. This points at a
    /// defect rather than at bad input.
    #[error("payload serialization failed: {0}")]
    Serialization(String),

    /// The request body is not valid base64.
    #[error("request body is not valid base64: {0}")]
    Decode(String),

    /// The decoded request body is not a valid gzip stream of UTF-8 text.
    #[error("request body is not a valid gzip stream: {0}")]
    Decompression(String),
}

impl TransportError {
    /// Returns the stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PayloadRead(_) => "PayloadReadError",
            Self::Serialization(_) => "SerializationError",
            Self::Decode(_) => "DecodeError",
            Self::Decompression(_) => "DecompressionError",
        }
    }

    /// Returns a short description of the failure that is safe to hand back to a
    /// caller. Unlike the [std::fmt::Display] output it never includes paths or
    /// parser internals.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::PayloadRead(_) => "source document unavailable",
            Self::Serialization(_) => "payload could not be serialized",
            Self::Decode(_) => "request body is not valid base64",
            Self::Decompression(_) => "request body could not be decompressed",
        }
    }

    /// Converts the error into the `500` [ErrorResponse] returned to the caller.
    pub fn into_response(self) -> ErrorResponse {
        ErrorResponse::from_error(&self)
    }
}

impl From<base64::DecodeError> for TransportError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(TransportError::PayloadRead("x".into()).kind(), "PayloadReadError");
        assert_eq!(TransportError::Serialization("x".into()).kind(), "SerializationError");
        assert_eq!(TransportError::Decode("x".into()).kind(), "DecodeError");
        assert_eq!(TransportError::Decompression("x".into()).kind(), "DecompressionError");
    }

    #[test]
    fn public_message_hides_cause() {
        let err = TransportError::PayloadRead("/srv/secret/data.json: permission denied".into());
        assert!(err.to_string().contains("/srv/secret"));
        assert!(!err.public_message().contains("/srv/secret"));
    }
}
