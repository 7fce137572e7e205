//! This module contains the typed request and response shapes exchanged between an
//! invoking front door and the compression functions.

use crate::{compress_bytes, encode_base64, Result, TransportError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The `content-type` declared on every JSON payload.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The `content-encoding` declared on every compressed payload.
pub const CONTENT_ENCODING_GZIP: &str = "gzip";

/// The [ProxyResponse] trait describes a response that a front door can translate
/// into an HTTP response.
pub trait ProxyResponse {
    /// The HTTP status code.
    fn status_code(&self) -> u16;

    /// The headers declared by the function, as `(name, value)` pairs.
    fn headers(&self) -> Vec<(&'static str, &str)>;

    /// Whether [ProxyResponse::body] is base64 text standing in for raw bytes.
    fn is_base64_encoded(&self) -> bool;

    /// The response body.
    fn body(&self) -> &str;
}

/// The [OutboundRequest] is the event that triggers an outbound function. The
/// outbound functions do not read anything from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
}

/// The headers declared on every [OutboundResponse].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundHeaders {
    #[serde(rename = "content-type")]
    pub content_type: String,
    #[serde(rename = "content-encoding")]
    pub content_encoding: String,
}

impl Default for OutboundHeaders {
    fn default() -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON.to_string(),
            content_encoding: CONTENT_ENCODING_GZIP.to_string(),
        }
    }
}

/// The [OutboundResponse] carries a gzip-compressed JSON payload as base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub is_base64_encoded: bool,
    pub headers: OutboundHeaders,
    pub status_code: u16,
    pub body: String,
}

impl ProxyResponse for OutboundResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("content-type", self.headers.content_type.as_str()),
            ("content-encoding", self.headers.content_encoding.as_str()),
        ]
    }

    fn is_base64_encoded(&self) -> bool {
        self.is_base64_encoded
    }

    fn body(&self) -> &str {
        &self.body
    }
}

/// The [CompressedEnvelope] is the wire form of an outbound payload: the gzip bytes
/// and their base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedEnvelope {
    /// The gzip stream.
    pub compressed: Vec<u8>,
    /// The base64 text of [CompressedEnvelope::compressed].
    pub encoded: String,
}

impl CompressedEnvelope {
    /// Compresses and encodes `payload`.
    pub fn seal(payload: &[u8]) -> Result<Self> {
        let compressed = compress_bytes(payload)?;
        let encoded = encode_base64(&compressed);
        Ok(Self {
            compressed,
            encoded,
        })
    }

    /// Wraps the envelope into a `200` [OutboundResponse] declaring
    /// `content-encoding: gzip`.
    pub fn into_response(self) -> OutboundResponse {
        OutboundResponse {
            is_base64_encoded: true,
            headers: OutboundHeaders::default(),
            status_code: 200,
            body: self.encoded,
        }
    }
}

/// The [InboundRequest] is the event consumed by the decompression function. A
/// missing or `null` body is treated as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// The [DecodedReport] summarizes one inbound decompression attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedReport {
    /// The encoding flag as received.
    pub is_base64_encoded: bool,
    /// Length of the body as received, in bytes. For an encoded body this is the
    /// length of the base64 text.
    pub request_body_length: usize,
    /// Length of the decompressed UTF-8 text, in bytes. Only present when the body
    /// was flagged as encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decompressed_body_length: Option<usize>,
}

/// The [InboundResponse] carries a [DecodedReport] as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundResponse {
    pub status_code: u16,
    pub body: String,
}

impl InboundResponse {
    /// Serializes `report` into a `200` [InboundResponse].
    pub fn from_report(report: &DecodedReport) -> Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(report)?,
        })
    }

    /// Parses the [DecodedReport] back out of the body.
    pub fn report(&self) -> Result<DecodedReport> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

impl ProxyResponse for InboundResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![]
    }

    fn is_base64_encoded(&self) -> bool {
        false
    }

    fn body(&self) -> &str {
        &self.body
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

/// The [ErrorResponse] is returned in place of a function's response when the
/// invocation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub body: String,
}

impl ErrorResponse {
    /// Builds a `500` response naming the error kind and its public message.
    pub fn from_error(err: &TransportError) -> Self {
        let body = ErrorBody {
            error: err.kind(),
            message: err.public_message(),
        };
        Self {
            status_code: 500,
            // Two static strings always serialize.
            body: serde_json::to_string(&body).unwrap_or_default(),
        }
    }
}

impl ProxyResponse for ErrorResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![]
    }

    fn is_base64_encoded(&self) -> bool {
        false
    }

    fn body(&self) -> &str {
        &self.body
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
