//! Translation between HTTP messages and proxy events

use crate::GatewayConfig;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use gzip_envelope::{decode_base64, encode_base64, InboundRequest, OutboundRequest, ProxyResponse};

/// A fully buffered HTTP response on its way back to the client.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl GatewayResponse {
    /// A plain text response produced by the front door itself.
    pub fn text(status: StatusCode, message: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self {
            status,
            headers,
            body: message.as_bytes().to_vec(),
        }
    }

    /// Translate a function's proxy response.
    ///
    /// Headers are copied as declared; `content-type` defaults to JSON. A base64 body
    /// is decoded back into raw bytes, and a body that fails to decode is a `502`.
    pub fn from_proxy(response: &impl ProxyResponse) -> Self {
        let status = StatusCode::from_u16(response.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if response.is_base64_encoded() {
            match decode_base64(response.body()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(target: "gzip-gateway::event", "Function returned an invalid base64 body: {e}");
                    return Self::text(StatusCode::BAD_GATEWAY, "invalid function response");
                }
            }
        } else {
            response.body().as_bytes().to_vec()
        };

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(HeaderName::from_static(name), value);
                }
                Err(_) => {
                    tracing::warn!(target: "gzip-gateway::event", "Dropping invalid {name} header");
                }
            }
        }
        headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        Self {
            status,
            headers,
            body,
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Build the event for an outbound function from the request headers.
pub fn outbound_event(headers: &HeaderMap) -> OutboundRequest {
    OutboundRequest {
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
    }
}

/// Build the event for the decompression function from an HTTP request.
///
/// Bodies with a binary media type, or with any `content-encoding`, are passed along
/// base64-encoded and flagged. Any other body is passed along as text; a text body
/// that is not UTF-8 is rejected with a `400`.
pub fn inbound_event(
    config: &GatewayConfig,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<InboundRequest, GatewayResponse> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let is_binary = config.is_binary_media_type(content_type)
        || headers.contains_key(header::CONTENT_ENCODING);

    if is_binary {
        return Ok(InboundRequest {
            is_base64_encoded: true,
            body: encode_base64(&body),
        });
    }

    match String::from_utf8(body.to_vec()) {
        Ok(text) => Ok(InboundRequest {
            is_base64_encoded: false,
            body: text,
        }),
        Err(_) => Err(GatewayResponse::text(
            StatusCode::BAD_REQUEST,
            "request body is not UTF-8 text",
        )),
    }
}
