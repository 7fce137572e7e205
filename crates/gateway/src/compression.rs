//! Minimum-size response compression applied by the API routes

use crate::GatewayResponse;
use axum::http::{header, HeaderMap, HeaderValue};
use gzip_envelope::{compress_bytes, CONTENT_ENCODING_GZIP};

/// Check whether the client's `accept-encoding` admits gzip. A `q=0` weight opts out.
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|coding| {
            let mut parts = coding.split(';').map(str::trim);
            let name = parts.next().unwrap_or_default();
            if !(name.eq_ignore_ascii_case("gzip") || name == "*") {
                return false;
            }
            let weight = parts
                .filter_map(|p| p.strip_prefix("q="))
                .filter_map(|q| q.parse::<f32>().ok())
                .next()
                .unwrap_or(1.0);
            weight > 0.0
        })
}

/// Gzips responses of at least `min_size` bytes, the way the deployed API gateway does
/// once a minimum compression size is configured.
#[derive(Debug, Clone, Copy)]
pub struct MinSizeCompression {
    min_size: usize,
}

impl MinSizeCompression {
    pub fn new(min_size: usize) -> Self {
        Self { min_size }
    }

    /// Check if a response should be compressed
    fn should_compress(&self, response: &GatewayResponse) -> bool {
        !response.headers.contains_key(header::CONTENT_ENCODING)
            && response.body.len() >= self.min_size
    }

    /// Compress `response` if the client accepts gzip and the response qualifies.
    /// Responses that already declare an encoding are never compressed twice.
    pub fn apply(&self, accept_gzip: bool, mut response: GatewayResponse) -> GatewayResponse {
        if !accept_gzip || !self.should_compress(&response) {
            return response;
        }

        match compress_bytes(&response.body) {
            Ok(compressed) => {
                tracing::debug!(
                    target: "gzip-gateway::compression",
                    "Compressed response {} -> {} bytes",
                    response.body.len(),
                    compressed.len()
                );
                response.body = compressed;
                response.headers.insert(
                    header::CONTENT_ENCODING,
                    HeaderValue::from_static(CONTENT_ENCODING_GZIP),
                );
                response
                    .headers
                    .append(header::VARY, HeaderValue::from_static("accept-encoding"));
            }
            Err(e) => {
                tracing::warn!(target: "gzip-gateway::compression", "Sending response uncompressed: {e}");
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use gzip_envelope::decompress_bytes;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(value));
        headers
    }

    fn json(len: usize) -> GatewayResponse {
        let mut response = GatewayResponse::text(StatusCode::OK, &"x".repeat(len));
        response
            .headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    #[test]
    fn test_accepts_gzip() {
        assert!(accepts_gzip(&accept("gzip")));
        assert!(accepts_gzip(&accept("deflate, GZIP;q=0.5, br")));
        assert!(accepts_gzip(&accept("*")));
        assert!(!accepts_gzip(&accept("gzip;q=0")));
        assert!(!accepts_gzip(&accept("br, deflate")));
        assert!(!accepts_gzip(&HeaderMap::new()));
    }

    #[test]
    fn test_threshold() {
        let policy = MinSizeCompression::new(1024);

        let small = policy.apply(true, json(1023));
        assert!(!small.headers.contains_key(header::CONTENT_ENCODING));
        assert_eq!(small.body.len(), 1023);

        let large = policy.apply(true, json(1024));
        assert_eq!(large.headers[header::CONTENT_ENCODING], "gzip");
        assert_eq!(large.headers[header::VARY], "accept-encoding");
        assert_eq!(decompress_bytes(&large.body).unwrap(), "x".repeat(1024).into_bytes());
    }

    #[test]
    fn test_client_without_gzip() {
        let policy = MinSizeCompression::new(0);
        let response = policy.apply(false, json(4096));
        assert!(!response.headers.contains_key(header::CONTENT_ENCODING));
    }

    #[test]
    fn test_already_encoded_is_untouched() {
        let policy = MinSizeCompression::new(0);
        let mut response = json(4096);
        response
            .headers
            .insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        let response = policy.apply(true, response);
        assert_eq!(response.body.len(), 4096);
        assert!(!response.headers.contains_key(header::VARY));
    }
}
