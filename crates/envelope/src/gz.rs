//! This module contains utilities for compressing, decompressing and base64 encoding
//! payload bytes.

use crate::{traces::debug, Result, TransportError};
use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};
use std::io::{Read, Write};

/// Compresses a byte slice using gzip at the default compression level.
///
/// The gzip header is written without a modification time, so identical input always
/// yields identical output.
pub fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| TransportError::Serialization(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| TransportError::Serialization(e.to_string()))
}

/// Decompresses a gzip byte slice. Every member of a multi-member stream is
/// decompressed, in order.
pub fn decompress_bytes(compressed_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(compressed_bytes);

    // Give our decompressed buffer the same capacity as the compressed buffer. It'll still
    // reallocate, but less.
    let mut decompressed_bytes = Vec::with_capacity(compressed_bytes.len());
    decoder
        .read_to_end(&mut decompressed_bytes)
        .map_err(|e| TransportError::Decompression(e.to_string()))?;

    Ok(decompressed_bytes)
}

/// Encodes bytes as standard, padded base64 text.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard, padded base64 text. Any malformed input is a
/// [TransportError::Decode].
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

/// Opens a base64 gzip envelope, returning the UTF-8 text it carries.
///
/// ### Takes
/// - `body`: The base64 text of a gzip stream.
///
/// ### Returns
/// - `Ok(text)`: The decompressed text.
/// - `Err(TransportError::Decode)`: `body` is not valid base64.
/// - `Err(TransportError::Decompression)`: the decoded bytes are not gzip, or do not
///   decompress to UTF-8.
pub fn open_envelope(body: &str) -> Result<String> {
    let compressed = decode_base64(body)?;
    let decompressed = decompress_bytes(&compressed)?;
    debug!(
        target: "gzip-envelope::gz",
        "Opened envelope: {} compressed bytes -> {} bytes",
        compressed.len(),
        decompressed.len()
    );

    String::from_utf8(decompressed).map_err(|e| TransportError::Decompression(e.to_string()))
}
