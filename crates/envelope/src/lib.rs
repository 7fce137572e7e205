#![doc = include_str!("../README.md")]

pub(crate) mod traces;

mod errors;
pub use errors::{Result, TransportError};

pub mod gz;
pub use gz::{compress_bytes, decode_base64, decompress_bytes, encode_base64, open_envelope};

mod types;
pub use types::{
    CompressedEnvelope, DecodedReport, ErrorResponse, InboundRequest, InboundResponse,
    OutboundHeaders, OutboundRequest, OutboundResponse, ProxyResponse, CONTENT_ENCODING_GZIP,
    CONTENT_TYPE_JSON,
};
