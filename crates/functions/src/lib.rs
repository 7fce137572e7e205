#![doc = include_str!("../README.md")]

pub(crate) mod traces;

mod traits;
pub use traits::{Function, SourceStore};

mod source;
pub use source::{CachedSource, FileSource, StaticSource};

mod types;
pub use types::JsonLayout;

mod get_gzip;
pub use get_gzip::{replicate_records, ReplicatedPayloadFunction};

mod return_gzip;
pub use return_gzip::DocumentPayloadFunction;

mod receive_gzip;
pub use receive_gzip::DecompressionFunction;
