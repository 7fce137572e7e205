//! This module contains the [ReplicatedPayloadFunction], deployed as `get-gzip`.

use crate::{traces::info, Function, JsonLayout, SourceStore};
use gzip_envelope::{
    CompressedEnvelope, OutboundRequest, OutboundResponse, Result, TransportError,
};
use serde_json::Value;

/// Repeats the whole of `records` `factor` times by concatenation. Record order is
/// kept within and across the copies.
///
/// ### Takes
/// - `records`: The records to repeat.
/// - `factor`: The number of copies.
///
/// ### Returns
/// - `Ok(replicated)`: The concatenated copies. Empty when either `records` is empty
///   or `factor` is zero.
/// - `Err(TransportError::Serialization)`: the replicated sequence cannot be
///   allocated.
pub fn replicate_records<T: Clone>(records: &[T], factor: usize) -> Result<Vec<T>> {
    if records.is_empty() || factor == 0 {
        return Ok(Vec::new());
    }

    let total = records.len().checked_mul(factor).ok_or_else(|| {
        TransportError::Serialization(format!(
            "replicating {} records {} times overflows",
            records.len(),
            factor
        ))
    })?;

    let mut replicated = Vec::new();
    replicated
        .try_reserve_exact(total)
        .map_err(|e| TransportError::Serialization(format!("cannot hold {total} records: {e}")))?;
    for _ in 0..factor {
        replicated.extend_from_slice(records);
    }
    Ok(replicated)
}

/// The [ReplicatedPayloadFunction] loads a JSON array of records, replicates it,
/// serializes the result and returns it as a gzip envelope. Replication simulates a
/// large payload built from a small source document.
#[derive(Debug, Clone)]
pub struct ReplicatedPayloadFunction<S> {
    /// The store holding the source records.
    source: S,
    /// How many copies of the source records the payload holds.
    replication: usize,
    /// The layout of the serialized payload.
    layout: JsonLayout,
}

impl<S: SourceStore> ReplicatedPayloadFunction<S> {
    /// Creates a new [ReplicatedPayloadFunction] with a replication factor of 1 and a
    /// compact layout.
    pub fn new(source: S) -> Self {
        Self {
            source,
            replication: 1,
            layout: JsonLayout::default(),
        }
    }

    pub fn with_replication(mut self, replication: usize) -> Self {
        self.replication = replication;
        self
    }

    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn replication(&self) -> usize {
        self.replication
    }

    /// Loads the source records and builds the serialized, replicated payload.
    pub fn payload(&self) -> Result<String> {
        let text = self.source.load()?;
        let records: Vec<Value> = serde_json::from_str(&text).map_err(|e| {
            TransportError::PayloadRead(format!("source document is not a JSON array: {e}"))
        })?;

        let replicated = replicate_records(&records, self.replication)?;
        self.layout.serialize(&replicated)
    }
}

impl<S: SourceStore> Function for ReplicatedPayloadFunction<S> {
    const NAME: &'static str = "get-gzip";

    type Event = OutboundRequest;
    type Response = OutboundResponse;

    fn invoke(&self, _: OutboundRequest) -> Result<OutboundResponse> {
        info!(target: "gzip-functions::get-gzip", "> handler replication={}", self.replication);

        let data = self.payload()?;
        let envelope = CompressedEnvelope::seal(data.as_bytes())?;

        info!(target: "gzip-functions::get-gzip", "data.length={}", data.len());
        info!(target: "gzip-functions::get-gzip", "compressedData.length={}", envelope.encoded.len());

        Ok(envelope.into_response())
    }
}
