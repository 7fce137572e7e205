//! The set of functions served by the front door

use gzip_functions::{
    DecompressionFunction, DocumentPayloadFunction, JsonLayout, ReplicatedPayloadFunction,
    SourceStore,
};
use std::sync::Arc;

/// A source store shared by the outbound functions and across request tasks.
pub type SharedSource = Arc<dyn SourceStore + Send + Sync>;

/// The deployed functions, one of each kind.
pub struct FunctionSet {
    pub get_gzip: ReplicatedPayloadFunction<SharedSource>,
    pub return_gzip: DocumentPayloadFunction<SharedSource>,
    pub receive_gzip: DecompressionFunction,
}

impl FunctionSet {
    /// Deploys all three functions. Both outbound functions read `source`.
    pub fn new(source: SharedSource, replication: usize, layout: JsonLayout) -> Self {
        Self {
            get_gzip: ReplicatedPayloadFunction::new(Arc::clone(&source))
                .with_replication(replication)
                .with_layout(layout),
            return_gzip: DocumentPayloadFunction::new(source),
            receive_gzip: DecompressionFunction,
        }
    }
}
