//! The `get-gzip` subcommand for the gzip-demo binary

use super::{print_response, DemoSubcommandDispatcher, SourceArgs};
use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use gzip_envelope::OutboundRequest;
use gzip_functions::{Function, JsonLayout, ReplicatedPayloadFunction};

/// Command line arguments for `gzip-demo get-gzip`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct GetGzipArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// How many times the source records are repeated in the payload.
    #[arg(long, env = "GZIP_DEMO_REPLICATION", default_value_t = 1)]
    replication: usize,

    /// The layout of the serialized payload: `compact` or `pretty` (two-space indentation).
    #[arg(long, default_value = "compact")]
    layout: JsonLayout,
}

#[async_trait]
impl DemoSubcommandDispatcher for GetGzipArgs {
    async fn dispatch(self) -> Result<()> {
        tracing::info!(target: "gzip-demo::get-gzip", "Invoking get-gzip with replication = {}, layout = {}", self.replication, self.layout);

        let function = ReplicatedPayloadFunction::new(self.source.file())
            .with_replication(self.replication)
            .with_layout(self.layout);

        print_response("get-gzip", function.respond(OutboundRequest::default()))
    }
}
