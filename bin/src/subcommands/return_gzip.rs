//! The `return-gzip` subcommand for the gzip-demo binary

use super::{print_response, DemoSubcommandDispatcher, SourceArgs};
use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use gzip_envelope::OutboundRequest;
use gzip_functions::{DocumentPayloadFunction, Function};

/// Command line arguments for `gzip-demo return-gzip`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct ReturnGzipArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[async_trait]
impl DemoSubcommandDispatcher for ReturnGzipArgs {
    async fn dispatch(self) -> Result<()> {
        tracing::info!(target: "gzip-demo::return-gzip", "Invoking return-gzip");

        let function = DocumentPayloadFunction::new(self.source.file());
        print_response("return-gzip", function.respond(OutboundRequest::default()))
    }
}
