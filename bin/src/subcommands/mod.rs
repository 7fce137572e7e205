//! Subcommands for the `gzip-demo` binary

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::{Args, Subcommand};
use gzip_envelope::ErrorResponse;
use gzip_functions::FileSource;
use serde::Serialize;
use std::path::PathBuf;

mod get_gzip;
mod receive_gzip;
mod return_gzip;
mod serve;

#[async_trait]
pub(crate) trait DemoSubcommandDispatcher {
    /// Dispatches the subcommand
    async fn dispatch(self) -> Result<()>;
}

/// The subcommands for the `gzip-demo` binary
#[derive(Subcommand, Debug)]
pub(crate) enum DemoSubcommand {
    GetGzip(get_gzip::GetGzipArgs),
    ReturnGzip(return_gzip::ReturnGzipArgs),
    ReceiveGzip(receive_gzip::ReceiveGzipArgs),
    Serve(serve::ServeArgs),
}

#[async_trait]
impl DemoSubcommandDispatcher for DemoSubcommand {
    async fn dispatch(self) -> Result<()> {
        match self {
            DemoSubcommand::GetGzip(args) => args.dispatch().await,
            DemoSubcommand::ReturnGzip(args) => args.dispatch().await,
            DemoSubcommand::ReceiveGzip(args) => args.dispatch().await,
            DemoSubcommand::Serve(args) => args.dispatch().await,
        }
    }
}

/// Command line arguments selecting the source document of the outbound functions
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// The path to the source JSON document.
    #[arg(long, env = "GZIP_DEMO_SOURCE", default_value = "data/data.json")]
    source: PathBuf,
}

impl SourceArgs {
    /// Builds a store reading the source document on every load.
    pub(crate) fn file(&self) -> FileSource {
        FileSource::new(&self.source)
    }
}

/// Prints a function's response, or its error response, as JSON on stdout. An error
/// response is also reported as a failure of the subcommand.
pub(crate) fn print_response<R: Serialize>(
    name: &str,
    response: std::result::Result<R, ErrorResponse>,
) -> Result<()> {
    match response {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&error)?);
            Err(anyhow!("{name} responded with status {}", error.status_code))
        }
    }
}
