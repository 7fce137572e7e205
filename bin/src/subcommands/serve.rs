//! The `serve` subcommand for the gzip-demo binary

use super::{DemoSubcommandDispatcher, SourceArgs};
use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use gzip_functions::{CachedSource, JsonLayout};
use gzip_gateway::{FunctionSet, GatewayConfig, SharedSource};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

/// Command line arguments for `gzip-demo serve`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// How many times the source records are repeated in the `get-gzip` payload.
    #[arg(long, env = "GZIP_DEMO_REPLICATION", default_value_t = 1)]
    replication: usize,

    /// The layout of the `get-gzip` payload: `compact` or `pretty` (two-space indentation).
    #[arg(long, default_value = "compact")]
    layout: JsonLayout,

    /// Load the source document once and share it between both outbound functions.
    #[arg(long)]
    cache_source: bool,

    /// A JSON gateway configuration file. Flags given on the command line win over it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// The address to listen on.
    #[arg(long, env = "GZIP_DEMO_BIND")]
    bind: Option<SocketAddr>,

    /// Minimum response size, in bytes, that the API routes compress.
    #[arg(long)]
    min_compression_size: Option<usize>,

    /// Request content types handed to functions base64-encoded. Repeatable.
    #[arg(long = "binary-media-type")]
    binary_media_types: Vec<String>,
}

impl ServeArgs {
    /// Builds the source store shared by the deployed functions.
    fn store(&self) -> SharedSource {
        let file = self.source.file();
        if self.cache_source {
            Arc::new(CachedSource::new(file))
        } else {
            Arc::new(file)
        }
    }

    /// Resolves the gateway configuration: defaults, then the config file, then flags.
    fn gateway_config(&self) -> Result<GatewayConfig> {
        let mut config = match self.config {
            Some(ref path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(min_compression_size) = self.min_compression_size {
            config.min_compression_size = min_compression_size;
        }
        if !self.binary_media_types.is_empty() {
            config.binary_media_types = self.binary_media_types.clone();
        }
        Ok(config)
    }
}

#[async_trait]
impl DemoSubcommandDispatcher for ServeArgs {
    async fn dispatch(self) -> Result<()> {
        let config = self.gateway_config()?;

        tracing::info!(target: "gzip-demo::serve", "Serving functions with replication = {}, layout = {}, cache_source = {}", self.replication, self.layout, self.cache_source);
        let functions = FunctionSet::new(self.store(), self.replication, self.layout);

        gzip_gateway::serve(functions, config).await
    }
}
