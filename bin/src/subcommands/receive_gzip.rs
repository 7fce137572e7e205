//! The `receive-gzip` subcommand for the gzip-demo binary

use super::{print_response, DemoSubcommandDispatcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use gzip_envelope::{CompressedEnvelope, InboundRequest};
use gzip_functions::{DecompressionFunction, Function};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

/// Command line arguments for `gzip-demo receive-gzip`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct ReceiveGzipArgs {
    /// The path to a JSON invocation event (`{ "isBase64Encoded": ..., "body": ... }`).
    /// The event is read from stdin if set to `-`.
    #[arg(long, conflicts_with = "payload", required_unless_present = "payload")]
    event: Option<String>,

    /// The path to a payload file. The payload is gzip-compressed and base64-encoded
    /// into an event, the way a client would send it.
    #[arg(long)]
    payload: Option<PathBuf>,
}

impl ReceiveGzipArgs {
    /// Builds the invocation event described by the arguments.
    fn event(&self) -> Result<InboundRequest> {
        if let Some(ref path) = self.payload {
            let payload = fs::read(path)
                .with_context(|| format!("Failed to read payload {}", path.display()))?;
            let envelope = CompressedEnvelope::seal(&payload)?;
            tracing::info!(target: "gzip-demo::receive-gzip", "Compressed payload {} -> {} bytes", payload.len(), envelope.compressed.len());
            return Ok(InboundRequest {
                is_base64_encoded: true,
                body: envelope.encoded,
            });
        }

        let raw = match self.event.as_deref() {
            Some("-") | None => {
                let mut raw = String::new();
                io::stdin().read_to_string(&mut raw)?;
                raw
            }
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read event {path}"))?,
        };
        serde_json::from_str(&raw).context("Failed to parse invocation event")
    }
}

#[async_trait]
impl DemoSubcommandDispatcher for ReceiveGzipArgs {
    async fn dispatch(self) -> Result<()> {
        let event = self.event()?;
        tracing::info!(target: "gzip-demo::receive-gzip", "Invoking receive-gzip with a {} byte body", event.body.len());

        print_response("receive-gzip", DecompressionFunction.respond(event))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gzip_envelope::open_envelope;

    #[test]
    fn event_from_payload_is_encoded() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[1,2,3]").unwrap();

        let args = ReceiveGzipArgs {
            event: None,
            payload: Some(file.path().to_path_buf()),
        };
        let event = args.event().unwrap();
        assert!(event.is_base64_encoded);
        assert_eq!(open_envelope(&event.body).unwrap(), "[1,2,3]");
    }

    #[test]
    fn event_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{ "isBase64Encoded": false, "body": "hi" }"#).unwrap();

        let args = ReceiveGzipArgs {
            event: Some(file.path().to_str().unwrap().to_string()),
            payload: None,
        };
        let event = args.event().unwrap();
        assert!(!event.is_base64_encoded);
        assert_eq!(event.body, "hi");
    }

    #[tokio::test]
    async fn malformed_event_body_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{ "isBase64Encoded": true, "body": "!!" }"#).unwrap();

        let args = ReceiveGzipArgs {
            event: Some(file.path().to_str().unwrap().to_string()),
            payload: None,
        };
        assert!(args.dispatch().await.is_err());
    }
}
