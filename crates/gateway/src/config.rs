//! Configuration for the local front door

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path};

/// Front door configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Address to listen on
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Minimum response size the API routes compress (in bytes)
    #[serde(default = "default_min_compression_size")]
    pub min_compression_size: usize,

    /// Request content types handed to functions as base64
    #[serde(default = "default_binary_media_types")]
    pub binary_media_types: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            min_compression_size: default_min_compression_size(),
            binary_media_types: default_binary_media_types(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_min_compression_size() -> usize {
    1024
}

fn default_binary_media_types() -> Vec<String> {
    vec!["application/gzip".to_string()]
}

impl GatewayConfig {
    /// Load a JSON configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gateway config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse gateway config {}", path.display()))
    }

    /// Check if a request content type is in the binary media type allowlist.
    /// Parameters such as `; charset=...` are ignored.
    pub fn is_binary_media_type(&self, content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        self.binary_media_types
            .iter()
            .any(|t| t == "*/*" || t.eq_ignore_ascii_case(&essence))
    }
}
