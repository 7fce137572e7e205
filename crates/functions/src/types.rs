//! This module contains the types used by the gzip-functions crate.

use gzip_envelope::Result;
use serde::Serialize;
use std::{fmt::Display, str::FromStr};

/// The [JsonLayout] enum selects how a payload is laid out when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonLayout {
    /// No insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation, one value per line.
    Pretty,
}

impl JsonLayout {
    /// Serializes `value` as JSON text in this layout.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(match self {
            JsonLayout::Compact => serde_json::to_string(value)?,
            JsonLayout::Pretty => serde_json::to_string_pretty(value)?,
        })
    }
}

impl FromStr for JsonLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compact" => Ok(JsonLayout::Compact),
            "pretty" => Ok(JsonLayout::Pretty),
            _ => Err(format!("Invalid JSON layout: {}", s)),
        }
    }
}

impl Display for JsonLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonLayout::Compact => write!(f, "compact"),
            JsonLayout::Pretty => write!(f, "pretty"),
        }
    }
}
