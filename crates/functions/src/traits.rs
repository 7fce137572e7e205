//! This module contains the traits for the gzip-functions crate.

use crate::traces::error;
use gzip_envelope::{ErrorResponse, ProxyResponse, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// The [SourceStore] trait describes a read-only store holding the source document of
/// an outbound function.
pub trait SourceStore {
    /// Loads the full text of the source document.
    ///
    /// ### Returns
    /// - `Ok(text)`: The document text, exactly as stored.
    /// - `Err(TransportError::PayloadRead)`: The document is missing or unreadable.
    fn load(&self) -> Result<Arc<str>>;
}

impl<S: SourceStore + ?Sized> SourceStore for Arc<S> {
    fn load(&self) -> Result<Arc<str>> {
        (**self).load()
    }
}

/// The [Function] trait describes a stateless, synchronous request handler. Every
/// invocation is independent of every other one.
pub trait Function {
    /// The name the function is deployed and routed under.
    const NAME: &'static str;

    /// The event the function is invoked with.
    type Event: DeserializeOwned;

    /// The response the function produces on success.
    type Response: ProxyResponse + Serialize;

    /// Invokes the function once.
    ///
    /// ### Takes
    /// - `event`: The invocation event.
    ///
    /// ### Returns
    /// - A [Result] with the function's response, or the terminal error of the
    ///   invocation.
    fn invoke(&self, event: Self::Event) -> Result<Self::Response>;

    /// Invokes the function once, converting a failure into the `500`
    /// [ErrorResponse] handed back to the caller.
    fn respond(&self, event: Self::Event) -> std::result::Result<Self::Response, ErrorResponse> {
        self.invoke(event).map_err(|err| {
            error!(target: "gzip-functions", "{} failed with {}: {}", Self::NAME, err.kind(), err);
            err.into_response()
        })
    }
}
