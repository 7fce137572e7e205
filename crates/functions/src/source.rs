//! This module contains the [SourceStore] implementations.

use crate::{traces::debug, SourceStore};
use gzip_envelope::{Result, TransportError};
use once_cell::sync::OnceCell;
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
};

/// The [FileSource] reads its document from disk on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a new [FileSource] for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceStore for FileSource {
    fn load(&self) -> Result<Arc<str>> {
        debug!(target: "gzip-functions::source", "Reading source document @ {}", self.path.display());
        fs::read_to_string(&self.path)
            .map(Arc::from)
            .map_err(|e| TransportError::PayloadRead(format!("{}: {e}", self.path.display())))
    }
}

/// The [StaticSource] holds its document in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: Arc<str>,
}

impl StaticSource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }
}

impl SourceStore for StaticSource {
    fn load(&self) -> Result<Arc<str>> {
        Ok(Arc::clone(&self.text))
    }
}

/// The [CachedSource] loads the document of an inner [SourceStore] at most once. The
/// first successful load is kept for the lifetime of the cache and is never mutated;
/// a failed load is not cached, so the next invocation tries again.
///
/// Share one cache between functions (and threads) by wrapping it in an [Arc].
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    document: OnceCell<Arc<str>>,
}

impl<S: SourceStore> CachedSource<S> {
    /// Creates a new, empty [CachedSource] over `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            document: OnceCell::new(),
        }
    }

    /// Returns `true` once the document has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.document.get().is_some()
    }
}

impl<S: SourceStore> SourceStore for CachedSource<S> {
    fn load(&self) -> Result<Arc<str>> {
        self.document
            .get_or_try_init(|| self.inner.load())
            .map(Arc::clone)
    }
}
