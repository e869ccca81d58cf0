//! Ingest results memoized by content hash.
//!
//! A key is the SHA-256 of the raw input bytes, so a new upload is always a
//! new key and an unchanged file is never parsed twice. Entries are never
//! evicted; `clear` drops them all.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::IngestError;
use crate::reader::ingest_bytes;
use crate::types::IngestReport;

/// Hex SHA-256 of the ingested bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct IngestCache {
    entries: HashMap<ContentKey, Arc<IngestReport>>,
    hits: u64,
    misses: u64,
}

impl IngestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached report for `bytes`, ingesting on first sight.
    ///
    /// Failed ingests are not cached.
    pub fn get_or_ingest(&mut self, bytes: &[u8]) -> Result<Arc<IngestReport>, IngestError> {
        let key = ContentKey::of(bytes);
        if let Some(report) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %key, "ingest cache hit");
            return Ok(Arc::clone(report));
        }

        self.misses += 1;
        debug!(key = %key, "ingest cache miss");
        let report = Arc::new(ingest_bytes(bytes)?);
        self.entries.insert(key, Arc::clone(&report));
        Ok(report)
    }

    /// Read `path` and go through the cache.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<Arc<IngestReport>, IngestError> {
        let bytes = std::fs::read(path.as_ref())?;
        self.get_or_ingest(&bytes)
    }

    pub fn contains(&self, bytes: &[u8]) -> bool {
        self.entries.contains_key(&ContentKey::of(bytes))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
