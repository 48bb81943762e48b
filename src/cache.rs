//! Batch-scoped memoisation of probe results.
//!
//! Many vehicles share the same package and naming combination, so a render batch probes
//! the same paths over and over. The cache remembers both hits and misses by full path and
//! is safe to share between threads. Two threads missing on the same path may both load it;
//! the second insert simply overwrites an equal value.
//!
//! The cache lives for one batch. Keeping one alive for a whole application run would need
//! invalidation when packages change on disk, which nothing here attempts.

use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::resolver::AssetLoader;

/// Concurrent map from probed path to the loader's answer.
#[derive(Debug)]
pub struct ProbeCache<A> {
  entries: DashMap<PathBuf, Option<A>>,
}

impl<A> Default for ProbeCache<A> {
  fn default() -> Self {
    Self {
      entries: DashMap::new(),
    }
  }
}

impl<A: Clone> ProbeCache<A> {
  /// Create an empty cache.
  pub fn new() -> Self {
    Self::default()
  }

  /// Cached answer for `path`; the outer `None` means the path was never probed.
  pub fn get(&self, path: &Path) -> Option<Option<A>> {
    self.entries.get(path).map(|entry| entry.value().clone())
  }

  /// Record the loader's answer for `path`.
  pub fn insert(&self, path: PathBuf, asset: Option<A>) {
    self.entries.insert(path, asset);
  }

  /// Number of distinct paths probed so far.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when nothing has been probed yet.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Number of cached paths that resolved to an asset.
  pub fn hits(&self) -> usize {
    self
      .entries
      .iter()
      .filter(|entry| entry.value().is_some())
      .count()
  }

  /// Drop every cached answer, typically between render batches.
  pub fn clear(&self) {
    self.entries.clear();
  }
}

/// Loader wrapper that consults a [`ProbeCache`] before touching the inner loader.
///
/// Faults are not cached, so a path whose read failed is attempted again by the next
/// resolution that reaches it.
pub struct CachedLoader<'c, L: AssetLoader> {
  inner: L,
  cache: &'c ProbeCache<L::Asset>,
}

impl<'c, L: AssetLoader> CachedLoader<'c, L> {
  /// Wrap `inner` so its answers are recorded in `cache`.
  pub fn new(inner: L, cache: &'c ProbeCache<L::Asset>) -> Self {
    Self { inner, cache }
  }
}

impl<L: AssetLoader> AssetLoader for CachedLoader<'_, L> {
  type Asset = L::Asset;

  fn load(&self, path: &Path) -> io::Result<Option<Self::Asset>> {
    if let Some(cached) = self.cache.get(path) {
      log::trace!("probe cache hit for {}", path.display());
      return Ok(cached);
    }

    let loaded = self.inner.load(path)?;
    self.cache.insert(path.to_path_buf(), loaded.clone());
    Ok(loaded)
  }
}
