//! Walks a candidate cascade and returns the first asset the loader produces.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult};
use crate::models::{CandidateTriple, ResolutionResult};

/// Collaborator that turns a path into an asset handle.
///
/// A missing file is `Ok(None)`. Errors are reserved for genuine read or decode faults and
/// abort the resolution.
pub trait AssetLoader {
  /// Handle returned for a located asset.
  type Asset: Clone;

  /// Attempt to load the asset at `path`.
  fn load(&self, path: &Path) -> io::Result<Option<Self::Asset>>;
}

impl<L: AssetLoader + ?Sized> AssetLoader for &L {
  type Asset = L::Asset;

  fn load(&self, path: &Path) -> io::Result<Option<Self::Asset>> {
    (**self).load(path)
  }
}

/// Probe candidates in order and return the first hit.
///
/// Nothing after the first hit is probed. An empty cascade, or one where every probe comes
/// back empty, yields [`ResolutionResult::NotFound`] labelled with `style`.
pub fn resolve<L: AssetLoader>(
  candidates: &[CandidateTriple],
  loader: &L,
  style: &str,
) -> AssetResult<ResolutionResult<L::Asset>> {
  for candidate in candidates {
    let path = candidate.path();
    log::debug!("probing {}", path.display());

    let loaded = loader.load(&path).map_err(|source| AssetError::LoaderFault {
      path: path.clone(),
      source,
    })?;

    if let Some(asset) = loaded {
      return Ok(ResolutionResult::Found {
        asset,
        path,
        matched_variant: candidate.variant.clone(),
      });
    }
  }

  Ok(ResolutionResult::NotFound {
    style: style.to_string(),
  })
}

/// Loader that reports the path of any regular file that exists.
///
/// Decoding is left to whoever consumes the path; this loader only answers "is it there".
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProbe;

impl AssetLoader for FileProbe {
  type Asset = PathBuf;

  fn load(&self, path: &Path) -> io::Result<Option<PathBuf>> {
    match fs::metadata(path) {
      Ok(metadata) if metadata.is_file() => Ok(Some(path.to_path_buf())),
      Ok(_) => Ok(None),
      Err(err) if is_missing(&err) => Ok(None),
      Err(err) => Err(err),
    }
  }
}

/// Loader that reads the whole file into memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBytes;

impl AssetLoader for FileBytes {
  type Asset = std::sync::Arc<[u8]>;

  fn load(&self, path: &Path) -> io::Result<Option<Self::Asset>> {
    match fs::read(path) {
      Ok(bytes) => Ok(Some(bytes.into())),
      Err(err) if is_missing(&err) => Ok(None),
      Err(err) if path.is_dir() => {
        log::trace!("{} is a directory: {err}", path.display());
        Ok(None)
      }
      Err(err) => Err(err),
    }
  }
}

/// A path through a regular file (`icons/flag.png/extra`) is as missing as a plain absent file.
fn is_missing(err: &io::Error) -> bool {
  matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
