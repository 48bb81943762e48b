//! Error type shared across the crate.

use std::path::PathBuf;

/// Failures that abort a resolution or a configuration load.
///
/// A missing asset is not an error; it is reported as
/// [`ResolutionResult::NotFound`](crate::models::ResolutionResult::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
  /// The loader hit an I/O or decode failure other than a missing file.
  #[error("failed to load {}: {source}", path.display())]
  LoaderFault {
    /// Path that was being probed.
    path: PathBuf,
    /// Underlying failure.
    #[source]
    source: std::io::Error,
  },
  /// A style name that does not correspond to any cascade.
  #[error("unrecognised asset style `{0}`")]
  InvalidStyle(String),
  /// Failed to read the package configuration.
  #[error("failed to read {}: {source}", path.display())]
  ConfigIo {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the package configuration.
  #[error("failed to parse {}: {source}", path.display())]
  ConfigParse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

/// Result alias used across the crate.
pub type AssetResult<T> = Result<T, AssetError>;
