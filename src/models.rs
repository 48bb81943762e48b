//! Data structures shared by the candidate builders, the resolver and the CLI.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Vehicle id used by preview records that have no real artwork behind them.
pub const UNKNOWN_VEHICLE_ID: &str = "unknown";

/// Nation a vehicle belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
  /// No nation assigned.
  #[default]
  None,
  /// Soviet Union.
  Ussr,
  /// Germany.
  Germany,
  /// United States.
  Usa,
  /// France.
  France,
  /// China.
  China,
  /// United Kingdom.
  Uk,
  /// Japan.
  Japan,
  /// Czechoslovakia.
  Czech,
  /// Sweden.
  Sweden,
  /// Poland.
  Poland,
  /// Italy.
  Italy,
}

impl Country {
  /// Lower-case name used in file names and pattern placeholders.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Ussr => "ussr",
      Self::Germany => "germany",
      Self::Usa => "usa",
      Self::France => "france",
      Self::China => "china",
      Self::Uk => "uk",
      Self::Japan => "japan",
      Self::Czech => "czech",
      Self::Sweden => "sweden",
      Self::Poland => "poland",
      Self::Italy => "italy",
    }
  }
}

/// Combat role of a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
  /// No class assigned.
  #[default]
  None,
  /// Light tank.
  Light,
  /// Medium tank.
  Medium,
  /// Heavy tank.
  Heavy,
  /// Tank destroyer.
  Destroyer,
  /// Self-propelled artillery.
  Artillery,
}

impl VehicleClass {
  /// Lower-case name used in file names and pattern placeholders.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Light => "light",
      Self::Medium => "medium",
      Self::Heavy => "heavy",
      Self::Destroyer => "destroyer",
      Self::Artillery => "artillery",
    }
  }
}

/// Availability category of a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  /// Researchable vehicle.
  #[default]
  Normal,
  /// Purchasable premium vehicle.
  Premium,
  /// Event or reward vehicle.
  Special,
  /// Collector vehicle.
  Collector,
}

impl Category {
  /// Lower-case name used in pattern placeholders.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Normal => "normal",
      Self::Premium => "premium",
      Self::Special => "special",
      Self::Collector => "collector",
    }
  }
}

/// Read-only description of the vehicle whose icon is being resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleRecord {
  /// Stable vehicle identifier, also the output file name for rendered icons.
  pub id: String,
  /// Base name of the source artwork, when it differs from the id.
  pub image_name: Option<String>,
  /// Nation of the vehicle.
  pub country: Country,
  /// Combat role of the vehicle.
  pub class: VehicleClass,
  /// Vehicle tier.
  pub tier: u8,
  /// Availability category.
  pub category: Category,
  /// Free-form properties addressable from filename patterns.
  pub properties: BTreeMap<String, String>,
}

impl VehicleRecord {
  /// Create a record with only an id set.
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      ..Self::default()
    }
  }

  /// Image base name, or the id when the record carries none.
  pub fn image_base_name(&self) -> &str {
    self.image_name.as_deref().unwrap_or(&self.id)
  }

  /// Look up a free-form property by key.
  pub fn property(&self, key: &str) -> Option<&str> {
    self.properties.get(key).map(String::as_str)
  }
}

/// One fully expanded location to probe for an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateTriple {
  /// Root directory the candidate is relative to.
  pub root: PathBuf,
  /// Subfolder below the root, already expanded for the package.
  pub subfolder: String,
  /// File name, possibly containing further directories.
  pub filename: String,
  /// Separator variant this candidate was built from, if variant search was used.
  pub variant: Option<String>,
}

impl CandidateTriple {
  /// Create a candidate that did not come from variant search.
  pub fn new(root: &Path, subfolder: impl Into<String>, filename: impl Into<String>) -> Self {
    Self {
      root: root.to_path_buf(),
      subfolder: subfolder.into(),
      filename: filename.into(),
      variant: None,
    }
  }

  /// Tag the candidate with the separator variant it was built from.
  pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
    self.variant = Some(variant.into());
    self
  }

  /// Join the parts into a filesystem path.
  ///
  /// Empty parts are skipped so that a candidate whose subfolder already names the file
  /// does not end up with a trailing separator. An absolute part replaces everything before
  /// it, so a user-picked absolute file is probed as given.
  pub fn path(&self) -> PathBuf {
    let mut path = self.root.clone();
    for part in [self.subfolder.as_str(), self.filename.as_str()] {
      let part = part.trim_end_matches(['/', '\\']);
      if !part.is_empty() {
        path.push(part);
      }
    }
    path
  }
}

/// Outcome of resolving one style for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult<A> {
  /// A candidate loaded successfully.
  Found {
    /// Asset handle returned by the loader.
    asset: A,
    /// Path the asset was loaded from.
    path: PathBuf,
    /// Separator variant that matched; the caller owns persisting it.
    matched_variant: Option<String>,
  },
  /// No candidate loaded.
  NotFound {
    /// Human-readable style name for warning text.
    style: String,
  },
}

impl<A> ResolutionResult<A> {
  /// Returns the asset when one was found.
  pub fn asset(&self) -> Option<&A> {
    match self {
      Self::Found { asset, .. } => Some(asset),
      Self::NotFound { .. } => None,
    }
  }

  /// Returns the separator variant that matched, if any.
  pub fn matched_variant(&self) -> Option<&str> {
    match self {
      Self::Found {
        matched_variant, ..
      } => matched_variant.as_deref(),
      Self::NotFound { .. } => None,
    }
  }

  /// Returns `true` when no candidate loaded.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

/// Missing-asset report delivered to a warning sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
  /// Vehicle the warning is about.
  pub vehicle_id: String,
  /// Human-readable style name, including the filename for file-based styles.
  pub style: String,
}

impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: missing image for {}", self.vehicle_id, self.style)
  }
}
