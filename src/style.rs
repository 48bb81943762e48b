//! Asset styles selectable for an image layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Which cascade of candidate locations to build for a vehicle.
///
/// File-based styles carry their configured filename or pattern so that a style value is
/// everything the candidate builder needs besides the vehicle and the package config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum AssetStyle {
  /// Contour outline icon.
  Contour,
  /// 3D render, looked up by image name.
  #[serde(rename = "3d")]
  ThreeD,
  /// Large 3D render, looked up by image name.
  #[serde(rename = "3d-large")]
  ThreeDLarge,
  /// 3D render, looked up by every separator spelling of the unprefixed image name.
  #[serde(rename = "3d-v2")]
  ThreeDv2,
  /// Large 3D render, looked up by every separator spelling of the unprefixed image name.
  #[serde(rename = "3d-large-v2")]
  ThreeDLargev2,
  /// Nation flag.
  Country,
  /// Class badge.
  Class,
  /// Icon that is already installed, falling back to the contour source.
  Current,
  /// A single user-chosen file.
  Custom {
    /// File name relative to one of the search roots.
    file: String,
  },
  /// A file name built from a placeholder pattern.
  Pattern {
    /// Pattern containing `{name}` placeholders.
    pattern: String,
  },
}

impl AssetStyle {
  /// Short identifier used on the command line and in warnings.
  pub fn name(&self) -> &'static str {
    match self {
      Self::Contour => "contour",
      Self::ThreeD => "3d",
      Self::ThreeDLarge => "3d-large",
      Self::ThreeDv2 => "3d-v2",
      Self::ThreeDLargev2 => "3d-large-v2",
      Self::Country => "country",
      Self::Class => "class",
      Self::Current => "current",
      Self::Custom { .. } => "custom",
      Self::Pattern { .. } => "pattern",
    }
  }

  /// Built-in styles stay quiet for placeholder vehicles that have no artwork.
  pub fn is_built_in(&self) -> bool {
    matches!(
      self,
      Self::Contour
        | Self::ThreeD
        | Self::ThreeDLarge
        | Self::ThreeDv2
        | Self::ThreeDLargev2
        | Self::Country
        | Self::Class
    )
  }
}

impl fmt::Display for AssetStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Custom { file } => write!(f, "custom image \"{file}\""),
      Self::Pattern { pattern } => write!(f, "pattern image \"{pattern}\""),
      other => write!(f, "{} image", other.name()),
    }
  }
}

/// Parses `contour`, `3d`, ..., `custom:<file>` and `pattern:<pattern>`.
impl FromStr for AssetStyle {
  type Err = AssetError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    if let Some(file) = value.strip_prefix("custom:") {
      return Ok(Self::Custom { file: file.to_string() });
    }
    if let Some(pattern) = value.strip_prefix("pattern:") {
      return Ok(Self::Pattern {
        pattern: pattern.to_string(),
      });
    }

    match value.trim().to_ascii_lowercase().as_str() {
      "contour" => Ok(Self::Contour),
      "3d" => Ok(Self::ThreeD),
      "3d-large" => Ok(Self::ThreeDLarge),
      "3d-v2" => Ok(Self::ThreeDv2),
      "3d-large-v2" => Ok(Self::ThreeDLargev2),
      "country" => Ok(Self::Country),
      "class" => Ok(Self::Class),
      "current" => Ok(Self::Current),
      _ => Err(AssetError::InvalidStyle(value.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_built_in_styles_case_insensitively() {
    assert_eq!("Contour".parse::<AssetStyle>().unwrap(), AssetStyle::Contour);
    assert_eq!("3D-large-v2".parse::<AssetStyle>().unwrap(), AssetStyle::ThreeDLargev2);
  }

  #[test]
  fn parses_file_based_styles_with_payload() {
    assert_eq!(
      "custom:Images/flag.png".parse::<AssetStyle>().unwrap(),
      AssetStyle::Custom {
        file: "Images/flag.png".into()
      }
    );
    assert_eq!(
      "pattern:{country}.png".parse::<AssetStyle>().unwrap(),
      AssetStyle::Pattern {
        pattern: "{country}.png".into()
      }
    );
  }

  #[test]
  fn rejects_unknown_styles() {
    let err = "hologram".parse::<AssetStyle>().unwrap_err();
    assert!(matches!(err, AssetError::InvalidStyle(ref name) if name == "hologram"));
  }

  #[test]
  fn rejects_unknown_styles_during_deserialisation() {
    assert!(serde_json::from_str::<AssetStyle>(r#"{"style": "hologram"}"#).is_err());

    let style: AssetStyle =
      serde_json::from_str(r#"{"style": "custom", "file": "flag.png"}"#).unwrap();
    assert_eq!(style, AssetStyle::Custom {
      file: "flag.png".into()
    });
  }

  #[test]
  fn only_vehicle_artwork_styles_are_built_in() {
    assert!(AssetStyle::ThreeDv2.is_built_in());
    assert!(AssetStyle::Class.is_built_in());
    assert!(!AssetStyle::Current.is_built_in());
    assert!(!AssetStyle::Pattern { pattern: String::new() }.is_built_in());
  }
}
