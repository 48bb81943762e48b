//! Per-version package configuration describing where icon sources live.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{AssetError, AssetResult};
use crate::models::{Country, VehicleClass};
use crate::style::AssetStyle;

const DEFAULT_CONFIG_FILE: &str = "icon_packages.json";

/// Literal token inside path templates that is replaced by each active package name.
pub const PACKAGE_TOKEN: &str = "\"GuiPackage\"";

/// Discoverable configuration describing package templates and install-relative paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PackageConfig {
    /// Active package names in priority order.
    #[serde(rename = "GuiPackageName", deserialize_with = "deserialize_package_names")]
    pub gui_package_names: Vec<String>,
    /// Subfolder template for contour icons.
    pub path_source_contour: String,
    /// Subfolder template for 3D renders.
    #[serde(rename = "PathSource3D")]
    pub path_source_3d: String,
    /// Subfolder template for large 3D renders.
    #[serde(rename = "PathSource3DLarge")]
    pub path_source_3d_large: String,
    /// File templates for nation flags.
    pub path_source_country: BTreeMap<Country, String>,
    /// File templates for class badges.
    pub path_source_class: BTreeMap<VehicleClass, String>,
    /// Folder that rendered icons are installed into.
    pub path_destination: String,
    /// Mods folder below the installation root.
    pub path_mods: String,
    /// Extension appended to icon base names, including the dot.
    pub tank_icon_extension: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        let flags = "res/packages/\"GuiPackage\"/gui/maps/icons/filters/nations";
        let badges = "res/packages/\"GuiPackage\"/gui/maps/icons/filters/tanks";

        let path_source_country = [
            Country::Ussr,
            Country::Germany,
            Country::Usa,
            Country::France,
            Country::China,
            Country::Uk,
            Country::Japan,
            Country::Czech,
            Country::Sweden,
            Country::Poland,
            Country::Italy,
        ]
        .into_iter()
        .map(|country| (country, format!("{flags}/{}.png", country.as_str())))
        .collect();

        let path_source_class = [
            (VehicleClass::Light, "lightTank"),
            (VehicleClass::Medium, "mediumTank"),
            (VehicleClass::Heavy, "heavyTank"),
            (VehicleClass::Destroyer, "AT-SPG"),
            (VehicleClass::Artillery, "SPG"),
        ]
        .into_iter()
        .map(|(class, file)| (class, format!("{badges}/{file}.png")))
        .collect();

        Self {
            gui_package_names: vec!["gui-part1".into(), "gui-part2".into()],
            path_source_contour: "res/packages/\"GuiPackage\"/gui/maps/icons/vehicle/contour".into(),
            path_source_3d: "res/packages/\"GuiPackage\"/gui/maps/icons/vehicle".into(),
            path_source_3d_large: "res/packages/\"GuiPackage\"/gui/maps/icons/vehicle/large".into(),
            path_source_country,
            path_source_class,
            path_destination: "res_mods/gui/maps/icons/vehicle/contour".into(),
            path_mods: "res_mods".into(),
            tank_icon_extension: ".png".into(),
        }
    }
}

impl PackageConfig {
    /// Attempt to load configuration from the provided installation directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to default
    /// values so that a bare installation still resolves the stock package layout.
    pub fn discover(install_dir: &Path) -> Self {
        let candidate = install_dir.join(DEFAULT_CONFIG_FILE);
        match Self::from_path(&candidate) {
            Ok(config) => config,
            Err(err) => {
                log::debug!("using default package config: {err}");
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> AssetResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| AssetError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AssetError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Subfolder template for the package-searched artwork styles.
    ///
    /// The v2 styles share the folders of their non-v2 counterparts; they differ only in how
    /// the file name is spelled.
    pub fn style_template(&self, style: &AssetStyle) -> Option<&str> {
        match style {
            AssetStyle::Contour => Some(&self.path_source_contour),
            AssetStyle::ThreeD | AssetStyle::ThreeDv2 => Some(&self.path_source_3d),
            AssetStyle::ThreeDLarge | AssetStyle::ThreeDLargev2 => Some(&self.path_source_3d_large),
            _ => None,
        }
    }

    /// Replace the package token in `template`, returning `None` when nothing usable remains.
    pub fn expand_for_package(template: &str, package: &str) -> Option<String> {
        let expanded = template.replace(PACKAGE_TOKEN, package);
        let trimmed = expanded.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Split the legacy single-string package list on spaces, commas and semicolons.
pub fn parse_package_list(value: &str) -> Vec<String> {
    value
        .split([' ', ',', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PackageNames {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_package_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PackageNames::deserialize(deserializer)? {
        PackageNames::Joined(value) => parse_package_list(&value),
        PackageNames::List(values) => values
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect(),
    })
}
