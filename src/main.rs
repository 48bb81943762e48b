//! Command-line front end for inspecting and running icon resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Target};

use vehicle_icon_assets::asset_paths::{CascadeContext, expand_pattern, generate_variants};
use vehicle_icon_assets::{
  AssetStyle, CachedLoader, CollectedWarnings, FileProbe, IconResolver, PackageConfig,
  ProbeCache, ResolutionResult, VehicleRecord,
};

#[derive(Parser)]
#[command(name = "icon-resolve", version, about = "Locate vehicle icon artwork in a game installation")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print every separator spelling of a base name.
  Variants {
    /// Base name, e.g. `germany-Pz_Kpfw-IV`.
    name: String,
  },
  /// Expand a filename pattern for one vehicle.
  Expand {
    /// Pattern containing `{placeholder}` tokens.
    #[arg(long)]
    pattern: String,
    /// JSON file describing the vehicle.
    #[arg(long)]
    vehicle: PathBuf,
  },
  /// Print the paths a style would probe for one vehicle, in order.
  Candidates {
    /// Style to build, e.g. `contour`, `3d-v2` or `custom:Images/flag.png`.
    #[arg(long)]
    style: AssetStyle,
    /// JSON file describing the vehicle.
    #[arg(long)]
    vehicle: PathBuf,
    #[command(flatten)]
    roots: Roots,
  },
  /// Probe the installation for every vehicle in a JSON list.
  Resolve {
    /// Style to resolve.
    #[arg(long)]
    style: AssetStyle,
    /// JSON file holding an array of vehicles.
    #[arg(long)]
    vehicles: PathBuf,
    #[command(flatten)]
    roots: Roots,
  },
}

#[derive(Args)]
struct Roots {
  /// Game installation directory.
  #[arg(long)]
  install: PathBuf,
  /// Directory searched first for custom and pattern files.
  #[arg(long, default_value = ".")]
  app_root: PathBuf,
  /// Package configuration JSON; defaults to the one discovered in the installation.
  #[arg(long)]
  config: Option<PathBuf>,
}

impl Roots {
  fn package_config(&self) -> Result<PackageConfig> {
    match &self.config {
      Some(path) => Ok(PackageConfig::from_path(path)?),
      None => Ok(PackageConfig::discover(&self.install)),
    }
  }

  fn context<'a>(&'a self, config: &'a PackageConfig) -> CascadeContext<'a> {
    CascadeContext {
      config,
      install_root: &self.install,
      app_root: &self.app_root,
    }
  }
}

/// Logger writing to stderr, leaving stdout to the command's results.
fn logger(filters: &str) -> Builder {
  let mut builder = Builder::new();
  builder.parse_filters(filters).target(Target::Stderr);
  builder
}

fn main() -> Result<()> {
  logger(&env::var("RUST_LOG").unwrap_or_else(|_| "info".into())).init();
  let cli = Cli::parse();

  match cli.command {
    Command::Variants { name } => {
      for variant in generate_variants(&name) {
        println!("{variant}");
      }
    }
    Command::Expand { pattern, vehicle } => {
      let vehicle: VehicleRecord = read_json(&vehicle)?;
      println!("{}", expand_pattern(&pattern, &vehicle));
    }
    Command::Candidates {
      style,
      vehicle,
      roots,
    } => {
      let vehicle: VehicleRecord = read_json(&vehicle)?;
      let config = roots.package_config()?;
      let warnings = CollectedWarnings::new();
      let resolver = IconResolver::new(roots.context(&config), FileProbe, &warnings);
      for candidate in resolver.candidates(&style, &vehicle) {
        println!("{}", candidate.path().display());
      }
    }
    Command::Resolve {
      style,
      vehicles,
      roots,
    } => {
      let vehicles: Vec<VehicleRecord> = read_json(&vehicles)?;
      let config = roots.package_config()?;
      let cache = ProbeCache::new();
      let warnings = CollectedWarnings::new();
      let resolver = IconResolver::new(
        roots.context(&config),
        CachedLoader::new(FileProbe, &cache),
        &warnings,
      );

      for (vehicle, result) in vehicles.iter().zip(resolver.resolve_batch(&style, &vehicles)) {
        match result {
          Ok(ResolutionResult::Found {
            path,
            matched_variant: Some(variant),
            ..
          }) => println!("{}\t{}\t(variant {variant})", vehicle.id, path.display()),
          Ok(ResolutionResult::Found { path, .. }) => {
            println!("{}\t{}", vehicle.id, path.display())
          }
          Ok(ResolutionResult::NotFound { .. }) => println!("{}\t-", vehicle.id),
          Err(err) => log::error!("{}: {err}", vehicle.id),
        }
      }

      for warning in warnings.drain() {
        log::warn!("{warning}");
      }
      log::info!("probed {} paths, {} hits", cache.len(), cache.hits());
    }
  }

  Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
  let content =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
