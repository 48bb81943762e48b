#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod resolver;
pub mod style;
pub mod warnings;

pub use cache::{CachedLoader, ProbeCache};
pub use config::PackageConfig;
pub use engine::IconResolver;
pub use error::{AssetError, AssetResult};
pub use models::{CandidateTriple, ResolutionResult, VehicleRecord};
pub use resolver::{AssetLoader, FileBytes, FileProbe, resolve};
pub use style::AssetStyle;
pub use warnings::{CollectedWarnings, LogWarnings, WarningSink};
