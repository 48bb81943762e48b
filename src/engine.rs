//! Orchestrates candidate building, probing and warning for vehicles in a render batch.

use std::num::NonZeroUsize;
use std::thread;

use crate::asset_paths::{CascadeContext, CascadePlan, strategy_for};
use crate::error::AssetResult;
use crate::models::{CandidateTriple, ResolutionResult, UNKNOWN_VEHICLE_ID, VehicleRecord};
use crate::resolver::{AssetLoader, resolve};
use crate::style::AssetStyle;
use crate::warnings::WarningSink;

/// Resolves icon assets for vehicles against one installation and package config.
pub struct IconResolver<'a, L, W> {
  context: CascadeContext<'a>,
  loader: L,
  warnings: W,
}

impl<'a, L: AssetLoader, W: WarningSink> IconResolver<'a, L, W> {
  /// Create a resolver for the provided cascade context.
  pub fn new(context: CascadeContext<'a>, loader: L, warnings: W) -> Self {
    Self {
      context,
      loader,
      warnings,
    }
  }

  /// Candidates that [`IconResolver::resolve`] would probe, in order.
  pub fn candidates(&self, style: &AssetStyle, vehicle: &VehicleRecord) -> Vec<CandidateTriple> {
    strategy_for(style).build(vehicle, &self.context)
  }

  /// Resolve one style for one vehicle.
  ///
  /// A miss reports one warning unless the style has nothing to look for (no nation, blank
  /// file name) or the vehicle is the `unknown` placeholder and the style is built in.
  /// Loader faults are returned as errors and produce no warning.
  pub fn resolve(
    &self,
    style: &AssetStyle,
    vehicle: &VehicleRecord,
  ) -> AssetResult<ResolutionResult<L::Asset>> {
    let CascadePlan { description, candidates } = strategy_for(style).plan(vehicle, &self.context);
    let Some(candidates) = candidates else {
      return Ok(ResolutionResult::NotFound { style: description });
    };

    let result = resolve(&candidates, &self.loader, &description).inspect_err(|err| {
      log::warn!("{}: {err}", vehicle.id);
    })?;

    if result.is_not_found() && !(style.is_built_in() && vehicle.id == UNKNOWN_VEHICLE_ID) {
      self.warnings.report(&description, &vehicle.id);
    }

    Ok(result)
  }
}

impl<L, W> IconResolver<'_, L, W>
where
  L: AssetLoader + Sync,
  L::Asset: Send,
  W: WarningSink + Sync,
{
  /// Resolve `style` for every vehicle, spreading the work over scoped threads.
  ///
  /// Results are returned in input order. A fault for one vehicle does not stop the others.
  pub fn resolve_batch(
    &self,
    style: &AssetStyle,
    vehicles: &[VehicleRecord],
  ) -> Vec<AssetResult<ResolutionResult<L::Asset>>> {
    if vehicles.is_empty() {
      return Vec::new();
    }

    let workers = thread::available_parallelism()
      .map(NonZeroUsize::get)
      .unwrap_or(1)
      .min(vehicles.len());
    let chunk_size = vehicles.len().div_ceil(workers);

    let results: Vec<_> = thread::scope(|scope| {
      let handles: Vec<_> = vehicles
        .chunks(chunk_size)
        .map(|chunk| {
          scope.spawn(move || {
            chunk
              .iter()
              .map(|vehicle| self.resolve(style, vehicle))
              .collect::<Vec<_>>()
          })
        })
        .collect();

      handles
        .into_iter()
        .flat_map(|handle| {
          handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
        .collect()
    });

    let found = results
      .iter()
      .filter(|result| matches!(result, Ok(ResolutionResult::Found { .. })))
      .count();
    log::info!(
      "resolved {found} of {} vehicles for {}",
      vehicles.len(),
      style.name()
    );

    results
  }
}
