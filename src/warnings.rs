//! Sinks for missing-asset warnings.

use std::sync::Mutex;

use crate::models::Warning;

/// Fire-and-forget receiver for missing-asset reports.
pub trait WarningSink {
  /// Record that `style` could not be resolved for `vehicle_id`.
  fn report(&self, style: &str, vehicle_id: &str);
}

impl<W: WarningSink + ?Sized> WarningSink for &W {
  fn report(&self, style: &str, vehicle_id: &str) {
    (**self).report(style, vehicle_id);
  }
}

/// Sink that forwards warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarnings;

impl WarningSink for LogWarnings {
  fn report(&self, style: &str, vehicle_id: &str) {
    log::warn!("{vehicle_id}: missing image for {style}");
  }
}

/// Thread-safe sink that keeps every warning for later display.
#[derive(Debug, Default)]
pub struct CollectedWarnings {
  warnings: Mutex<Vec<Warning>>,
}

impl CollectedWarnings {
  /// Create an empty collector.
  pub fn new() -> Self {
    Self::default()
  }

  /// Take every warning collected so far, leaving the collector empty.
  pub fn drain(&self) -> Vec<Warning> {
    std::mem::take(&mut *self.lock())
  }

  /// Number of warnings collected so far.
  pub fn len(&self) -> usize {
    self.lock().len()
  }

  /// Returns `true` when nothing has been reported.
  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Warning>> {
    // Poisoning is ignored: a push either happened or it didn't.
    self
      .warnings
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl WarningSink for CollectedWarnings {
  fn report(&self, style: &str, vehicle_id: &str) {
    self.lock().push(Warning {
      vehicle_id: vehicle_id.to_string(),
      style: style.to_string(),
    });
  }
}
