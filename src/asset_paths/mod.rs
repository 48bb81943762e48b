//! Helpers for turning a vehicle and a style into an ordered list of paths to probe.
//!
//! The responsibilities are split into focused submodules so that separator spelling,
//! filename patterns and per-style cascades can be tested independently of any filesystem.

mod candidates;
mod template;
mod variants;

pub use candidates::{CandidateStrategy, CascadeContext, CascadePlan, build_candidates, strategy_for};
pub use template::expand_pattern;
pub use variants::{MAX_SEPARATOR_GAPS, generate_variants, strip_product_prefix};
