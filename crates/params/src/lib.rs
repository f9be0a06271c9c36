//! Constant values for the isokex harness
//!
//! Curve parameter descriptors, known-answer ladder vectors and the default
//! loop counts. This crate has no dependencies.

pub mod curve;
pub mod harness;
pub mod reference;
pub mod sidh;

pub use curve::{CurveParameterSet, LadderVector};
pub use harness::{BENCH_LOOPS, TEST_LOOPS};

/// Every parameter set known to this crate
pub const PARAMETER_SETS: [&CurveParameterSet; 2] = [&sidh::SIDHP751, &reference::REFP62];

/// Look up a parameter set by identifier, ignoring ASCII case
pub fn parameter_set(id: &str) -> Option<&'static CurveParameterSet> {
    PARAMETER_SETS
        .iter()
        .copied()
        .find(|set| set.id.eq_ignore_ascii_case(id))
}
