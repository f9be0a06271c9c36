//! Public API traits and types for the isokex harness
//!
//! This crate defines the contract between the verification harness and a
//! key-exchange engine: the error taxonomy and engine status codes, the
//! engine capability trait, and the injected randomness and timing sources.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, Status};
pub use types::*;

pub use traits::{CycleSource, IsogenyEngine, RandomSource};

pub use isokex_params::curve::CurveParameterSet;
