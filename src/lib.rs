//! # isokex
//!
//! Verification and cycle benchmarking of isogeny-based key-exchange
//! engines.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`isokex-api`]: Engine contract, status codes and error taxonomy
//! - [`isokex-params`]: Curve parameter sets and known-answer vectors
//! - [`isokex-common`]: Secure buffers, randomness sources, cycle timer
//! - [`isokex-engine`]: The reference engine over REFp62
//! - [`isokex-harness`]: Verifiers, benchmarks and phase sequencing
//!
//! ## Usage
//!
//! ```no_run
//! use isokex::prelude::*;
//!
//! let engine = ReferenceEngine::new();
//! let report = Harness::new(&engine, &REFP62, HarnessConfig::default()).run();
//! println!("{}", report);
//! assert!(report.passed());
//! ```

pub use isokex_api as api;
pub use isokex_common as common;
pub use isokex_engine as engine;
pub use isokex_harness as harness;
pub use isokex_internal as internal;
pub use isokex_params as params;

/// Common imports for isokex users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, Status};

    // Re-export core traits
    pub use crate::api::{CycleSource, IsogenyEngine, RandomSource, Role};

    pub use crate::common::{CycleTimer, RngSource, SecureBuffer, ZeroizeGuard};

    pub use crate::engine::ReferenceEngine;

    pub use crate::harness::{
        Harness, HarnessConfig, HarnessReport, KeyExchangeBenchmark, KeyExchangeVerifier,
        LadderBenchmark, LadderVerifier, Phase, RandomSpec,
    };

    pub use crate::params::curve::CurveParameterSet;
    pub use crate::params::reference::REFP62;
    pub use crate::params::sidh::SIDHP751;
}
