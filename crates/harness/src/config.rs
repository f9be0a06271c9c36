//! Runtime configuration for a harness run

use std::num::NonZeroUsize;

use isokex_api::RandomSource;
use isokex_common::RngSource;
use isokex_params::{BENCH_LOOPS, TEST_LOOPS};
use serde::Serialize;

pub(crate) const DEFAULT_TRIALS: NonZeroUsize = match NonZeroUsize::new(TEST_LOOPS) {
    Some(n) => n,
    None => panic!("TEST_LOOPS must be nonzero"),
};

pub(crate) const DEFAULT_BENCH_LOOPS: NonZeroUsize = match NonZeroUsize::new(BENCH_LOOPS) {
    Some(n) => n,
    None => panic!("BENCH_LOOPS must be nonzero"),
};

/// Where engine contexts get their randomness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomSpec {
    /// Operating system entropy
    Os,
    /// ChaCha20 seeded from the given value, for replayable runs
    Seeded(u64),
}

impl RandomSpec {
    /// A fresh source for one engine context
    ///
    /// `stream` separates the sources of different phases under one seed.
    pub fn source(self, stream: u64) -> Box<dyn RandomSource> {
        match self {
            RandomSpec::Os => Box::new(RngSource::os()),
            RandomSpec::Seeded(seed) => Box::new(RngSource::seeded_stream(seed, stream)),
        }
    }
}

/// Harness knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessConfig {
    /// Trials per key-exchange verification pass
    pub trials: NonZeroUsize,
    /// Iterations averaged per benchmarked operation
    pub bench_loops: NonZeroUsize,
    pub random: RandomSpec,
    /// Run the two benchmark phases
    pub run_benchmarks: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            bench_loops: DEFAULT_BENCH_LOOPS,
            random: RandomSpec::Os,
            run_benchmarks: true,
        }
    }
}

// Builder methods for easy customization
impl HarnessConfig {
    pub fn with_trials(mut self, trials: NonZeroUsize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_bench_loops(mut self, loops: NonZeroUsize) -> Self {
        self.bench_loops = loops;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random = RandomSpec::Seeded(seed);
        self
    }

    pub fn with_random(mut self, random: RandomSpec) -> Self {
        self.random = random;
        self
    }

    pub fn without_benchmarks(mut self) -> Self {
        self.run_benchmarks = false;
        self
    }
}
