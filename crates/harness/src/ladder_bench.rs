//! Cycle cost of the scalar ladder on random scalars

use std::num::NonZeroUsize;

use isokex_api::{CurveParameterSet, CycleSource, IsogenyEngine, Limb, RandomSource, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DEFAULT_BENCH_LOOPS;
use crate::sample::BenchmarkSample;
use crate::session::Session;

/// x-coordinate the benchmark starts from
pub const LADDER_BENCH_START_X: Limb = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LadderBenchReport {
    pub sample: BenchmarkSample,
}

impl LadderBenchReport {
    pub fn average_cycles(&self) -> Option<u64> {
        self.sample.average()
    }
}

/// Times one ladder call per loop, each on a freshly sampled scalar
///
/// The x-coordinate carries over from one call to the next. Sampling time
/// is not counted.
pub struct LadderBenchmark<'e, E: IsogenyEngine, C: CycleSource> {
    engine: &'e E,
    params: &'e CurveParameterSet,
    timer: C,
    loops: NonZeroUsize,
}

impl<'e, E: IsogenyEngine, C: CycleSource> LadderBenchmark<'e, E, C> {
    pub fn new(engine: &'e E, params: &'e CurveParameterSet, timer: C) -> Self {
        Self { engine, params, timer, loops: DEFAULT_BENCH_LOOPS }
    }

    pub fn with_loops(mut self, loops: NonZeroUsize) -> Self {
        self.loops = loops;
        self
    }

    /// Any sampling or ladder failure ends the run with `Err`
    pub fn run(&mut self, random: Box<dyn RandomSource>) -> Result<LadderBenchReport> {
        let mut session = Session::open(self.engine, self.params, random)?;
        let mut scalar = vec![0 as Limb; self.params.ladder_scalar_words()];
        let mut x = vec![0 as Limb; self.params.field_words()];
        x[0] = LADDER_BENCH_START_X;

        let mut sample = BenchmarkSample::new();
        for iteration in 0..self.loops.get() {
            session.sample_scalar_mod_order(&mut scalar)?;
            let (result, cycles) = self.timer.measure(|| session.ladder(&mut x, &scalar));
            result?;
            sample.record(cycles);
            debug!(iteration, cycles, "ladder timed");
        }

        info!(
            curve = self.params.id,
            loops = self.loops.get(),
            average = ?sample.average(),
            "ladder benchmark done"
        );
        Ok(LadderBenchReport { sample })
    }
}
