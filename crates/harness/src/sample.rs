//! Accumulated cycle counts

use serde::Serialize;

/// Sum of per-call cycle deltas over a run of iterations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BenchmarkSample {
    total_cycles: u128,
    iterations: usize,
}

impl BenchmarkSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_deltas(deltas: impl IntoIterator<Item = u64>) -> Self {
        let mut sample = Self::new();
        for delta in deltas {
            sample.record(delta);
        }
        sample
    }

    pub fn record(&mut self, cycles: u64) {
        self.total_cycles += u128::from(cycles);
        self.iterations += 1;
    }

    pub fn total_cycles(&self) -> u128 {
        self.total_cycles
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// floor(total / iterations), or `None` before the first record
    pub fn average(&self) -> Option<u64> {
        if self.iterations == 0 {
            return None;
        }
        // the mean of u64 values fits in a u64
        Some((self.total_cycles / self.iterations as u128) as u64)
    }
}
