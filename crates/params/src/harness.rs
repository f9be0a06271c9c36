//! Default loop counts for verification and benchmarking

/// Trials per key-exchange verification pass
pub const TEST_LOOPS: usize = 10;

/// Iterations averaged per benchmarked operation
pub const BENCH_LOOPS: usize = 10;

/// Rejection-sampling draws before an engine gives up
pub const MAX_SAMPLING_ATTEMPTS: usize = 100;
