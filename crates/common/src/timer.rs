//! Processor cycle timer

use isokex_api::CycleSource;
use isokex_internal::cycles::read_cycle_counter;

/// Hardware tick counter: the time-stamp counter on x86_64, the generic
/// timer on aarch64, monotonic nanoseconds elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleTimer;

impl CycleTimer {
    pub fn new() -> Self {
        Self
    }
}

impl CycleSource for CycleTimer {
    #[inline(always)]
    fn timestamp(&mut self) -> u64 {
        read_cycle_counter()
    }
}
