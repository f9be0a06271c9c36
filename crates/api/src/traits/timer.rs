//! Cycle timestamp capability

/// Monotonic processor tick source.
///
/// Only differences between two readings are meaningful; a reading may wrap.
pub trait CycleSource {
    fn timestamp(&mut self) -> u64;

    /// Ticks spent in `f`, measured immediately around the call
    fn measure<T>(&mut self, f: impl FnOnce() -> T) -> (T, u64)
    where
        Self: Sized,
    {
        let start = self.timestamp();
        let out = f();
        let end = self.timestamp();
        (out, end.wrapping_sub(start))
    }
}

impl<C: CycleSource + ?Sized> CycleSource for &mut C {
    fn timestamp(&mut self) -> u64 {
        (**self).timestamp()
    }
}
