//! Injected randomness capability

use crate::Result;

/// Byte-oriented randomness source handed to an engine context.
///
/// Implementations must fail with `InvalidParameter` on an empty request.
pub trait RandomSource {
    /// Fill `out` with random bytes.
    fn random_bytes(&mut self, out: &mut [u8]) -> Result<()>;
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn random_bytes(&mut self, out: &mut [u8]) -> Result<()> {
        (**self).random_bytes(out)
    }
}
