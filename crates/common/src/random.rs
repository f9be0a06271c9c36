//! Concrete randomness sources for engine contexts

use isokex_api::error::validation;
use isokex_api::{RandomSource, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// [`RandomSource`] backed by any cryptographic RNG
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<OsRng> {
    /// Operating system entropy
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl RngSource<ChaCha20Rng> {
    /// Reproducible ChaCha20 stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Independent ChaCha20 stream `stream` under one seed
    pub fn seeded_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self::new(rng)
    }
}

impl<R: RngCore + CryptoRng> RandomSource for RngSource<R> {
    fn random_bytes(&mut self, out: &mut [u8]) -> Result<()> {
        validation::parameter(!out.is_empty(), "random_bytes", "zero-length request")?;
        self.rng.try_fill_bytes(out).map_err(|e| {
            isokex_api::Error::RandomGenerationError {
                context: "random_bytes",
                message: e.to_string(),
            }
        })
    }
}
