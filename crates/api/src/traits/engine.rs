//! Trait definition for key-exchange engines
//!
//! The harness never touches curve arithmetic directly. Everything it needs
//! from the underlying primitive goes through [`IsogenyEngine`], so a
//! production engine, the bundled reference engine, or a fault-injecting
//! test double can be swapped in without touching the harness.

use super::random::RandomSource;
use crate::types::{Limb, Role};
use crate::Result;
use isokex_params::curve::CurveParameterSet;

/// Capability interface of a key-exchange engine.
///
/// All calls are synchronous. Buffer lengths are fixed by the
/// [`CurveParameterSet`] the context was allocated for; an engine must
/// reject mismatched lengths instead of truncating.
pub trait IsogenyEngine {
    /// Per-curve state: parameters, precomputation, randomness source.
    type Context;

    /// Returns the engine name.
    fn name(&self) -> &'static str;

    /// Allocate an uninitialized context for a parameter set.
    ///
    /// Fails with `NoMemory` when the context cannot be allocated and with
    /// `NotImplemented` when the engine does not support the curve.
    fn allocate_context(&self, params: &CurveParameterSet) -> Result<Self::Context>;

    /// Bind a context to its curve and randomness source.
    fn initialize_context(
        &self,
        ctx: &mut Self::Context,
        random: Box<dyn RandomSource>,
        params: &CurveParameterSet,
    ) -> Result<()>;

    /// Release a context. Passing `None` is a no-op.
    fn free_context(&self, ctx: Option<Self::Context>);

    /// Generate a keypair for `role`, writing both halves in place.
    fn generate_keypair(
        &self,
        role: Role,
        private_key: &mut [u8],
        public_key: &mut [u8],
        ctx: &mut Self::Context,
    ) -> Result<()>;

    /// Derive the shared secret of `role` from its own private key and the
    /// peer's public key.
    ///
    /// With `validate` set, a peer key outside the expected structure fails
    /// with `PublicKeyValidation`. Without it, no such check is made.
    fn agree(
        &self,
        role: Role,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
        validate: bool,
        ctx: &mut Self::Context,
    ) -> Result<()>;

    /// Montgomery ladder: replace the affine x-coordinate `x` with that of
    /// `scalar * (x, ·)` on the ladder curve.
    fn ladder(&self, x: &mut [Limb], scalar: &[Limb], ctx: &mut Self::Context) -> Result<()>;

    /// Sample a scalar uniformly modulo the ladder curve's group order.
    fn sample_scalar_mod_order(&self, scalar: &mut [Limb], ctx: &mut Self::Context) -> Result<()>;
}
