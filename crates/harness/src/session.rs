//! Scoped engine context
//!
//! A [`Session`] owns one engine context from allocation to release. The
//! context is freed when the session drops, on every exit path.

use isokex_api::{CurveParameterSet, Error, IsogenyEngine, Limb, RandomSource, Result, Role};
use tracing::trace;

/// An allocated and initialized engine context
pub struct Session<'e, E: IsogenyEngine> {
    engine: &'e E,
    ctx: Option<E::Context>,
}

impl<'e, E: IsogenyEngine> Session<'e, E> {
    /// Allocate a context for `params` and bind it to `random`
    pub fn open(
        engine: &'e E,
        params: &CurveParameterSet,
        random: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let ctx = engine.allocate_context(params)?;
        let mut session = Self { engine, ctx: Some(ctx) };
        engine.initialize_context(session.context()?, random, params)?;
        trace!(engine = engine.name(), curve = params.id, "session open");
        Ok(session)
    }

    fn context(&mut self) -> Result<&mut E::Context> {
        self.ctx.as_mut().ok_or(Error::InvalidParameter {
            context: "session",
            message: "context already released".into(),
        })
    }

    pub fn generate_keypair(
        &mut self,
        role: Role,
        private_key: &mut [u8],
        public_key: &mut [u8],
    ) -> Result<()> {
        let engine = self.engine;
        engine.generate_keypair(role, private_key, public_key, self.context()?)
    }

    pub fn agree(
        &mut self,
        role: Role,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
        validate: bool,
    ) -> Result<()> {
        let engine = self.engine;
        engine.agree(
            role,
            private_key,
            peer_public_key,
            shared_secret,
            validate,
            self.context()?,
        )
    }

    pub fn ladder(&mut self, x: &mut [Limb], scalar: &[Limb]) -> Result<()> {
        let engine = self.engine;
        engine.ladder(x, scalar, self.context()?)
    }

    pub fn sample_scalar_mod_order(&mut self, scalar: &mut [Limb]) -> Result<()> {
        let engine = self.engine;
        engine.sample_scalar_mod_order(scalar, self.context()?)
    }
}

impl<E: IsogenyEngine> Drop for Session<'_, E> {
    fn drop(&mut self) {
        self.engine.free_context(self.ctx.take());
        trace!(engine = self.engine.name(), "session closed");
    }
}
