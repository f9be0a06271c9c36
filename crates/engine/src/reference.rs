//! [`IsogenyEngine`] implementation for the REFp62 parameter set

use core::fmt;

use isokex_api::{CurveParameterSet, IsogenyEngine, Limb, RandomSource, Result, Role};
use isokex_params::reference::REFP62;
use tracing::{debug, trace};

use crate::error::{length, EngineError};
use crate::field::FieldElement;
use crate::{exchange, ladder, sampling};

/// Reference engine
///
/// Honours the full engine contract on the small REFp62 curve so the harness
/// can run end to end. It makes no security claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl ReferenceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Parameter set this engine accepts
    pub fn parameters() -> &'static CurveParameterSet {
        &REFP62
    }
}

/// Engine context: parameters plus the injected randomness source
pub struct ReferenceContext {
    params: CurveParameterSet,
    random: Option<Box<dyn RandomSource>>,
}

impl ReferenceContext {
    pub fn is_initialized(&self) -> bool {
        self.random.is_some()
    }

    pub fn params(&self) -> &CurveParameterSet {
        &self.params
    }

    fn random(&mut self, context: &'static str) -> crate::error::Result<&mut dyn RandomSource> {
        match self.random.as_deref_mut() {
            Some(random) => Ok(random),
            None => Err(EngineError::Uninitialized(context)),
        }
    }

    fn require_initialized(&self, context: &'static str) -> crate::error::Result<()> {
        if self.random.is_none() {
            return Err(EngineError::Uninitialized(context));
        }
        Ok(())
    }
}

impl fmt::Debug for ReferenceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceContext")
            .field("curve", &self.params.id)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn supported(params: &CurveParameterSet) -> crate::error::Result<()> {
    if *params != REFP62 {
        return Err(EngineError::Unsupported { id: params.id });
    }
    Ok(())
}

impl IsogenyEngine for ReferenceEngine {
    type Context = ReferenceContext;

    fn name(&self) -> &'static str {
        "reference"
    }

    fn allocate_context(&self, params: &CurveParameterSet) -> Result<Self::Context> {
        supported(params)?;
        trace!(curve = params.id, "context allocated");
        Ok(ReferenceContext { params: *params, random: None })
    }

    fn initialize_context(
        &self,
        ctx: &mut Self::Context,
        random: Box<dyn RandomSource>,
        params: &CurveParameterSet,
    ) -> Result<()> {
        if *params != ctx.params {
            return Err(EngineError::InvalidInput {
                context: "initialize_context",
                reason: "parameter set differs from the allocated one",
            }
            .into());
        }
        ctx.random = Some(random);
        debug!(curve = params.id, "context initialized");
        Ok(())
    }

    fn free_context(&self, ctx: Option<Self::Context>) {
        if let Some(ctx) = ctx {
            trace!(curve = ctx.params.id, "context freed");
            drop(ctx);
        }
    }

    fn generate_keypair(
        &self,
        role: Role,
        private_key: &mut [u8],
        public_key: &mut [u8],
        ctx: &mut Self::Context,
    ) -> Result<()> {
        let random = ctx.random("generate_keypair")?;
        exchange::generate_keypair(random, role, private_key, public_key)
            .map_err(Into::into)
    }

    fn agree(
        &self,
        role: Role,
        private_key: &[u8],
        peer_public_key: &[u8],
        shared_secret: &mut [u8],
        validate: bool,
        ctx: &mut Self::Context,
    ) -> Result<()> {
        ctx.require_initialized("agree")?;
        exchange::agree(role, private_key, peer_public_key, shared_secret, validate)
            .map_err(Into::into)
    }

    fn ladder(&self, x: &mut [Limb], scalar: &[Limb], ctx: &mut Self::Context) -> Result<()> {
        ctx.require_initialized("ladder")?;
        length("ladder x-coordinate", x.len(), ctx.params.field_words())?;
        length("ladder scalar", scalar.len(), ctx.params.ladder_scalar_words())?;
        let point = FieldElement::from_canonical(x[0]).ok_or(EngineError::InvalidInput {
            context: "ladder",
            reason: "x-coordinate is not reduced modulo p",
        })?;
        x[0] = ladder::ladder(point, scalar).value();
        Ok(())
    }

    fn sample_scalar_mod_order(&self, scalar: &mut [Limb], ctx: &mut Self::Context) -> Result<()> {
        length("ladder scalar", scalar.len(), ctx.params.ladder_scalar_words())?;
        let random = ctx.random("sample_scalar_mod_order")?;
        let value = sampling::ladder_scalar(random)?;
        scalar.fill(0);
        scalar[0] = value;
        Ok(())
    }
}
