//! Test doubles for the isokex harness
//!
//! Engine wrappers that inject failures or tamper with key material around
//! a real engine, and a cycle source that replays scripted deltas.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use isokex_api::{
    CurveParameterSet, CycleSource, Error, IsogenyEngine, Limb, RandomSource, Result, Role,
};

/// Engine operations a fault can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOp {
    Allocate,
    Initialize,
    GenerateKeypair,
    /// `agree` with validation off
    Agree,
    /// `agree` with validation on
    AgreeValidated,
    Ladder,
    Sample,
}

/// Wraps an engine and fails the n-th call (1-based) of one operation
pub struct FaultInjectingEngine<E> {
    inner: E,
    fault: Option<(EngineOp, usize, Error)>,
    calls: RefCell<HashMap<EngineOp, usize>>,
    frees: Cell<usize>,
}

impl<E: IsogenyEngine> FaultInjectingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            fault: None,
            calls: RefCell::new(HashMap::new()),
            frees: Cell::new(0),
        }
    }

    pub fn failing(mut self, op: EngineOp, nth: usize, error: Error) -> Self {
        self.fault = Some((op, nth, error));
        self
    }

    /// Calls made so far to `op`, including the failing one
    pub fn calls(&self, op: EngineOp) -> usize {
        self.calls.borrow().get(&op).copied().unwrap_or(0)
    }

    /// Contexts released so far
    pub fn frees(&self) -> usize {
        self.frees.get()
    }

    fn enter(&self, op: EngineOp) -> Result<()> {
        let mut calls = self.calls.borrow_mut();
        let count = calls.entry(op).or_insert(0);
        *count += 1;
        match &self.fault {
            Some((fault_op, nth, error)) if *fault_op == op && *nth == *count => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

impl<E: IsogenyEngine> IsogenyEngine for FaultInjectingEngine<E> {
    type Context = E::Context;

    fn name(&self) -> &'static str {
        "fault-injecting"
    }

    fn allocate_context(&self, params: &CurveParameterSet) -> Result<Self::Context> {
        self.enter(EngineOp::Allocate)?;
        self.inner.allocate_context(params)
    }

    fn initialize_context(
        &self,
        ctx: &mut Self::Context,
        random: Box<dyn RandomSource>,
        params: &CurveParameterSet,
    ) -> Result<()> {
        self.enter(EngineOp::Initialize)?;
        self.inner.initialize_context(ctx, random, params)
    }

    fn free_context(&self, ctx: Option<Self::Context>) {
        if ctx.is_some() {
            self.frees.set(self.frees.get() + 1);
        }
        self.inner.free_context(ctx)
    }

    fn generate_keypair(
        &self,
        role: Role,
        private_key: &mut [u8],
        public_key: &mut [u8],
        ctx: &mut Self::Context,
    ) -> Result<()> {
        self.enter(EngineOp::GenerateKeypair)?;
        self.inner.generate_keypair(role, private_key, public_key, ctx)
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
        self.enter(if validate { EngineOp::AgreeValidated } else { EngineOp::Agree })?;
        self.inner
            .agree(role, private_key, peer_public_key, shared_secret, validate, ctx)
    }

    fn ladder(&self, x: &mut [Limb], scalar: &[Limb], ctx: &mut Self::Context) -> Result<()> {
        self.enter(EngineOp::Ladder)?;
        self.inner.ladder(x, scalar, ctx)
    }

    fn sample_scalar_mod_order(&self, scalar: &mut [Limb], ctx: &mut Self::Context) -> Result<()> {
        self.enter(EngineOp::Sample)?;
        self.inner.sample_scalar_mod_order(scalar, ctx)
    }
}

/// When [`CorruptingEngine`] tampers with role B's public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// Right after B's key generation, in the shared buffer
    AfterKeygen,
    /// On a copy handed to A's validated agreement only
    ValidatedAgreement,
}

/// Wraps an engine and flips one bit in role B's public key
///
/// The bit sits in the real part of the first coordinate, so the change is
/// visible with and without validation.
pub struct CorruptingEngine<E> {
    inner: E,
    when: Corruption,
}

impl<E: IsogenyEngine> CorruptingEngine<E> {
    pub fn new(inner: E, when: Corruption) -> Self {
        Self { inner, when }
    }

    /// Byte offset of the flipped bit within a public key
    pub fn offset(public_key_len: usize) -> usize {
        public_key_len / 8
    }
}

impl<E: IsogenyEngine> IsogenyEngine for CorruptingEngine<E> {
    type Context = E::Context;

    fn name(&self) -> &'static str {
        "corrupting"
    }

    fn allocate_context(&self, params: &CurveParameterSet) -> Result<Self::Context> {
        self.inner.allocate_context(params)
    }

    fn initialize_context(
        &self,
        ctx: &mut Self::Context,
        random: Box<dyn RandomSource>,
        params: &CurveParameterSet,
    ) -> Result<()> {
        self.inner.initialize_context(ctx, random, params)
    }

    fn free_context(&self, ctx: Option<Self::Context>) {
        self.inner.free_context(ctx)
    }

    fn generate_keypair(
        &self,
        role: Role,
        private_key: &mut [u8],
        public_key: &mut [u8],
        ctx: &mut Self::Context,
    ) -> Result<()> {
        self.inner.generate_keypair(role, private_key, public_key, ctx)?;
        if role == Role::B && self.when == Corruption::AfterKeygen {
            public_key[Self::offset(public_key.len())] ^= 0x01;
        }
        Ok(())
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
        if role == Role::A && validate && self.when == Corruption::ValidatedAgreement {
            let mut tampered = peer_public_key.to_vec();
            let at = Self::offset(tampered.len());
            tampered[at] ^= 0x01;
            return self
                .inner
                .agree(role, private_key, &tampered, shared_secret, validate, ctx);
        }
        self.inner
            .agree(role, private_key, peer_public_key, shared_secret, validate, ctx)
    }

    fn ladder(&self, x: &mut [Limb], scalar: &[Limb], ctx: &mut Self::Context) -> Result<()> {
        self.inner.ladder(x, scalar, ctx)
    }

    fn sample_scalar_mod_order(&self, scalar: &mut [Limb], ctx: &mut Self::Context) -> Result<()> {
        self.inner.sample_scalar_mod_order(scalar, ctx)
    }
}

/// Cycle source whose consecutive measurements return the given deltas
///
/// Each `measure` reads two timestamps; the second one is the first plus
/// the next delta (wrapping). Deltas repeat once exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedCycles {
    deltas: Vec<u64>,
    next: usize,
    now: u64,
    started: bool,
}

impl ScriptedCycles {
    pub fn new(deltas: impl Into<Vec<u64>>) -> Self {
        Self::starting_at(0, deltas)
    }

    /// Begin the counter at `start`, to exercise wrap-around
    pub fn starting_at(start: u64, deltas: impl Into<Vec<u64>>) -> Self {
        Self { deltas: deltas.into(), next: 0, now: start, started: false }
    }

    /// Measurements taken so far
    pub fn measurements(&self) -> usize {
        self.next
    }
}

impl CycleSource for ScriptedCycles {
    fn timestamp(&mut self) -> u64 {
        if self.started && !self.deltas.is_empty() {
            let delta = self.deltas[self.next % self.deltas.len()];
            self.next += 1;
            self.now = self.now.wrapping_add(delta);
        }
        self.started = !self.started;
        self.now
    }
}

/// Little-endian byte encoding of a limb array
pub fn limbs_to_le_bytes(limbs: &[Limb]) -> Vec<u8> {
    limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limb_bytes_are_little_endian() {
        let limbs = [0x0807_0605_0403_0201, 0x100F_0E0D_0C0B_0A09];
        let expected: Vec<u8> = (1..=16).collect();
        assert_eq!(limbs_to_le_bytes(&limbs), expected);
        assert!(limbs_to_le_bytes(&[]).is_empty());
    }

    #[test]
    fn scripted_cycles_replay_deltas() {
        let mut cycles = ScriptedCycles::starting_at(u64::MAX - 1, [5, 7]);
        assert_eq!(cycles.measure(|| ()).1, 5);
        assert_eq!(cycles.measure(|| ()).1, 7);
        assert_eq!(cycles.measure(|| ()).1, 5);
        assert_eq!(cycles.measurements(), 3);
    }
}
