//! Cycle cost of the key-exchange steps
//!
//! Six operations are measured in dependency order: each keygen fills the
//! buffers that the agreements after it read. A failing operation stops the
//! run, so every measurement that was reported stands on valid inputs.

use std::fmt;
use std::num::NonZeroUsize;

use isokex_api::error::ResultExt;
use isokex_api::{
    CurveParameterSet, CycleSource, Error, IsogenyEngine, RandomSource, Result, Role, Status,
};
use isokex_common::ZeroizeGuard;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::buffers::ExchangeBuffers;
use crate::config::DEFAULT_BENCH_LOOPS;
use crate::sample::BenchmarkSample;
use crate::session::Session;

/// A timed key-exchange step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KexOperation {
    KeygenA,
    KeygenB,
    AgreeA,
    AgreeB,
    AgreeValidatedA,
    AgreeValidatedB,
}

impl KexOperation {
    /// Measurement order; later steps consume earlier outputs
    pub const ORDER: [KexOperation; 6] = [
        KexOperation::KeygenA,
        KexOperation::KeygenB,
        KexOperation::AgreeA,
        KexOperation::AgreeB,
        KexOperation::AgreeValidatedA,
        KexOperation::AgreeValidatedB,
    ];

    pub fn role(self) -> Role {
        match self {
            KexOperation::KeygenA | KexOperation::AgreeA | KexOperation::AgreeValidatedA => Role::A,
            KexOperation::KeygenB | KexOperation::AgreeB | KexOperation::AgreeValidatedB => Role::B,
        }
    }

    pub fn is_keygen(self) -> bool {
        matches!(self, KexOperation::KeygenA | KexOperation::KeygenB)
    }

    /// Whether the agreement validates the peer key
    pub fn validate(self) -> bool {
        matches!(self, KexOperation::AgreeValidatedA | KexOperation::AgreeValidatedB)
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            KexOperation::KeygenA => "Alice's key generation",
            KexOperation::KeygenB => "Bob's key generation",
            KexOperation::AgreeA => "Alice's shared key computation",
            KexOperation::AgreeB => "Bob's shared key computation",
            KexOperation::AgreeValidatedA => "Alice's shared key computation including validation",
            KexOperation::AgreeValidatedB => "Bob's shared key computation including validation",
        }
    }
}

impl fmt::Display for KexOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Average cost of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub operation: KexOperation,
    pub sample: BenchmarkSample,
}

impl Measurement {
    pub fn average_cycles(&self) -> Option<u64> {
        self.sample.average()
    }
}

/// The operation that stopped a benchmark run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchFailure {
    pub operation: KexOperation,
    pub iteration: usize,
    pub status: Status,
    pub message: String,
}

/// Measurements completed before the run ended, and the failure that ended it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KexBenchReport {
    pub measurements: Vec<Measurement>,
    pub failure: Option<BenchFailure>,
}

impl KexBenchReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn status(&self) -> Status {
        self.failure.as_ref().map_or(Status::Success, |f| f.status)
    }

    pub fn measurement(&self, operation: KexOperation) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.operation == operation)
    }

    pub fn into_result(self) -> Result<Self> {
        match &self.failure {
            None => Ok(self),
            Some(failure) => Err(Error::from_status(failure.status, "key exchange benchmark")
                .unwrap_or(Error::Unknown { context: "key exchange benchmark" })
                .with_message(failure.message.clone())),
        }
    }
}

/// Times each key-exchange step over a fixed number of loops
pub struct KeyExchangeBenchmark<'e, E: IsogenyEngine, C: CycleSource> {
    engine: &'e E,
    params: &'e CurveParameterSet,
    timer: C,
    loops: NonZeroUsize,
}

impl<'e, E: IsogenyEngine, C: CycleSource> KeyExchangeBenchmark<'e, E, C> {
    pub fn new(engine: &'e E, params: &'e CurveParameterSet, timer: C) -> Self {
        Self { engine, params, timer, loops: DEFAULT_BENCH_LOOPS }
    }

    pub fn with_loops(mut self, loops: NonZeroUsize) -> Self {
        self.loops = loops;
        self
    }

    pub fn run(&mut self, random: Box<dyn RandomSource>) -> Result<KexBenchReport> {
        let mut buffers =
            ExchangeBuffers::for_params(self.params).with_context("key exchange benchmark buffers")?;
        self.run_with(random, &mut buffers)
    }

    /// Measure on caller-owned buffers, zero-filled before this returns
    ///
    /// `Err` means the run could not start. An engine failure during
    /// measurement is recorded in the report instead.
    pub fn run_with(
        &mut self,
        random: Box<dyn RandomSource>,
        buffers: &mut ExchangeBuffers,
    ) -> Result<KexBenchReport> {
        let mut buffers = ZeroizeGuard::new(buffers);
        let mut session = Session::open(self.engine, self.params, random)?;
        let mut report = KexBenchReport::default();

        for operation in KexOperation::ORDER {
            match self.measure(operation, &mut session, &mut buffers) {
                Ok(sample) => {
                    debug!(%operation, cycles = ?sample.average(), "measured");
                    report.measurements.push(Measurement { operation, sample });
                }
                Err(failure) => {
                    warn!(
                        %operation,
                        iteration = failure.iteration,
                        status = ?failure.status,
                        "benchmark stopped"
                    );
                    report.failure = Some(failure);
                    break;
                }
            }
        }

        if report.passed() {
            info!(curve = self.params.id, loops = self.loops.get(), "key exchange benchmark done");
        }
        Ok(report)
    }

    fn measure(
        &mut self,
        operation: KexOperation,
        session: &mut Session<'_, E>,
        buffers: &mut ExchangeBuffers,
    ) -> std::result::Result<BenchmarkSample, BenchFailure> {
        let role = operation.role();
        let mut sample = BenchmarkSample::new();

        for iteration in 0..self.loops.get() {
            let (result, cycles) = if operation.is_keygen() {
                let (sk, pk) = buffers.keypair_mut(role);
                self.timer.measure(|| session.generate_keypair(role, sk, pk))
            } else {
                let (sk, peer, secret) = buffers.agreement_mut(role);
                let validate = operation.validate();
                self.timer
                    .measure(|| session.agree(role, sk, peer, secret, validate))
            };

            if let Err(err) = result {
                return Err(BenchFailure {
                    operation,
                    iteration,
                    status: err.status(),
                    message: err.to_string(),
                });
            }
            sample.record(cycles);
        }
        Ok(sample)
    }
}
