//! Key-exchange correctness checks
//!
//! Two passes over the same buffers. The first generates fresh keypairs on
//! every trial and requires both parties to derive the same secret with
//! validation off. The second reuses the last keypairs of the first pass and
//! repeats the agreement with validation on; a rejection there is a false
//! rejection of a legitimately generated key.

use std::num::NonZeroUsize;

use isokex_api::error::ResultExt;
use isokex_api::{CurveParameterSet, Error, IsogenyEngine, RandomSource, Result, Role, Status};
use isokex_common::ZeroizeGuard;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::buffers::ExchangeBuffers;
use crate::config::DEFAULT_TRIALS;
use crate::session::Session;

/// Result of one verification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PassOutcome {
    /// Every trial succeeded
    Passed { trials: usize },
    /// The two secrets differed at this trial
    SharedKeyMismatch { trial: usize },
    /// Validation rejected the peer key of a legitimate keypair
    ValidationRejected { trial: usize, role: Role },
    /// Not attempted
    Skipped,
}

impl PassOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, PassOutcome::Passed { .. })
    }

    pub fn status(&self) -> Status {
        match self {
            PassOutcome::Passed { .. } | PassOutcome::Skipped => Status::Success,
            PassOutcome::SharedKeyMismatch { .. } => Status::SharedKey,
            PassOutcome::ValidationRejected { .. } => Status::PublicKeyValidation,
        }
    }
}

/// Outcome of both passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Agreement without public key validation
    pub unvalidated: PassOutcome,
    /// Agreement with public key validation
    pub validated: PassOutcome,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.unvalidated.passed() && self.validated.passed()
    }

    /// Status of the first failing pass
    pub fn status(&self) -> Status {
        match self.unvalidated.status() {
            Status::Success => self.validated.status(),
            failed => failed,
        }
    }

    /// Turn a failed report into the matching error
    pub fn into_result(self) -> Result<Self> {
        match (self.unvalidated, self.validated) {
            (PassOutcome::SharedKeyMismatch { .. }, _) => Err(Error::SharedKeyMismatch {
                context: "key exchange without validation",
            }),
            (_, PassOutcome::SharedKeyMismatch { .. }) => Err(Error::SharedKeyMismatch {
                context: "key exchange with validation",
            }),
            (_, PassOutcome::ValidationRejected { role, .. }) => Err(Error::PublicKeyValidation {
                context: "key exchange with validation",
                message: format!("{} rejected a legitimately generated public key", role),
            }),
            _ => Ok(self),
        }
    }
}

/// Drives the two verification passes against an engine
pub struct KeyExchangeVerifier<'e, E: IsogenyEngine> {
    engine: &'e E,
    params: &'e CurveParameterSet,
    trials: NonZeroUsize,
}

impl<'e, E: IsogenyEngine> KeyExchangeVerifier<'e, E> {
    pub fn new(engine: &'e E, params: &'e CurveParameterSet) -> Self {
        Self {
            engine,
            params,
            trials: DEFAULT_TRIALS,
        }
    }

    pub fn with_trials(mut self, trials: NonZeroUsize) -> Self {
        self.trials = trials;
        self
    }

    /// Run both passes on freshly allocated buffers
    pub fn run(&self, random: Box<dyn RandomSource>) -> Result<VerificationReport> {
        let mut buffers =
            ExchangeBuffers::for_params(self.params).with_context("key exchange test buffers")?;
        self.run_with(random, &mut buffers)
    }

    /// Run both passes on caller-owned buffers
    ///
    /// The buffers are zero-filled before this returns, whatever the outcome.
    pub fn run_with(
        &self,
        random: Box<dyn RandomSource>,
        buffers: &mut ExchangeBuffers,
    ) -> Result<VerificationReport> {
        // declared before the session, so the context is freed first
        let mut buffers = ZeroizeGuard::new(buffers);
        let mut session = Session::open(self.engine, self.params, random)?;

        let unvalidated = self.unvalidated_pass(&mut session, &mut buffers)?;
        let validated = if unvalidated.passed() {
            self.validated_pass(&mut session, &mut buffers)?
        } else {
            PassOutcome::Skipped
        };

        let report = VerificationReport { unvalidated, validated };
        if report.passed() {
            info!(curve = self.params.id, trials = self.trials.get(), "key exchange tests passed");
        } else {
            warn!(curve = self.params.id, ?report, "key exchange tests failed");
        }
        Ok(report)
    }

    fn unvalidated_pass(
        &self,
        session: &mut Session<'_, E>,
        buffers: &mut ExchangeBuffers,
    ) -> Result<PassOutcome> {
        for trial in 0..self.trials.get() {
            for role in Role::ALL {
                let (sk, pk) = buffers.keypair_mut(role);
                session.generate_keypair(role, sk, pk)?;
            }
            for role in Role::ALL {
                let (sk, peer, secret) = buffers.agreement_mut(role);
                session.agree(role, sk, peer, secret, false)?;
            }
            if !buffers.secrets_match() {
                warn!(trial, "shared secrets differ");
                return Ok(PassOutcome::SharedKeyMismatch { trial });
            }
            debug!(trial, "shared secrets match");
        }
        Ok(PassOutcome::Passed { trials: self.trials.get() })
    }

    fn validated_pass(
        &self,
        session: &mut Session<'_, E>,
        buffers: &mut ExchangeBuffers,
    ) -> Result<PassOutcome> {
        for trial in 0..self.trials.get() {
            for role in Role::ALL {
                let (sk, peer, secret) = buffers.agreement_mut(role);
                match session.agree(role, sk, peer, secret, true) {
                    Ok(()) => {}
                    Err(err) if err.is_validation_failure() => {
                        warn!(trial, %role, %err, "legitimate public key rejected");
                        return Ok(PassOutcome::ValidationRejected { trial, role });
                    }
                    Err(err) => return Err(err),
                }
            }
            if !buffers.secrets_match() {
                warn!(trial, "shared secrets differ under validation");
                return Ok(PassOutcome::SharedKeyMismatch { trial });
            }
            debug!(trial, "validated shared secrets match");
        }
        Ok(PassOutcome::Passed { trials: self.trials.get() })
    }
}
