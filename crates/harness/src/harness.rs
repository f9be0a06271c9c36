//! Top-level sequencing of the four phases
//!
//! Phases run one at a time in [`Phase::ORDER`]. The first failing phase
//! ends the run; the phases after it are recorded as skipped.

use std::fmt;

use isokex_api::{CurveParameterSet, CycleSource, Error, IsogenyEngine, Status};
use isokex_common::CycleTimer;
use serde::Serialize;
use tracing::{error, info, info_span, warn};

use crate::config::HarnessConfig;
use crate::kex_bench::{KexBenchReport, KeyExchangeBenchmark};
use crate::kex_verify::{KeyExchangeVerifier, PassOutcome, VerificationReport};
use crate::ladder_bench::{LadderBenchReport, LadderBenchmark};
use crate::ladder_verify::{LadderReport, LadderVerifier};

const RULE: &str =
    "--------------------------------------------------------------------------------";
const LABEL_WIDTH: usize = 66;

/// One stage of a harness run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    KeyExchangeVerify,
    KeyExchangeBench,
    LadderVerify,
    LadderBench,
}

impl Phase {
    pub const ORDER: [Phase; 4] = [
        Phase::KeyExchangeVerify,
        Phase::KeyExchangeBench,
        Phase::LadderVerify,
        Phase::LadderBench,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Phase::KeyExchangeVerify => "TESTING ISOGENY-BASED KEY EXCHANGE",
            Phase::KeyExchangeBench => "BENCHMARKING ISOGENY-BASED KEY EXCHANGE",
            Phase::LadderVerify => "TESTING ELLIPTIC CURVE BIGMONT",
            Phase::LadderBench => "BENCHMARKING ELLIPTIC CURVE BIGMONT",
        }
    }

    pub fn is_benchmark(self) -> bool {
        matches!(self, Phase::KeyExchangeBench | Phase::LadderBench)
    }

    fn stream(self) -> u64 {
        self as u64
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How a phase ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhaseState {
    Passed,
    Failed { status: Status, message: String },
    Skipped { reason: String },
}

/// What a phase measured or checked, when it got far enough to say
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDetail {
    KeyExchange(VerificationReport),
    KeyExchangeBench(KexBenchReport),
    Ladder(LadderReport),
    LadderBench(LadderBenchReport),
}

impl PhaseDetail {
    /// The logical failure recorded in the detail, if any
    fn failure(&self) -> Option<Error> {
        match self {
            PhaseDetail::KeyExchange(report) => report.into_result().err(),
            PhaseDetail::KeyExchangeBench(report) => report.clone().into_result().err(),
            PhaseDetail::Ladder(report) => report.clone().into_result().err(),
            PhaseDetail::LadderBench(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseResult {
    pub phase: Phase,
    #[serde(flatten)]
    pub state: PhaseState,
    pub detail: Option<PhaseDetail>,
}

impl PhaseResult {
    pub fn failed(&self) -> bool {
        matches!(self.state, PhaseState::Failed { .. })
    }

    fn skipped(phase: Phase, reason: &str) -> Self {
        Self {
            phase,
            state: PhaseState::Skipped { reason: reason.to_owned() },
            detail: None,
        }
    }
}

/// Outcome of a full harness run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessReport {
    pub curve: &'static str,
    pub engine: &'static str,
    pub config: HarnessConfig,
    pub phases: Vec<PhaseResult>,
}

impl HarnessReport {
    /// No phase failed; skipped phases do not count against the run
    pub fn passed(&self) -> bool {
        !self.phases.iter().any(PhaseResult::failed)
    }

    pub fn first_failure(&self) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.failed())
    }

    pub fn status(&self) -> Status {
        match self.first_failure().map(|p| &p.state) {
            Some(PhaseState::Failed { status, .. }) => *status,
            _ => Status::Success,
        }
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

/// Runs the verification and benchmark phases against one engine and curve
pub struct Harness<'e, E: IsogenyEngine, C: CycleSource = CycleTimer> {
    engine: &'e E,
    params: &'e CurveParameterSet,
    config: HarnessConfig,
    timer: C,
}

impl<'e, E: IsogenyEngine> Harness<'e, E, CycleTimer> {
    pub fn new(engine: &'e E, params: &'e CurveParameterSet, config: HarnessConfig) -> Self {
        Self { engine, params, config, timer: CycleTimer::new() }
    }
}

impl<'e, E: IsogenyEngine, C: CycleSource> Harness<'e, E, C> {
    /// Replace the cycle source used by both benchmark phases
    pub fn with_timer<T: CycleSource>(self, timer: T) -> Harness<'e, E, T> {
        Harness {
            engine: self.engine,
            params: self.params,
            config: self.config,
            timer,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn run(&mut self) -> HarnessReport {
        let span = info_span!("harness", engine = self.engine.name(), curve = self.params.id);
        let _enter = span.enter();

        let mut phases = Vec::with_capacity(Phase::ORDER.len());
        let mut failed = false;

        for phase in Phase::ORDER {
            let result = if failed {
                PhaseResult::skipped(phase, "earlier phase failed")
            } else if phase.is_benchmark() && !self.config.run_benchmarks {
                PhaseResult::skipped(phase, "benchmarks disabled")
            } else {
                self.run_phase(phase)
            };

            match &result.state {
                PhaseState::Passed => info!(%phase, "phase passed"),
                PhaseState::Failed { message, .. } => {
                    error!(%phase, %message, "phase failed");
                    failed = true;
                }
                PhaseState::Skipped { reason } => warn!(%phase, %reason, "phase skipped"),
            }
            phases.push(result);
        }

        HarnessReport {
            curve: self.params.id,
            engine: self.engine.name(),
            config: self.config.clone(),
            phases,
        }
    }

    fn run_phase(&mut self, phase: Phase) -> PhaseResult {
        let engine = self.engine;
        let params = self.params;
        let random = self.config.random.source(phase.stream());

        let outcome = match phase {
            Phase::KeyExchangeVerify => KeyExchangeVerifier::new(engine, params)
                .with_trials(self.config.trials)
                .run(random)
                .map(PhaseDetail::KeyExchange),
            Phase::KeyExchangeBench => KeyExchangeBenchmark::new(engine, params, &mut self.timer)
                .with_loops(self.config.bench_loops)
                .run(random)
                .map(PhaseDetail::KeyExchangeBench),
            Phase::LadderVerify => LadderVerifier::new(engine, params)
                .and_then(|verifier| verifier.run(random))
                .map(PhaseDetail::Ladder),
            Phase::LadderBench => LadderBenchmark::new(engine, params, &mut self.timer)
                .with_loops(self.config.bench_loops)
                .run(random)
                .map(PhaseDetail::LadderBench),
        };

        match outcome {
            Ok(detail) => {
                let state = match detail.failure() {
                    None => PhaseState::Passed,
                    Some(err) => failed_state(&err),
                };
                PhaseResult { phase, state, detail: Some(detail) }
            }
            Err(err) => PhaseResult { phase, state: failed_state(&err), detail: None },
        }
    }
}

fn failed_state(err: &Error) -> PhaseState {
    PhaseState::Failed { status: err.status(), message: err.to_string() }
}

/// `  label ........ value`
fn dotted(f: &mut fmt::Formatter<'_>, label: &str, value: fmt::Arguments<'_>) -> fmt::Result {
    let dots = LABEL_WIDTH.saturating_sub(label.len() + 2).max(3);
    writeln!(f, "  {} {} {}", label, ".".repeat(dots), value)
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn write_cycles(f: &mut fmt::Formatter<'_>, label: &str, average: Option<u64>) -> fmt::Result {
    let label = format!("{} runs in", label);
    match average {
        Some(cycles) => dotted(f, &label, format_args!("{:>7} cycles", cycles)),
        None => dotted(f, &label, format_args!("{:>7}", "-")),
    }
}

fn write_pass(f: &mut fmt::Formatter<'_>, label: &str, outcome: &PassOutcome) -> fmt::Result {
    match outcome {
        PassOutcome::Skipped => Ok(()),
        outcome => dotted(f, label, format_args!("{}", verdict(outcome.passed()))),
    }
}

impl fmt::Display for PhaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(PhaseDetail::KeyExchange(report)) => {
                write_pass(f, "Key exchange tests", &report.unvalidated)?;
                write_pass(f, "Key exchange and validation tests", &report.validated)?;
            }
            Some(PhaseDetail::KeyExchangeBench(report)) => {
                for m in &report.measurements {
                    write_cycles(f, m.operation.label(), m.average_cycles())?;
                }
                if let Some(failure) = &report.failure {
                    dotted(f, failure.operation.label(), format_args!("FAILED"))?;
                }
            }
            Some(PhaseDetail::Ladder(report)) => {
                dotted(
                    f,
                    "BigMont's scalar multiplication tests",
                    format_args!("{}", verdict(report.passed())),
                )?;
            }
            Some(PhaseDetail::LadderBench(report)) => {
                write_cycles(f, "BigMont's scalar multiplication", report.average_cycles())?;
            }
            None => {}
        }
        match &self.state {
            PhaseState::Skipped { reason } => writeln!(f, "  Skipped: {}", reason),
            PhaseState::Failed { message, .. } if self.detail.is_none() => {
                writeln!(f, "  Failed: {}", message)
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.phases {
            writeln!(f, "\n{}\n", RULE)?;
            writeln!(f, "{}", result.phase.title())?;
            writeln!(f, "Curve isogeny system: {}\n", self.curve)?;
            write!(f, "{}", result)?;
        }
        writeln!(f)?;
        if let Some(PhaseResult { state: PhaseState::Failed { message, .. }, .. }) =
            self.first_failure()
        {
            writeln!(f, "Error detected: {}", message)?;
        }
        Ok(())
    }
}
