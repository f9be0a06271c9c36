//! Verification and cycle benchmarking harness for isogeny key-exchange engines
//!
//! The harness drives any [`IsogenyEngine`](isokex_api::IsogenyEngine)
//! through four phases: key-exchange correctness, key-exchange timing, a
//! known-answer ladder trace and ladder timing. Every key and secret buffer
//! is zero-filled when its phase ends, whatever the outcome.

pub mod buffers;
pub mod config;
pub mod harness;
pub mod kex_bench;
pub mod kex_verify;
pub mod ladder_bench;
pub mod ladder_verify;
pub mod sample;
pub mod session;

pub use buffers::ExchangeBuffers;
pub use config::{HarnessConfig, RandomSpec};
pub use harness::{Harness, HarnessReport, Phase, PhaseDetail, PhaseResult, PhaseState};
pub use kex_bench::{BenchFailure, KexBenchReport, KexOperation, KeyExchangeBenchmark, Measurement};
pub use kex_verify::{KeyExchangeVerifier, PassOutcome, VerificationReport};
pub use ladder_bench::{LadderBenchReport, LadderBenchmark};
pub use ladder_verify::{LadderReport, LadderVerifier};
pub use sample::BenchmarkSample;
pub use session::Session;
