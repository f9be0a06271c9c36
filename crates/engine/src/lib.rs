//! Reference key-exchange engine for the isokex harness
//!
//! Implements [`isokex_api::IsogenyEngine`] over the REFp62 parameter set:
//! subgroup Diffie-Hellman with projective public keys standing in for the
//! isogeny exchange, and an x-only Montgomery ladder on a small Montgomery
//! curve. Sizes and wire layout follow the same conventions as a p751
//! engine, so the harness exercises identical code paths.

pub mod error;
pub mod exchange;
pub mod field;
pub mod ladder;
pub mod reference;
pub mod sampling;

pub use error::EngineError;
pub use reference::{ReferenceContext, ReferenceEngine};
