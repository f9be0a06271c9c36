//! Capability traits

pub mod engine;
pub mod random;
pub mod timer;

pub use engine::IsogenyEngine;
pub use random::RandomSource;
pub use timer::CycleSource;
