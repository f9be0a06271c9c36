//! Common implementations and shared functionality for isokex
//!
//! Secure buffers with guaranteed zero-fill, the concrete randomness
//! sources handed to engine contexts, and the processor cycle timer.

pub mod random;
pub mod security;
pub mod timer;

pub use random::RngSource;
pub use security::{SecureBuffer, ZeroizeGuard};
pub use timer::CycleTimer;
