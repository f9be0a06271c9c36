//! Internal utilities for the isokex harness
//!
//! Not part of the public API. Constant-time helpers, limb array
//! manipulation and the raw processor cycle counter.

pub mod constant_time;
pub mod cycles;
pub mod limbs;
