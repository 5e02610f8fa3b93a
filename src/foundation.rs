//! Shared primitives: error type, pixel helpers, deterministic PRNG.

pub mod core;
pub mod error;
pub mod math;
