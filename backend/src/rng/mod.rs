//! Deterministic random number generation
//!
//! Uses a bit-windowed linear congruential generator with two standard
//! parameterizations (Borland and Numerical Recipes).
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod lcg;

pub use lcg::{GeneratorKind, LcgGenerator, LcgParameters, RngError, MAX_MODULUS, STATE_BITS};
