//! Bit-windowed linear congruential generator
//!
//! The state evolves with the classic recurrence
//!
//! ```text
//! seed' = (A * seed + C) mod M
//! ```
//!
//! and every output is built from a contiguous window of bits
//! `[first_bit, last_bit]` of the new state. Low-order bits of a
//! power-of-two LCG have short periods, so a window lets a
//! parameterization skip them.
//!
//! # Determinism
//!
//! Same parameters + same seed → same sequence. The generator holds no
//! state other than its parameters and the current seed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::ConfigError;

/// Width in bits of the generator state
pub const STATE_BITS: u32 = 32;

/// Largest supported modulus (2^32)
pub const MAX_MODULUS: u64 = 1 << STATE_BITS;

/// Errors raised while building or drawing from a generator
#[derive(Debug, Error, PartialEq)]
pub enum RngError {
    #[error("Invalid bit window: first bit {first_bit} is greater than last bit {last_bit}")]
    InvalidBitWindow { first_bit: u32, last_bit: u32 },

    #[error("Last bit {last_bit} is outside the {width}-bit state")]
    LastBitOutOfRange { last_bit: u32, width: u32 },

    #[error("Modulus {0} must be in 1..=2^32")]
    InvalidModulus(u64),

    #[error("Parameter {name} = {value} must be below the modulus {modulus}")]
    ParameterOutOfRange {
        name: &'static str,
        value: u64,
        modulus: u64,
    },

    #[error("Bit window selects no values (upper bound is zero)")]
    ZeroUpperBound,

    #[error("Seed {seed} must be below the modulus {modulus}")]
    SeedOutOfRange { seed: u64, modulus: u64 },

    #[error("Empty interval [{a}, {b})")]
    EmptyInterval { a: f64, b: f64 },
}

/// Immutable LCG parameters with the derived mask and upper bound
///
/// Construct through [`LcgParameters::new`], which rejects bit windows
/// that select nothing or fall outside the 32-bit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters", into = "RawParameters")]
pub struct LcgParameters {
    modulus: u64,
    multiplier: u64,
    increment: u64,
    first_bit: u32,
    last_bit: u32,
    mask: u64,
    upper_bound: u64,
}

/// Serialized form of [`LcgParameters`] (derived fields are recomputed on load)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawParameters {
    modulus: u64,
    multiplier: u64,
    increment: u64,
    first_bit: u32,
    last_bit: u32,
}

impl TryFrom<RawParameters> for LcgParameters {
    type Error = RngError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        LcgParameters::new(
            raw.modulus,
            raw.multiplier,
            raw.increment,
            raw.first_bit,
            raw.last_bit,
        )
    }
}

impl From<LcgParameters> for RawParameters {
    fn from(params: LcgParameters) -> Self {
        RawParameters {
            modulus: params.modulus,
            multiplier: params.multiplier,
            increment: params.increment,
            first_bit: params.first_bit,
            last_bit: params.last_bit,
        }
    }
}

impl LcgParameters {
    /// Validate and build a parameter set
    ///
    /// # Errors
    ///
    /// * `InvalidBitWindow` if `first_bit > last_bit`
    /// * `LastBitOutOfRange` if `last_bit >= 32`
    /// * `InvalidModulus` unless `1 <= modulus <= 2^32`
    /// * `ParameterOutOfRange` if the multiplier or increment is not below the modulus
    /// * `ZeroUpperBound` if the window selects no values
    ///
    /// # Example
    /// ```
    /// use lattice_walk_core_rs::rng::LcgParameters;
    ///
    /// let params = LcgParameters::new(1 << 32, 22695477, 1, 16, 30).unwrap();
    /// assert_eq!(params.upper_bound(), 32768);
    /// ```
    pub fn new(
        modulus: u64,
        multiplier: u64,
        increment: u64,
        first_bit: u32,
        last_bit: u32,
    ) -> Result<Self, RngError> {
        if first_bit > last_bit {
            return Err(RngError::InvalidBitWindow {
                first_bit,
                last_bit,
            });
        }
        if last_bit >= STATE_BITS {
            return Err(RngError::LastBitOutOfRange {
                last_bit,
                width: STATE_BITS,
            });
        }
        if modulus == 0 || modulus > MAX_MODULUS {
            return Err(RngError::InvalidModulus(modulus));
        }
        if multiplier >= modulus {
            return Err(RngError::ParameterOutOfRange {
                name: "multiplier",
                value: multiplier,
                modulus,
            });
        }
        if increment >= modulus {
            return Err(RngError::ParameterOutOfRange {
                name: "increment",
                value: increment,
                modulus,
            });
        }

        let (mask, upper_bound) = derive_window(modulus, first_bit, last_bit);
        if upper_bound == 0 {
            return Err(RngError::ZeroUpperBound);
        }

        Ok(Self {
            modulus,
            multiplier,
            increment,
            first_bit,
            last_bit,
            mask,
            upper_bound,
        })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn first_bit(&self) -> u32 {
        self.first_bit
    }

    pub fn last_bit(&self) -> u32 {
        self.last_bit
    }

    /// Bit mask selecting `[first_bit, last_bit]`
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Exclusive upper bound of the windowed integer
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }
}

/// Largest `f64` strictly below the finite value `x`
fn largest_below(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Mask of bits `[first_bit, last_bit]` and the exclusive bound of the windowed value
///
/// Callers guarantee `first_bit <= last_bit < 32` and `modulus >= 1`.
fn derive_window(modulus: u64, first_bit: u32, last_bit: u32) -> (u64, u64) {
    let mask = ((1u64 << (last_bit + 1)) - 1) - ((1u64 << first_bit) - 1);
    let upper_bound = (mask.min(modulus - 1) >> first_bit) + 1;
    (mask, upper_bound)
}

/// The two standard parameterizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratorKind {
    /// Borland C/C++: M = 2^32, A = 22695477, C = 1, bits [16, 30]
    Borland,
    /// Numerical Recipes: M = 2^32, A = 1664525, C = 1013904223, bits [0, 31]
    NumericalRecipes,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 2] = [GeneratorKind::Borland, GeneratorKind::NumericalRecipes];

    /// Parameters for this kind
    pub fn parameters(&self) -> LcgParameters {
        let (multiplier, increment, first_bit, last_bit) = match self {
            GeneratorKind::Borland => (22_695_477, 1, 16, 30),
            GeneratorKind::NumericalRecipes => (1_664_525, 1_013_904_223, 0, 31),
        };
        let (mask, upper_bound) = derive_window(MAX_MODULUS, first_bit, last_bit);
        LcgParameters {
            modulus: MAX_MODULUS,
            multiplier,
            increment,
            first_bit,
            last_bit,
            mask,
            upper_bound,
        }
    }

    /// Human-readable name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            GeneratorKind::Borland => "Borland C/C++",
            GeneratorKind::NumericalRecipes => "Numerical Recipes",
        }
    }

    /// Short identifier used in file names
    pub fn slug(&self) -> &'static str {
        match self {
            GeneratorKind::Borland => "borland",
            GeneratorKind::NumericalRecipes => "numerical_recipes",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::models::normalize_selector(s).as_str() {
            "borland" => Ok(GeneratorKind::Borland),
            "numericalrecipes" | "nr" => Ok(GeneratorKind::NumericalRecipes),
            _ => Err(ConfigError::UnknownGeneratorKind(s.to_string())),
        }
    }
}

/// Bit-windowed LCG: parameters plus the evolving seed
///
/// # Example
/// ```
/// use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
///
/// let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1337).unwrap();
/// let value = rng.draw(0.0, 4.0).unwrap();
/// assert!((0.0..4.0).contains(&value));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LcgGenerator {
    params: LcgParameters,
    seed: u64,
}

impl LcgGenerator {
    /// Create a generator from explicit parameters
    ///
    /// # Errors
    /// `SeedOutOfRange` if `seed >= modulus`
    pub fn new(params: LcgParameters, seed: u64) -> Result<Self, RngError> {
        if seed >= params.modulus {
            return Err(RngError::SeedOutOfRange {
                seed,
                modulus: params.modulus,
            });
        }
        Ok(Self { params, seed })
    }

    /// Create a generator for one of the standard kinds
    pub fn from_kind(kind: GeneratorKind, seed: u64) -> Result<Self, RngError> {
        Self::new(kind.parameters(), seed)
    }

    /// Current seed (state after the last draw)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn parameters(&self) -> &LcgParameters {
        &self.params
    }

    /// Advance the state and return the windowed integer in `[0, upper_bound)`
    pub fn next_raw(&mut self) -> u64 {
        let p = &self.params;
        // A, seed < 2^32 and C < 2^32, so the sum stays below 2^64.
        self.seed = (p.multiplier * self.seed + p.increment) % p.modulus;
        (self.seed & p.mask) >> p.first_bit
    }

    /// Draw a value in `[a, b)`
    ///
    /// Advances the state exactly once.
    ///
    /// The result is clamped to `[a, prev(b)]`: with `|a|` large relative
    /// to `b - a`, the final `+ a` can otherwise round up onto `b`.
    ///
    /// # Errors
    /// `EmptyInterval` if `a >= b` or either bound is not finite. The state
    /// is not advanced in that case.
    pub fn draw(&mut self, a: f64, b: f64) -> Result<f64, RngError> {
        if !(a.is_finite() && b.is_finite()) || a >= b {
            return Err(RngError::EmptyInterval { a, b });
        }
        let raw = self.next_raw() as f64;
        let upper_bound = self.params.upper_bound as f64;

        let width = b - a;
        let value = if width.is_finite() {
            raw * width / upper_bound + a
        } else {
            // b - a overflows only for bounds of opposite sign near f64::MAX
            let t = raw / upper_bound;
            a * (1.0 - t) + b * t
        };

        if value >= b {
            Ok(largest_below(b))
        } else {
            Ok(value.max(a))
        }
    }

    /// Draw an integer index in `0..n` (floor of `draw(0, n)`)
    pub fn draw_index(&mut self, n: usize) -> Result<usize, RngError> {
        let value = self.draw(0.0, n as f64)?;
        Ok(value.floor() as usize)
    }

    /// Draw an integer in `[a, b)` (floor of `draw(a, b)`)
    pub fn draw_int(&mut self, a: i64, b: i64) -> Result<i64, RngError> {
        let value = self.draw(a as f64, b as f64)?;
        Ok(value.floor() as i64)
    }
}
