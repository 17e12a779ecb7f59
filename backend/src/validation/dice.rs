//! Two-dice chi-squared goodness-of-fit test
//!
//! Each trial throws two six-sided dice (`floor(draw(1, 7))` twice) and
//! records their sum. The eleven sum frequencies are compared with the
//! exact two-dice distribution:
//!
//! - `T1`: all eleven categories, df = 10, critical value 18.31 (α = 0.05)
//! - `T2`: sums {2, 3} and {11, 12} merged, df = 8, critical value 15.51
//!
//! The test is diagnostic only; it never alters the generator.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::stats::chi_squared_p_value;
use super::ValidationError;
use crate::models::{ConfigError, InclusiveRange};
use crate::rng::{GeneratorKind, LcgGenerator};

/// Number of sum categories (2..=12)
pub const CATEGORY_COUNT: usize = 11;

/// Exact probabilities of the sums 2..=12
pub const THEORETICAL_FREQUENCIES: [f64; CATEGORY_COUNT] = [
    1.0 / 36.0,
    1.0 / 18.0,
    1.0 / 12.0,
    1.0 / 9.0,
    5.0 / 36.0,
    1.0 / 6.0,
    5.0 / 36.0,
    1.0 / 9.0,
    1.0 / 12.0,
    1.0 / 18.0,
    1.0 / 36.0,
];

/// χ² critical value, df = 10, α = 0.05
pub const CRITICAL_VALUE_11: f64 = 18.31;

/// χ² critical value, df = 8, α = 0.05
pub const CRITICAL_VALUE_9: f64 = 15.51;

/// Raw counts of dice sums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceCounts {
    /// `counts[i]` is the number of throws summing to `i + 2`
    pub counts: [u64; CATEGORY_COUNT],
    pub iterations: u64,
}

impl DiceCounts {
    /// Throw two dice `iterations` times
    pub fn roll(rng: &mut LcgGenerator, iterations: u64) -> Result<Self, ValidationError> {
        let mut counts = [0u64; CATEGORY_COUNT];
        for _ in 0..iterations {
            let first = rng.draw_int(1, 7)?;
            let second = rng.draw_int(1, 7)?;
            // Both dice are in 1..=6, so the index is in 0..=10.
            counts[(first + second - 2) as usize] += 1;
        }
        Ok(Self { counts, iterations })
    }

    /// Observed frequency of every category
    pub fn frequencies(&self) -> [f64; CATEGORY_COUNT] {
        let n = self.iterations as f64;
        let mut freq = [0.0; CATEGORY_COUNT];
        for (f, &c) in freq.iter_mut().zip(self.counts.iter()) {
            *f = c as f64 / n;
        }
        freq
    }
}

/// Contribution `(n·e - n·p)² / (n·p)` of one category
fn chi_term(n: f64, empirical: f64, expected: f64) -> f64 {
    let diff = n * empirical - n * expected;
    diff * diff / (n * expected)
}

/// Chi-squared statistics of a set of counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChiSquaredStatistics {
    pub empirical_frequencies: [f64; CATEGORY_COUNT],
    pub chi_squared_11: f64,
    pub chi_squared_9: f64,
    pub p_value_11: f64,
    pub p_value_9: f64,
    pub pass_11: bool,
    pub pass_9: bool,
}

impl ChiSquaredStatistics {
    /// Compute both statistics
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` when `counts.iterations` is zero
    pub fn from_counts(counts: &DiceCounts) -> Result<Self, ValidationError> {
        if counts.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "iterations",
                reason: "must be positive".to_string(),
            }
            .into());
        }

        let n = counts.iterations as f64;
        let emp = counts.frequencies();
        let th = &THEORETICAL_FREQUENCIES;

        let chi_squared_11: f64 = (0..CATEGORY_COUNT).map(|i| chi_term(n, emp[i], th[i])).sum();

        let chi_squared_9 = chi_term(n, emp[0] + emp[1], th[0] + th[1])
            + chi_term(n, emp[9] + emp[10], th[9] + th[10])
            + (2..9).map(|i| chi_term(n, emp[i], th[i])).sum::<f64>();

        Ok(Self {
            empirical_frequencies: emp,
            chi_squared_11,
            chi_squared_9,
            p_value_11: chi_squared_p_value(chi_squared_11, 10),
            p_value_9: chi_squared_p_value(chi_squared_9, 8),
            pass_11: chi_squared_11 < CRITICAL_VALUE_11,
            pass_9: chi_squared_9 < CRITICAL_VALUE_9,
        })
    }

    /// Both the 11- and 9-category tests pass
    pub fn passed(&self) -> bool {
        self.pass_11 && self.pass_9
    }
}

/// Full report for one (generator, seed) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generator: GeneratorKind,
    pub seed: u64,
    pub iterations: u64,
    pub counts: [u64; CATEGORY_COUNT],
    pub theoretical_frequencies: [f64; CATEGORY_COUNT],
    pub empirical_frequencies: [f64; CATEGORY_COUNT],
    pub chi_squared_11: f64,
    pub chi_squared_9: f64,
    pub p_value_11: f64,
    pub p_value_9: f64,
    pub pass_11: bool,
    pub pass_9: bool,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.pass_11 && self.pass_9
    }
}

/// Run the dice test on a fresh generator
///
/// # Example
/// ```
/// use lattice_walk_core_rs::rng::GeneratorKind;
/// use lattice_walk_core_rs::validation::run_dice_test;
///
/// let report = run_dice_test(GeneratorKind::Borland, 1337, 10_000).unwrap();
/// assert!(report.pass_11 && report.pass_9);
/// ```
pub fn run_dice_test(
    generator: GeneratorKind,
    seed: u64,
    iterations: u64,
) -> Result<ValidationReport, ValidationError> {
    let mut rng = LcgGenerator::from_kind(generator, seed)?;
    let counts = DiceCounts::roll(&mut rng, iterations)?;
    let stats = ChiSquaredStatistics::from_counts(&counts)?;

    if !stats.passed() {
        warn!(
            generator = generator.slug(),
            seed,
            chi_squared_11 = stats.chi_squared_11,
            chi_squared_9 = stats.chi_squared_9,
            pass_11 = stats.pass_11,
            pass_9 = stats.pass_9,
            "dice chi-squared test failed"
        );
    }

    Ok(ValidationReport {
        generator,
        seed,
        iterations,
        counts: counts.counts,
        theoretical_frequencies: THEORETICAL_FREQUENCIES,
        empirical_frequencies: stats.empirical_frequencies,
        chi_squared_11: stats.chi_squared_11,
        chi_squared_9: stats.chi_squared_9,
        p_value_11: stats.p_value_11,
        p_value_9: stats.p_value_9,
        pass_11: stats.pass_11,
        pass_9: stats.pass_9,
    })
}

/// Dice test over a range of seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceTestConfig {
    pub generator: GeneratorKind,
    pub seeds: InclusiveRange,
    pub iterations: u64,
}

impl Default for DiceTestConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::NumericalRecipes,
            seeds: InclusiveRange::new(1, 100),
            iterations: 1000,
        }
    }
}

impl DiceTestConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.seeds.validate("seeds")?;
        if self.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "iterations",
                reason: "must be positive".to_string(),
            }
            .into());
        }
        let modulus = self.generator.parameters().modulus();
        if self.seeds.last >= modulus {
            return Err(ConfigError::InvalidValue {
                field: "seeds",
                reason: format!("last seed {} must be below {}", self.seeds.last, modulus),
            }
            .into());
        }
        Ok(())
    }
}

/// Per-seed reports plus pass counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceBatchReport {
    pub generator: GeneratorKind,
    pub iterations: u64,
    pub reports: Vec<ValidationReport>,
    pub passed_11: usize,
    pub passed_9: usize,
}

impl DiceBatchReport {
    pub fn pass_rate_11(&self) -> f64 {
        self.rate(self.passed_11)
    }

    pub fn pass_rate_9(&self) -> f64 {
        self.rate(self.passed_9)
    }

    fn rate(&self, passed: usize) -> f64 {
        if self.reports.is_empty() {
            0.0
        } else {
            passed as f64 / self.reports.len() as f64
        }
    }
}

/// Run the dice test once per seed in `config.seeds`
pub fn run_dice_batch(config: &DiceTestConfig) -> Result<DiceBatchReport, ValidationError> {
    config.validate()?;

    let reports = config
        .seeds
        .iter()
        .map(|seed| run_dice_test(config.generator, seed, config.iterations))
        .collect::<Result<Vec<_>, _>>()?;

    let passed_11 = reports.iter().filter(|r| r.pass_11).count();
    let passed_9 = reports.iter().filter(|r| r.pass_9).count();

    info!(
        generator = config.generator.slug(),
        seeds = reports.len(),
        iterations = config.iterations,
        passed_11,
        passed_9,
        "dice batch complete"
    );

    Ok(DiceBatchReport {
        generator: config.generator,
        iterations: config.iterations,
        reports,
        passed_11,
        passed_9,
    })
}
