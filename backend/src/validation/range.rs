//! Min / max / mean summary of raw draws

use serde::{Deserialize, Serialize};

use super::ValidationError;
use crate::models::ConfigError;
use crate::rng::LcgGenerator;

/// Summary of `iterations` draws over `[a, b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub a: f64,
    pub b: f64,
    pub iterations: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Draw `iterations` values in `[a, b)` and summarize them
///
/// # Example
/// ```
/// use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
/// use lattice_walk_core_rs::validation::summarize_range;
///
/// let mut rng = LcgGenerator::from_kind(GeneratorKind::NumericalRecipes, 42).unwrap();
/// let summary = summarize_range(&mut rng, 0.0, 10.0, 10_000).unwrap();
/// assert!(summary.min >= 0.0 && summary.max < 10.0);
/// ```
pub fn summarize_range(
    rng: &mut LcgGenerator,
    a: f64,
    b: f64,
    iterations: u64,
) -> Result<RangeSummary, ValidationError> {
    if iterations == 0 {
        return Err(ConfigError::InvalidValue {
            field: "iterations",
            reason: "must be positive".to_string(),
        }
        .into());
    }

    let mut min = b;
    let mut max = a;
    let mut sum = 0.0;
    for _ in 0..iterations {
        let value = rng.draw(a, b)?;
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }

    Ok(RangeSummary {
        a,
        b,
        iterations,
        min,
        max,
        mean: sum / iterations as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GeneratorKind, RngError};

    #[test]
    fn test_mean_near_midpoint() {
        let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 2024).unwrap();
        let summary = summarize_range(&mut rng, -5.0, 5.0, 100_000).unwrap();
        assert!(summary.min >= -5.0);
        assert!(summary.max < 5.0);
        assert!(summary.mean.abs() < 0.1, "mean {} too far from 0", summary.mean);
    }

    #[test]
    fn test_invalid_interval() {
        let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1).unwrap();
        let err = summarize_range(&mut rng, 2.0, 1.0, 10).unwrap_err();
        assert_eq!(err, ValidationError::Rng(RngError::EmptyInterval { a: 2.0, b: 1.0 }));
    }
}
