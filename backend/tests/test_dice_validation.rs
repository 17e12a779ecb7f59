//! Integration tests for the two-dice chi-squared validator

use lattice_walk_core_rs::models::InclusiveRange;
use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
use lattice_walk_core_rs::validation::{
    run_dice_batch, run_dice_test, ChiSquaredStatistics, DiceCounts, DiceTestConfig, CATEGORY_COUNT,
    CRITICAL_VALUE_11, CRITICAL_VALUE_9, THEORETICAL_FREQUENCIES,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

#[test]
fn test_borland_reference_counts() {
    let report = run_dice_test(GeneratorKind::Borland, 1337, 10_000).unwrap();

    assert_eq!(
        report.counts,
        [273, 555, 830, 1121, 1365, 1739, 1378, 1072, 823, 544, 300]
    );
    assert_eq!(report.counts.iter().sum::<u64>(), 10_000);
    assert_close(report.chi_squared_11, 7.34258, 1e-4);
    assert_close(report.chi_squared_9, 5.41238, 1e-4);
    assert!(report.pass_11);
    assert!(report.pass_9);
    assert!(report.passed());
}

#[test]
fn test_numerical_recipes_reference_counts() {
    let report = run_dice_test(GeneratorKind::NumericalRecipes, 42, 10_000).unwrap();

    assert_eq!(
        report.counts,
        [293, 571, 786, 1108, 1405, 1679, 1345, 1068, 856, 584, 305]
    );
    assert_close(report.chi_squared_11, 12.0392, 1e-3);
    assert_close(report.chi_squared_9, 11.4986, 1e-3);
    assert!(report.passed());
}

#[test]
fn test_theoretical_frequencies() {
    assert_eq!(THEORETICAL_FREQUENCIES.len(), CATEGORY_COUNT);
    assert_close(THEORETICAL_FREQUENCIES.iter().sum::<f64>(), 1.0, 1e-12);
    assert_close(THEORETICAL_FREQUENCIES[5], 1.0 / 6.0, 1e-12);
    assert_eq!(THEORETICAL_FREQUENCIES[0], THEORETICAL_FREQUENCIES[10]);
    assert_eq!(CRITICAL_VALUE_11, 18.31);
    assert_eq!(CRITICAL_VALUE_9, 15.51);
}

#[test]
fn test_empirical_frequencies_sum_to_one() {
    let report = run_dice_test(GeneratorKind::Borland, 7, 5_000).unwrap();
    assert_close(report.empirical_frequencies.iter().sum::<f64>(), 1.0, 1e-9);
    assert_close(report.empirical_frequencies[0], report.counts[0] as f64 / 5_000.0, 1e-12);
}

#[test]
fn test_p_values_agree_with_critical_values() {
    let report = run_dice_test(GeneratorKind::Borland, 1337, 10_000).unwrap();

    assert!(report.p_value_11 > 0.05 && report.p_value_11 <= 1.0);
    assert!(report.p_value_9 > 0.05 && report.p_value_9 <= 1.0);
}

#[test]
fn test_degenerate_counts_fail() {
    // Every throw lands on 7
    let mut counts = DiceCounts {
        counts: [0; CATEGORY_COUNT],
        iterations: 600,
    };
    counts.counts[5] = 600;

    let stats = ChiSquaredStatistics::from_counts(&counts).unwrap();

    assert!(stats.chi_squared_11 > CRITICAL_VALUE_11);
    assert!(stats.chi_squared_9 > CRITICAL_VALUE_9);
    assert!(!stats.pass_11);
    assert!(!stats.pass_9);
    assert!(stats.p_value_11 < 1e-6);
}

#[test]
fn test_zero_iterations_rejected() {
    assert!(run_dice_test(GeneratorKind::Borland, 1337, 0).is_err());

    let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1337).unwrap();
    let empty = DiceCounts::roll(&mut rng, 0).unwrap();
    assert_eq!(rng.seed(), 1337);
    assert!(ChiSquaredStatistics::from_counts(&empty).is_err());
}

#[test]
fn test_borland_passes_at_least_95_percent_of_seeds() {
    let config = DiceTestConfig {
        generator: GeneratorKind::Borland,
        seeds: InclusiveRange::new(1, 100),
        iterations: 10_000,
    };

    let batch = run_dice_batch(&config).unwrap();

    assert_eq!(batch.reports.len(), 100);
    assert!(batch.passed_11 >= 95, "11-category passes: {}", batch.passed_11);
    assert!(batch.passed_9 >= 95, "9-category passes: {}", batch.passed_9);
    assert!(batch.pass_rate_11() >= 0.95);
}

#[test]
fn test_numerical_recipes_hundred_seed_batch() {
    // The full 32-bit window passes less often than Borland's bits 16..=30:
    // seeds 1..=500 give 471 and 465 passes.
    let config = DiceTestConfig {
        generator: GeneratorKind::NumericalRecipes,
        seeds: InclusiveRange::new(1, 100),
        iterations: 10_000,
    };

    let batch = run_dice_batch(&config).unwrap();

    assert_eq!(batch.reports.len(), 100);
    assert_eq!(batch.passed_11, 89);
    assert_eq!(batch.passed_9, 90);
    assert!(batch.pass_rate_11() >= 0.85);
}

#[test]
fn test_batch_config_validation() {
    let empty = DiceTestConfig {
        seeds: InclusiveRange::new(10, 1),
        ..DiceTestConfig::default()
    };
    assert!(run_dice_batch(&empty).is_err());

    let no_throws = DiceTestConfig {
        iterations: 0,
        ..DiceTestConfig::default()
    };
    assert!(run_dice_batch(&no_throws).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_statistics_are_non_negative(seed in 0u64..(1u64 << 32), iterations in 1u64..2_000) {
        for kind in GeneratorKind::ALL {
            let report = run_dice_test(kind, seed, iterations).unwrap();
            prop_assert!(report.chi_squared_11 >= 0.0);
            prop_assert!(report.chi_squared_9 >= 0.0);
            prop_assert!((0.0..=1.0).contains(&report.p_value_11));
            prop_assert_eq!(report.counts.iter().sum::<u64>(), iterations);
        }
    }
}
