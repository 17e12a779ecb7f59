//! Walk scenarios with fixed generator streams
//!
//! Trajectories are pinned for the Borland generator seeded with 1337 on a
//! 10 × 10 grid (start cell (5, 5)).

use lattice_walk_core_rs::models::{GridBounds, Position, WalkConfig, WalkKind};
use lattice_walk_core_rs::orchestrator::{run_simulation, SimulationConfig};
use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
use lattice_walk_core_rs::walk::{create_policy, run_walk};

fn grid(width: usize, height: usize) -> GridBounds {
    GridBounds::new(width, height).unwrap()
}

fn borland(seed: u64) -> LcgGenerator {
    LcgGenerator::from_kind(GeneratorKind::Borland, seed).unwrap()
}

fn points(coords: &[(i64, i64)]) -> Vec<Position> {
    coords.iter().copied().map(Position::from).collect()
}

// ============================================================================
// Zero steps
// ============================================================================

#[test]
fn test_zero_steps_is_start_only() {
    for kind in WalkKind::ALL {
        let config = WalkConfig::new(kind, grid(10, 10), 0);
        let mut rng = borland(1337);

        let result = run_walk(&config, &mut rng).unwrap();

        assert!(result.success, "{}", kind);
        assert_eq!(result.trajectory, vec![Position::new(5, 5)]);
        assert_eq!(result.squared_displacement, 0);
        assert_eq!(rng.seed(), 1337, "{} consumed draws for zero steps", kind);
    }
}

// ============================================================================
// Golden trajectories
// ============================================================================

#[test]
fn test_random_walk_five_steps() {
    let config = WalkConfig::new(WalkKind::Random, grid(10, 10), 5);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(result.success);
    assert_eq!(
        result.trajectory,
        points(&[(5, 5), (5, 6), (5, 7), (4, 7), (4, 6), (4, 7)])
    );
    assert_eq!(result.squared_displacement, 5);
}

#[test]
fn test_random_walk_ten_steps() {
    let config = WalkConfig::new(WalkKind::Random, grid(10, 10), 10);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(result.success);
    assert_eq!(result.trajectory.len(), 11);
    assert_eq!(result.final_position(), Some(Position::new(5, 7)));
    assert_eq!(result.squared_displacement, 4);
}

#[test]
fn test_nonreversing_walk_ten_steps() {
    let config = WalkConfig::new(WalkKind::Nonreversing, grid(10, 10), 10);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(result.success);
    assert_eq!(
        result.trajectory,
        points(&[
            (5, 5),
            (5, 6),
            (5, 7),
            (4, 7),
            (4, 6),
            (4, 5),
            (5, 5),
            (6, 5),
            (7, 5),
            (7, 6),
            (6, 6),
        ])
    );
    assert_eq!(result.squared_displacement, 2);
}

#[test]
fn test_self_avoiding_walk_ten_steps() {
    let config = WalkConfig::new(WalkKind::SelfAvoiding, grid(10, 10), 10);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(result.success);
    assert_eq!(result.restarts, 1);
    assert_eq!(
        result.trajectory,
        points(&[
            (5, 5),
            (4, 5),
            (3, 5),
            (2, 5),
            (2, 6),
            (1, 6),
            (1, 7),
            (2, 7),
            (3, 7),
            (4, 7),
            (5, 7),
        ])
    );
    assert_eq!(result.squared_displacement, 4);
}

#[test]
fn test_self_avoiding_default_grid_thirty_steps() {
    let config = WalkConfig::new(WalkKind::SelfAvoiding, GridBounds::default(), 30);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(result.success);
    assert_eq!(result.restarts, 11);
    assert_eq!(result.trajectory.len(), 31);
    assert_eq!(result.squared_displacement, 74);
}

// ============================================================================
// Dead ends
// ============================================================================

#[test]
fn test_self_avoiding_two_by_two_four_steps_fails() {
    // Four steps need five distinct cells; the grid only has four.
    let config = WalkConfig::new(WalkKind::SelfAvoiding, grid(2, 2), 4).with_max_restarts(100);
    let result = run_walk(&config, &mut borland(1)).unwrap();

    assert!(!result.success);
    assert_eq!(result.restarts, 100);
    assert!(result.trajectory.len() <= 4);
}

#[test]
fn test_self_avoiding_two_by_two_three_steps_succeeds() {
    let config = WalkConfig::new(WalkKind::SelfAvoiding, grid(2, 2), 3).with_max_restarts(100);
    let result = run_walk(&config, &mut borland(1)).unwrap();

    assert!(result.success);
    assert_eq!(result.trajectory.len(), 4);

    let mut cells = result.trajectory.clone();
    cells.sort();
    cells.dedup();
    assert_eq!(cells.len(), 4);
}

#[test]
fn test_random_walk_on_single_cell_gives_up() {
    let config = WalkConfig::new(WalkKind::Random, grid(1, 1), 3).with_max_step_retries(50);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(!result.success);
    assert_eq!(result.trajectory, vec![Position::new(0, 0)]);
    assert_eq!(result.rejected_candidates, 50);
}

#[test]
fn test_unbounded_step_count_gives_up_without_allocating() {
    for kind in [WalkKind::Random, WalkKind::Nonreversing] {
        let config = WalkConfig::new(kind, grid(1, 1), usize::MAX).with_max_step_retries(5);
        let result = run_walk(&config, &mut borland(1337)).unwrap();

        assert!(!result.success, "{:?}", kind);
        assert_eq!(result.trajectory, vec![Position::new(0, 0)]);
    }

    // A 10 x 10 grid holds at most 100 cells, so every attempt collides.
    let config = WalkConfig::new(WalkKind::SelfAvoiding, grid(10, 10), usize::MAX).with_max_restarts(3);
    let result = run_walk(&config, &mut borland(1337)).unwrap();

    assert!(!result.success);
    assert_eq!(result.restarts, 3);
    assert!(result.trajectory.len() <= 100);
}

// ============================================================================
// Policies and orchestration
// ============================================================================

#[test]
fn test_policy_factory_matches_run_walk() {
    for kind in WalkKind::ALL {
        let config = WalkConfig::new(kind, grid(10, 10), 10);
        let mut policy = create_policy(kind);
        assert_eq!(policy.kind(), kind);

        let direct = policy.walk(&config, &mut borland(1337)).unwrap();
        let dispatched = run_walk(&config, &mut borland(1337)).unwrap();
        assert_eq!(direct, dispatched);
    }
}

#[test]
fn test_run_simulation_summary() {
    let config = SimulationConfig {
        generator: GeneratorKind::Borland,
        seed: 1337,
        walk: WalkConfig::new(WalkKind::Nonreversing, grid(10, 10), 10),
    };

    let outcome = run_simulation(&config).unwrap();

    assert_eq!(outcome.summary.rng_kind, GeneratorKind::Borland);
    assert_eq!(outcome.summary.walk_kind, WalkKind::Nonreversing);
    assert_eq!(outcome.summary.seed, 1337);
    assert_eq!(outcome.summary.step_count, 10);
    assert_eq!(outcome.summary.squared_displacement, 2);
    assert!(outcome.summary.success);
    assert_eq!(outcome.result.final_position(), Some(Position::new(6, 6)));
}

#[test]
fn test_run_simulation_rejects_seed_zero() {
    let config = SimulationConfig {
        seed: 0,
        ..SimulationConfig::default()
    };
    assert!(run_simulation(&config).is_err());
}
