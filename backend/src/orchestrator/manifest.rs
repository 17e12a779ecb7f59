//! Run manifest - records which configuration produced an export
//!
//! An aggregate export is overwritten on every run, so the manifest pins
//! the exact sweep behind it through a hash of every field of the
//! `AggregationConfig`.
//!
//! # Critical Invariants
//!
//! - **Determinism**: Same config produces the same hash and the same rows
//! - **Config Matching**: A manifest only verifies against the config that produced it

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{AggregateRow, WalkKind};
use crate::orchestrator::engine::{AggregateReport, AggregationConfig, SimulationError};
use crate::rng::GeneratorKind;

/// Manifest written next to an aggregate export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub generator: GeneratorKind,
    pub walk_kind: WalkKind,

    /// See [`compute_config_hash`]
    pub config_hash: String,

    pub config: AggregationConfig,
    pub rows: Vec<AggregateRow>,
}

impl RunManifest {
    pub fn new(config: &AggregationConfig, report: &AggregateReport) -> Self {
        Self {
            generator: report.generator,
            walk_kind: report.walk_kind,
            config_hash: compute_config_hash(config),
            config: config.clone(),
            rows: report.rows.clone(),
        }
    }

    /// True when `config` hashes to this manifest's hash
    pub fn matches(&self, config: &AggregationConfig) -> bool {
        compute_config_hash(config) == self.config_hash
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimulationError::SerializationError(format!("Manifest serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| {
            SimulationError::SerializationError(format!("Manifest parse failed: {}", e))
        })
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// SHA256 of a sweep, as 64 lowercase hex digits
pub fn compute_config_hash(config: &AggregationConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sweep_key(config).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One `name=value;` pair per field that shapes the aggregate rows
fn sweep_key(config: &AggregationConfig) -> String {
    let AggregationConfig {
        generator,
        walk_kind,
        grid,
        seeds,
        steps,
        max_restarts,
        max_step_retries,
    } = config;

    format!(
        "generator={};walk={};grid={}x{};seeds={}..={};steps={}..={};max_restarts={};max_step_retries={};",
        generator.slug(),
        walk_kind.slug(),
        grid.width,
        grid.height,
        seeds.first,
        seeds.last,
        steps.first,
        steps.last,
        max_restarts,
        max_step_retries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridBounds, InclusiveRange};
    use crate::orchestrator::Aggregator;

    fn small_config() -> AggregationConfig {
        AggregationConfig {
            seeds: InclusiveRange::new(1, 5),
            steps: InclusiveRange::new(1, 3),
            ..AggregationConfig::default()
        }
    }

    #[test]
    fn test_compute_config_hash_deterministic() {
        let hash1 = compute_config_hash(&small_config());
        let hash2 = compute_config_hash(&small_config());
        assert_eq!(hash1, hash2, "Same config should produce same hash");
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_compute_config_hash_different_for_different_configs() {
        let mut other = small_config();
        other.walk_kind = WalkKind::SelfAvoiding;
        assert_ne!(
            compute_config_hash(&small_config()),
            compute_config_hash(&other),
            "Different configs should produce different hashes"
        );
    }

    #[test]
    fn test_manifest_json_round_trip() {
        let config = small_config();
        let report = Aggregator::new(config.clone()).unwrap().run().unwrap();
        let manifest = RunManifest::new(&config, &report);

        let parsed = RunManifest::from_json(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(parsed.config_hash, manifest.config_hash);
        assert_eq!(parsed.config, config);
        assert_eq!(parsed.rows.len(), 3);
        assert!(parsed.matches(&config));

        let mut changed = config;
        changed.grid.width = 81;
        assert!(!parsed.matches(&changed));
    }

    #[test]
    fn test_sweep_key_layout() {
        assert_eq!(
            sweep_key(&small_config()),
            "generator=borland;walk=random;grid=80x40;seeds=1..=5;steps=1..=3;\
             max_restarts=10000;max_step_retries=10000;"
        );
    }

    #[test]
    fn test_every_field_changes_the_hash() {
        let base = small_config();
        let variants = [
            AggregationConfig { generator: GeneratorKind::NumericalRecipes, ..base.clone() },
            AggregationConfig { walk_kind: WalkKind::Nonreversing, ..base.clone() },
            AggregationConfig { grid: GridBounds::new(40, 80).unwrap(), ..base.clone() },
            AggregationConfig { seeds: InclusiveRange::new(1, 6), ..base.clone() },
            AggregationConfig { steps: InclusiveRange::new(2, 3), ..base.clone() },
            AggregationConfig { max_restarts: 7, ..base.clone() },
            AggregationConfig { max_step_retries: 7, ..base.clone() },
        ];

        let mut hashes: Vec<String> = variants.iter().map(compute_config_hash).collect();
        hashes.push(compute_config_hash(&base));
        hashes.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), variants.len() + 1);
    }
}
