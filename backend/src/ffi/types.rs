//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{AggregateRow, GridBounds, InclusiveRange, WalkConfig, WalkKind};
use crate::orchestrator::{AggregationConfig, SimulationConfig, SimulationOutcome};
use crate::rng::GeneratorKind;
use crate::validation::ValidationReport;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or type conversion fails
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Parse a kind selector string (`"BORLAND"`, `"self-avoiding"`, ...)
fn parse_selector<K>(value: &str) -> PyResult<K>
where
    K: std::str::FromStr<Err = crate::models::ConfigError>,
{
    value.parse().map_err(|e: crate::models::ConfigError| PyValueError::new_err(e.to_string()))
}

/// Grid from `grid_width` / `grid_height` (defaults 80 × 40)
fn parse_grid(dict: &Bound<'_, PyDict>) -> PyResult<GridBounds> {
    let defaults = GridBounds::default();
    let width: usize = extract_with_default(dict, "grid_width", defaults.width)?;
    let height: usize = extract_with_default(dict, "grid_height", defaults.height)?;
    GridBounds::new(width, height).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to SimulationConfig
///
/// Required: `generator`, `seed`, `walk_kind`, `steps`.
/// Optional: `grid_width`, `grid_height`, `max_restarts`, `max_step_retries`.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let generator: GeneratorKind = parse_selector(&extract_required::<String>(py_config, "generator")?)?;
    let walk_kind: WalkKind = parse_selector(&extract_required::<String>(py_config, "walk_kind")?)?;
    let seed: u64 = extract_required(py_config, "seed")?;
    let steps: usize = extract_required(py_config, "steps")?;

    let defaults = WalkConfig::default();
    let walk = WalkConfig::new(walk_kind, parse_grid(py_config)?, steps)
        .with_max_restarts(extract_with_default(py_config, "max_restarts", defaults.max_restarts)?)
        .with_max_step_retries(extract_with_default(
            py_config,
            "max_step_retries",
            defaults.max_step_retries,
        )?);

    Ok(SimulationConfig { generator, seed, walk })
}

/// Convert Python dict to AggregationConfig
///
/// Required: `generator`, `walk_kind`.
/// Optional: `first_seed`, `last_seed`, `first_step`, `last_step`, grid and budgets.
pub fn parse_aggregation_config(py_config: &Bound<'_, PyDict>) -> PyResult<AggregationConfig> {
    let defaults = AggregationConfig::default();

    let generator: GeneratorKind = parse_selector(&extract_required::<String>(py_config, "generator")?)?;
    let walk_kind: WalkKind = parse_selector(&extract_required::<String>(py_config, "walk_kind")?)?;

    let seeds = InclusiveRange::new(
        extract_with_default(py_config, "first_seed", defaults.seeds.first)?,
        extract_with_default(py_config, "last_seed", defaults.seeds.last)?,
    );
    let steps = InclusiveRange::new(
        extract_with_default(py_config, "first_step", defaults.steps.first)?,
        extract_with_default(py_config, "last_step", defaults.steps.last)?,
    );

    Ok(AggregationConfig {
        generator,
        walk_kind,
        grid: parse_grid(py_config)?,
        seeds,
        steps,
        max_restarts: extract_with_default(py_config, "max_restarts", defaults.max_restarts)?,
        max_step_retries: extract_with_default(py_config, "max_step_retries", defaults.max_step_retries)?,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a single walk to a Python dict
///
/// `trajectory` is a list of `(x, y)` tuples ready for drawing.
pub fn simulation_outcome_to_py(py: Python, outcome: &SimulationOutcome) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    let summary = &outcome.summary;

    dict.set_item("rng_kind", summary.rng_kind.display_name())?;
    dict.set_item("walk_kind", summary.walk_kind.label())?;
    dict.set_item("seed", summary.seed)?;
    dict.set_item("step_count", summary.step_count)?;
    dict.set_item("squared_displacement", summary.squared_displacement)?;
    dict.set_item("success", summary.success)?;
    dict.set_item("restarts", summary.restarts)?;

    let points: Vec<(i64, i64)> = outcome.result.trajectory.iter().map(|p| (p.x, p.y)).collect();
    dict.set_item("trajectory", PyList::new(py, points)?)?;

    Ok(dict.into())
}

/// Convert an aggregate row to a Python dict
pub fn aggregate_row_to_py(py: Python, row: &AggregateRow) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("walk_kind", row.walk_kind.label())?;
    dict.set_item("step_count", row.step_count)?;
    dict.set_item("mean_squared_displacement", row.mean_squared_displacement)?;
    dict.set_item("successful_walks", row.successful_walks)?;
    dict.set_item("failed_walks", row.failed_walks)?;
    Ok(dict.into())
}

/// Convert a dice validation report to a Python dict
pub fn validation_report_to_py(py: Python, report: &ValidationReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("generator", report.generator.display_name())?;
    dict.set_item("seed", report.seed)?;
    dict.set_item("iterations", report.iterations)?;
    dict.set_item("counts", report.counts.to_vec())?;
    dict.set_item("theoretical_frequencies", report.theoretical_frequencies.to_vec())?;
    dict.set_item("empirical_frequencies", report.empirical_frequencies.to_vec())?;
    dict.set_item("chi_squared_11", report.chi_squared_11)?;
    dict.set_item("chi_squared_9", report.chi_squared_9)?;
    dict.set_item("p_value_11", report.p_value_11)?;
    dict.set_item("p_value_9", report.p_value_9)?;
    dict.set_item("pass_11", report.pass_11)?;
    dict.set_item("pass_9", report.pass_9)?;
    Ok(dict.into())
}
