//! PyO3 functions for the walk simulator
//!
//! A Python front end (canvas + control panel) calls these and draws the
//! returned trajectories itself.
//!
//! # Example (from Python)
//!
//! ```python
//! from lattice_walk_core_rs import run_walk
//!
//! walk = run_walk({
//!     "generator": "BORLAND",
//!     "seed": 1337,
//!     "walk_kind": "SELF_AVOIDING",
//!     "steps": 30,
//! })
//! for (x0, y0), (x1, y1) in zip(walk["trajectory"], walk["trajectory"][1:]):
//!     canvas.create_line(x0 * 10 + 5, y0 * 10 + 5, x1 * 10 + 5, y1 * 10 + 5)
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    aggregate_row_to_py, parse_aggregation_config, parse_simulation_config, simulation_outcome_to_py,
    validation_report_to_py,
};
use crate::orchestrator::{run_simulation, Aggregator, SimulationError};
use crate::rng::GeneratorKind;
use crate::validation::run_dice_test;

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfig(e) => PyValueError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Run one walk and return its summary and trajectory
///
/// # Errors
///
/// Raises ValueError for unknown kinds, missing fields or invalid values.
#[pyfunction]
pub fn run_walk(py: Python, config: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
    let config = parse_simulation_config(config)?;
    let outcome = run_simulation(&config).map_err(to_py_err)?;
    simulation_outcome_to_py(py, &outcome)
}

/// Run a seed × step-count sweep and return one dict per step count
#[pyfunction]
pub fn aggregate(py: Python, config: &Bound<'_, PyDict>) -> PyResult<Py<PyList>> {
    let config = parse_aggregation_config(config)?;
    let report = Aggregator::new(config)
        .and_then(|aggregator| aggregator.run())
        .map_err(to_py_err)?;

    let rows = report
        .rows
        .iter()
        .map(|row| aggregate_row_to_py(py, row))
        .collect::<PyResult<Vec<_>>>()?;
    Ok(PyList::new(py, rows)?.into())
}

/// Two-dice chi-squared test for one generator and seed
#[pyfunction]
pub fn dice_test(py: Python, generator: &str, seed: u64, iterations: u64) -> PyResult<Py<PyDict>> {
    let generator: GeneratorKind = generator
        .parse()
        .map_err(|e: crate::models::ConfigError| PyValueError::new_err(e.to_string()))?;
    let report = run_dice_test(generator, seed, iterations)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    validation_report_to_py(py, &report)
}
