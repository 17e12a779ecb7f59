//! CSV and manifest files for aggregate runs
//!
//! Files are named `<generator>_<walk>.csv` and are overwritten on every run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lattice_walk_core_rs::models::AGGREGATE_CSV_HEADER;
use lattice_walk_core_rs::orchestrator::{AggregateReport, RunManifest};

fn export_stem(generator: &str, walk: &str) -> String {
    format!("{}_{}", generator, walk)
}

/// Write one report as CSV and return the file path
pub fn write_aggregate_csv(dir: &Path, report: &AggregateReport) -> Result<PathBuf> {
    let path = dir.join(format!(
        "{}.csv",
        export_stem(report.generator.slug(), report.walk_kind.slug())
    ));
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", AGGREGATE_CSV_HEADER)?;
    for row in &report.rows {
        writeln!(out, "{}", row.to_csv_line())?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub fn write_manifest(dir: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    let path = dir.join(format!(
        "{}.manifest.json",
        export_stem(manifest.generator.slug(), manifest.walk_kind.slug())
    ));
    std::fs::write(&path, manifest.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
