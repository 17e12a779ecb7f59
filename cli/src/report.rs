//! Plain-text console reports

use std::fmt::Write;

use lattice_walk_core_rs::orchestrator::SimulationOutcome;
use lattice_walk_core_rs::validation::{
    DiceBatchReport, RangeSummary, ValidationReport, CRITICAL_VALUE_11, CRITICAL_VALUE_9,
};

fn format_frequencies(values: &[f64]) -> String {
    let cells: Vec<String> = values.iter().map(|v| format!("'{:.4}'", v)).collect();
    format!("[{}]", cells.join(", "))
}

pub fn walk_summary(outcome: &SimulationOutcome, with_trajectory: bool) -> String {
    let summary = &outcome.summary;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({}, seed {})", summary.walk_kind.label(), summary.rng_kind.display_name(), summary.seed);
    let _ = writeln!(out, "steps requested : {}", summary.step_count);
    let _ = writeln!(out, "steps taken     : {}", outcome.result.steps_taken());
    if let Some(end) = outcome.result.final_position() {
        let _ = writeln!(out, "final position  : ({}, {})", end.x, end.y);
    }
    let _ = writeln!(out, "squared distance: {}", summary.squared_displacement);
    let _ = writeln!(out, "success         : {}", summary.success);
    if summary.restarts > 0 {
        let _ = writeln!(out, "restarts        : {}", summary.restarts);
    }

    if with_trajectory {
        for (i, p) in outcome.result.trajectory.iter().enumerate() {
            let _ = writeln!(out, "{:>5} ({}, {})", i, p.x, p.y);
        }
    }
    out
}

/// Dice test report in the classic console layout
pub fn dice_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-----------------------------DICE TEST-----------------------------");
    let _ = writeln!(out, "generator and seed : {} ; {}", report.generator.display_name(), report.seed);

    if report.pass_11 {
        let _ = writeln!(out, "khi 2 OK");
    } else {
        let _ = writeln!(out, "!!!!!!!!!!!!!!!!!! KHI 2 NOT PASSED !!!!!!!!!!!!!!!!!!");
        let _ = writeln!(out, "expected probabilities : {}", format_frequencies(&report.theoretical_frequencies));
        let _ = writeln!(out, "empirical statistics :   {}", format_frequencies(&report.empirical_frequencies));
        let _ = writeln!(
            out,
            "khi 2 statistic : {} ##### khi 2 law of degree 10 with 5% risk = {}",
            report.chi_squared_11, CRITICAL_VALUE_11
        );
        let _ = writeln!(
            out,
            "khi 2 statistic (gathered extremities) : {} ##### khi 2 law of degree 8 with 5% risk = {}",
            report.chi_squared_9, CRITICAL_VALUE_9
        );
    }
    out
}

pub fn dice_batch_footer(batch: &DiceBatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-------------------------------------------------------------------");
    let _ = writeln!(
        out,
        "{} seeds, {} throws each : 11 categories passed {} ({:.1}%) ; 9 categories passed {} ({:.1}%)",
        batch.reports.len(),
        batch.iterations,
        batch.passed_11,
        batch.pass_rate_11() * 100.0,
        batch.passed_9,
        batch.pass_rate_9() * 100.0,
    );
    out
}

pub fn range_report(summary: &RangeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-----------------------------SIMPLE TEST-----------------------------");
    let _ = writeln!(
        out,
        "RNG parameters : min (inclusive) = {} ; max (exclusive) = {} ; iteration number = {}",
        summary.a, summary.b, summary.iterations
    );
    let _ = writeln!(
        out,
        "results : minValue = {} ; maxValue = {} ; average = {}",
        summary.min, summary.max, summary.mean
    );
    out
}
