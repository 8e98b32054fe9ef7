//! Reporting helpers: CSV result rows and duration formatting.

use std::io::Write;
use std::time::Duration;

use crate::problem::Problem;
use crate::solution::Solution;

/// Column names written by [`write_csv_header`].
pub const CSV_HEADER: &str = "instance,m,k,run,cost,sse,cpu_s";

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Facility count used when the caller gives none: a tenth of the points,
/// at least two, never more than the point count.
pub fn default_facility_count(n: usize) -> usize {
    (n / 10).max(2).min(n)
}

/// Write the CSV header line.
pub fn write_csv_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)
}

/// Write one CSV row per solution of a trace, numbering runs from 1.
pub fn write_trace<W: Write>(
    out: &mut W,
    problem: &Problem,
    trace: &[Solution],
    elapsed: Duration,
) -> std::io::Result<()> {
    for (i, solution) in trace.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{:.4},{:.4},{:.6}",
            problem.name,
            problem.size(),
            solution.len(),
            i + 1,
            solution.evaluate(problem),
            solution.sse(problem),
            elapsed.as_secs_f64()
        )?;
    }

    Ok(())
}
