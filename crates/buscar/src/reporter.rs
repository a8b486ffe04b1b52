//! Report rendering: human-readable text and machine-readable JSON.

use crate::report::MatrixReport;
use crate::result::BuscarResult;
use std::fmt::Write as _;
use std::path::Path;

/// Renders a [`MatrixReport`] for humans and tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixReporter;

impl MatrixReporter {
    /// Create a reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render one line per scenario plus a summary footer.
    #[must_use]
    pub fn render_text(&self, report: &MatrixReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "seek verification run {}", report.run_id);
        let _ = writeln!(out);

        for result in &report.results {
            let _ = write!(
                out,
                "  {}  {:<24} {} round(s), {} seek(s) verified in {:.1}s",
                result.verdict,
                result.scenario,
                result.rounds_completed,
                result.seeks_verified,
                result.elapsed.as_secs_f64(),
            );
            match &result.failure {
                Some(failure) => {
                    let _ = writeln!(out);
                    let _ = writeln!(out, "        {failure}");
                }
                None => {
                    let _ = writeln!(out);
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} passed, {} failed, {} total in {:.1}s",
            report.passed_count(),
            report.failed_count(),
            report.results.len(),
            report.elapsed.as_secs_f64(),
        );
        out
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn write_json(&self, report: &MatrixReport, path: &Path) -> BuscarResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "wrote matrix report");
        Ok(())
    }
}
