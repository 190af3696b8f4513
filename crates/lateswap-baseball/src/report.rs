// Run summary over a batch of late-swap results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::slate::SlateIoError;
use crate::swap::{LateSwapResult, RepairMethod};

/// Per-lineup line in the report.
#[derive(Debug, Clone, Serialize)]
pub struct LineupOutcome {
    /// 1-based, in template order.
    pub index: usize,
    pub success: bool,
    pub method: RepairMethod,
    pub swaps: Vec<String>,
    pub projection_delta: f64,
    pub salary_delta: i64,
    pub preserves_stacks: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub slate: String,
    pub total_lineups: usize,
    pub skipped_rows: usize,
    pub none_needed: usize,
    pub optimized: usize,
    pub greedy: usize,
    pub failed: usize,
    pub total_swaps: usize,
    pub total_projection_delta: f64,
    /// Mean projection change over lineups that needed swaps.
    pub average_projection_delta: f64,
    pub stacks_preserved: usize,
    /// Failure message to count.
    pub failure_reasons: BTreeMap<String, usize>,
    pub lineups: Vec<LineupOutcome>,
}

impl RunReport {
    pub fn from_results(slate: &str, results: &[LateSwapResult], skipped_rows: usize) -> Self {
        let mut report = RunReport {
            generated_at: Utc::now(),
            slate: slate.to_string(),
            total_lineups: results.len(),
            skipped_rows,
            none_needed: 0,
            optimized: 0,
            greedy: 0,
            failed: 0,
            total_swaps: 0,
            total_projection_delta: 0.0,
            average_projection_delta: 0.0,
            stacks_preserved: 0,
            failure_reasons: BTreeMap::new(),
            lineups: Vec::with_capacity(results.len()),
        };

        let mut swapped = 0usize;
        for (i, result) in results.iter().enumerate() {
            match (result.success, result.method) {
                (true, RepairMethod::NoneNeeded) => report.none_needed += 1,
                (true, RepairMethod::Optimized) => report.optimized += 1,
                (true, RepairMethod::Greedy) => report.greedy += 1,
                _ => {
                    report.failed += 1;
                    let reason = result
                        .error
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string());
                    *report.failure_reasons.entry(reason).or_insert(0) += 1;
                }
            }
            if !result.swaps.is_empty() {
                swapped += 1;
                report.total_swaps += result.swaps.len();
                report.total_projection_delta += result.total_projection_delta;
                if result.preserves_stacks {
                    report.stacks_preserved += 1;
                }
            }
            report.lineups.push(LineupOutcome {
                index: i + 1,
                success: result.success,
                method: result.method,
                swaps: result.swaps.iter().map(ToString::to_string).collect(),
                projection_delta: result.total_projection_delta,
                salary_delta: result.total_salary_delta,
                preserves_stacks: result.preserves_stacks,
                error: result.error.clone(),
            });
        }
        if swapped > 0 {
            report.average_projection_delta = report.total_projection_delta / swapped as f64;
        }
        report
    }

    pub fn successes(&self) -> usize {
        self.none_needed + self.optimized + self.greedy
    }

    /// Plain-text summary for logs and the terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Late swap report: {}", self.slate);
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(
            out,
            "Lineups: {} ({} skipped rows)",
            self.total_lineups, self.skipped_rows
        );
        let _ = writeln!(
            out,
            "  no swap needed: {}, optimized: {}, greedy: {}, failed: {}",
            self.none_needed, self.optimized, self.greedy, self.failed
        );
        let _ = writeln!(
            out,
            "Swaps: {} (projection {:+.2}, avg {:+.2} per swapped lineup, {} kept stacks)",
            self.total_swaps,
            self.total_projection_delta,
            self.average_projection_delta,
            self.stacks_preserved
        );
        if !self.failure_reasons.is_empty() {
            let _ = writeln!(out, "Failures:");
            for (reason, count) in &self.failure_reasons {
                let _ = writeln!(out, "  {}x {}", count, reason);
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report, creating parent directories as needed.
    pub fn write_json(&self, path: &Path) -> Result<(), SlateIoError> {
        let io_err = |e: std::io::Error| SlateIoError::Io {
            path: path.display().to_string(),
            source: e,
        };
        let json = self
            .to_json()
            .map_err(|e| SlateIoError::Validation(format!("report serialization failed: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json).map_err(io_err)
    }
}
