// Batch pipeline: pool + lineups in, repaired lineups + report out.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use lateswap_baseball::slate::{export_lineups, load_lineups, load_player_pool};
use lateswap_baseball::{LateSwapEngine, Lineup, RunReport};
use lateswap_core::Config;

use crate::cli::Cli;

/// Resolved file locations for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub pool: PathBuf,
    pub lineups: PathBuf,
    pub output: PathBuf,
    pub report: PathBuf,
}

impl RunPaths {
    /// Configured data paths, relative ones resolved against `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        let resolve = |p: &str| base_dir.join(p);
        RunPaths {
            pool: resolve(&config.data_paths.player_pool),
            lineups: resolve(&config.data_paths.lineups),
            output: resolve(&config.data_paths.output),
            report: resolve(&config.data_paths.report),
        }
    }

    /// Replace any path given on the command line.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(p) = &cli.pool {
            self.pool = p.clone();
        }
        if let Some(p) = &cli.lineups {
            self.lineups = p.clone();
        }
        if let Some(p) = &cli.output {
            self.output = p.clone();
        }
        if let Some(p) = &cli.report {
            self.report = p.clone();
        }
        self
    }
}

/// Run the late swap over every lineup in the template.
///
/// Lineups that could not be fully repaired are exported unchanged.
pub fn run(config: &Config, paths: &RunPaths) -> anyhow::Result<RunReport> {
    let pool = load_player_pool(&paths.pool).context("failed to load player pool")?;
    let loaded = load_lineups(&paths.lineups, &pool, &config.slate.stacks)
        .context("failed to load lineups")?;
    if loaded.lineups.is_empty() {
        warn!("no lineups found in {}", paths.lineups.display());
    }

    let engine = LateSwapEngine::new(config.slate.clone())
        .with_optimized_plan(config.swap.use_optimized_plan);
    let results = engine.repair_all(&loaded.lineups, &pool);

    let exported: Vec<&Lineup> = loaded
        .lineups
        .iter()
        .zip(&results)
        .enumerate()
        .map(|(i, (original, result))| match (&result.lineup, result.success) {
            (Some(repaired), true) => repaired,
            _ => {
                warn!(
                    "lineup {} not repaired ({}), exporting unchanged",
                    i + 1,
                    result.error.as_deref().unwrap_or("unknown error")
                );
                original
            }
        })
        .collect();
    export_lineups(&paths.output, &exported).context("failed to write lineups")?;

    let report = RunReport::from_results(&config.slate.name, &results, loaded.skipped_rows);
    report
        .write_json(&paths.report)
        .context("failed to write report")?;
    for line in report.render_text().lines() {
        info!("{}", line);
    }
    Ok(report)
}
