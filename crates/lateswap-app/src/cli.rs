// Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lateswap")]
#[command(about = "Repair FanDuel MLB lineups after late scratches")]
#[command(version)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (default: current directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Player pool CSV, overrides data_paths.player_pool
    #[arg(long)]
    pub pool: Option<PathBuf>,

    /// Lineup template CSV, overrides data_paths.lineups
    #[arg(long)]
    pub lineups: Option<PathBuf>,

    /// Output lineup CSV, overrides data_paths.output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON report path, overrides data_paths.report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip the stack-aware plan and replace slot by slot
    #[arg(long)]
    pub greedy_only: bool,
}
