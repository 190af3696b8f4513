// Late swap entry point.
//
// Startup sequence:
// 1. Parse command-line flags
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file)
// 4. Resolve data paths, apply overrides
// 5. Run the batch pipeline and print the summary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lateswap_app::cli::Cli;
use lateswap_app::pipeline::{self, RunPaths};
use lateswap_core::config::{self, LoggingConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Parse command-line flags
    let cli = Cli::parse();
    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    // 2. Load config
    let mut config = config::load_config(&base_dir).context("failed to load configuration")?;
    if cli.greedy_only {
        config.swap.use_optimized_plan = false;
    }

    // 3. Initialize tracing
    init_tracing(&base_dir, &config.logging)?;
    info!(
        "Config loaded: slate={}, ${} salary cap, {} locked teams",
        config.slate.name,
        config.slate.salary_cap,
        config.slate.locked_teams.len()
    );

    // 4. Resolve data paths
    let paths = RunPaths::from_config(&config, &base_dir).with_overrides(&cli);
    info!("Player pool: {}", paths.pool.display());
    info!("Lineups: {}", paths.lineups.display());

    // 5. Run
    let report = pipeline::run(&config, &paths)?;
    print!("{}", report.render_text());
    println!("Lineups written to {}", paths.output.display());
    println!("Report written to {}", paths.report.display());

    info!("Late swap finished");
    Ok(())
}

/// Initialize tracing to log to `<logging.dir>/lateswap.log`.
fn init_tracing(base_dir: &std::path::Path, logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir: PathBuf = base_dir.join(&logging.dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("lateswap.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
