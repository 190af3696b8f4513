// Batch pipeline over the fixture slate, writing into a scratch directory.

use std::path::{Path, PathBuf};

use clap::Parser;
use lateswap_app::cli::Cli;
use lateswap_app::pipeline::{run, RunPaths};
use lateswap_baseball::RepairMethod;
use lateswap_core::config::{load_config, DataPaths, LoggingConfig, SwapSettings};
use lateswap_core::{Config, SlateRules};

/// Slate fixtures are shared with lateswap-baseball.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../lateswap-baseball/tests/fixtures")
        .join(name)
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lateswap_{}_{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(use_optimized_plan: bool) -> Config {
    Config {
        slate: SlateRules {
            name: "Fixture Slate".into(),
            ..SlateRules::default()
        },
        swap: SwapSettings { use_optimized_plan },
        data_paths: DataPaths {
            player_pool: "player_pool.csv".into(),
            lineups: "lineups.csv".into(),
            output: "out/lineups.csv".into(),
            report: "out/report.json".into(),
        },
        logging: LoggingConfig::default(),
    }
}

fn paths(dir: &Path) -> RunPaths {
    RunPaths {
        pool: fixture("player_pool.csv"),
        lineups: fixture("lineups.csv"),
        output: dir.join("out").join("lineups.csv"),
        report: dir.join("out").join("report.json"),
    }
}

#[test]
fn writes_lineups_and_report() {
    let dir = scratch_dir("pipeline");
    let paths = paths(&dir);
    let report = run(&config(true), &paths).unwrap();

    assert_eq!(report.total_lineups, 4);
    assert_eq!(report.skipped_rows, 1);
    assert_eq!(report.optimized, 2);
    assert_eq!(report.none_needed, 1);
    assert_eq!(report.failed, 1);

    let mut reader = csv::Reader::from_path(&paths.output).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, ["P", "C/1B", "2B", "3B", "SS", "OF", "OF", "OF", "UTIL"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 4);
    // Repaired: McNeil out, Iglesias in.
    assert_eq!(&rows[0][2], "118836-2005:Jose Iglesias");
    // Unrepaired lineups go out as they came in.
    assert_eq!(&rows[3][1], "118836-4005:Connor Wong");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.report).unwrap()).unwrap();
    assert_eq!(json["slate"], "Fixture Slate");
    assert_eq!(json["lineups"].as_array().unwrap().len(), 4);
    assert_eq!(json["lineups"][0]["method"], "optimized");
    assert_eq!(
        json["lineups"][3]["error"],
        "no replacement candidate for C/1B Connor Wong"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn greedy_only_never_plans() {
    let dir = scratch_dir("greedy_only");
    let report = run(&config(false), &paths(&dir)).unwrap();

    assert_eq!(report.optimized, 0);
    assert_eq!(report.none_needed, 1);
    assert!(report
        .lineups
        .iter()
        .all(|l| matches!(l.method, RepairMethod::Greedy | RepairMethod::NoneNeeded)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_pool_is_an_error() {
    let dir = scratch_dir("missing_pool");
    let mut paths = paths(&dir);
    paths.pool = dir.join("nope.csv");

    let err = run(&config(true), &paths).unwrap_err();
    assert!(err.to_string().contains("failed to load player pool"));
    assert!(!paths.output.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn paths_come_from_config_then_flags() {
    let dir = scratch_dir("paths");
    let defaults = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../defaults");
    std::fs::create_dir_all(dir.join("defaults")).unwrap();
    for name in ["slate.toml", "swap.toml"] {
        std::fs::copy(defaults.join(name), dir.join("defaults").join(name)).unwrap();
    }

    let config = load_config(&dir).unwrap();
    assert!(dir.join("config").join("swap.toml").exists());

    let from_config = RunPaths::from_config(&config, &dir);
    assert_eq!(from_config.pool, dir.join("data/MLB_FD.csv"));
    assert_eq!(from_config.report, dir.join("output/late_swap_report.json"));

    let cli = Cli::try_parse_from(["lateswap", "--pool", "/tmp/pool.csv", "-o", "mine.csv"]).unwrap();
    let overridden = from_config.clone().with_overrides(&cli);
    assert_eq!(overridden.pool, PathBuf::from("/tmp/pool.csv"));
    assert_eq!(overridden.output, PathBuf::from("mine.csv"));
    assert_eq!(overridden.lineups, from_config.lineups);
    assert_eq!(overridden.report, from_config.report);

    let _ = std::fs::remove_dir_all(&dir);
}
