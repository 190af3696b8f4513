// Configuration loading and parsing (slate.toml, swap.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("{base_dir} has no defaults/ to create {missing} from; pass --base-dir")]
    NoDefaults { base_dir: PathBuf, missing: String },

    #[error("cannot write {path}: {source}")]
    Seed {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub slate: SlateRules,
    pub swap: SwapSettings,
    pub data_paths: DataPaths,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// slate.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire slate.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SlateFile {
    slate: SlateSection,
    #[serde(default)]
    stacks: StackRules,
    #[serde(default)]
    rules: RulesSection,
}

#[derive(Debug, Clone, Deserialize)]
struct SlateSection {
    name: String,
    #[serde(default = "default_salary_cap")]
    salary_cap: u32,
    #[serde(default)]
    locked_teams: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RulesSection {
    #[serde(default)]
    pitcher_opponent: OpponentPolicy,
    #[serde(default)]
    max_low_order_batters: Option<usize>,
}

fn default_salary_cap() -> u32 {
    DEFAULT_SALARY_CAP
}

pub const DEFAULT_SALARY_CAP: u32 = 35_000;

/// How the validator treats batters whose team is the rostered pitcher's
/// opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentPolicy {
    /// No batter may face the rostered pitcher.
    #[default]
    Exclude,
    /// At least one batter must face the rostered pitcher.
    Require,
    /// Pitcher/opponent pairing is not checked.
    Ignore,
}

/// Thresholds that define primary/secondary stacks and bound their size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StackRules {
    /// Minimum batters from one team for it to count as the primary stack.
    pub min_primary_stack: usize,
    /// Minimum batters from one team for it to count as the secondary stack.
    pub min_secondary_stack: usize,
    pub max_primary_stack_pct: f64,
    pub max_secondary_stack_pct: f64,
    /// Denominator the percentages are expressed against.
    pub stack_pct_basis: u32,
}

impl Default for StackRules {
    fn default() -> Self {
        StackRules {
            min_primary_stack: 4,
            min_secondary_stack: 2,
            max_primary_stack_pct: 0.2083,
            max_secondary_stack_pct: 0.126,
            stack_pct_basis: 24,
        }
    }
}

impl StackRules {
    /// Most batters the primary stack team may contribute to one lineup.
    pub fn max_primary_batters(&self) -> usize {
        pct_to_batters(self.max_primary_stack_pct, self.stack_pct_basis)
    }

    /// Most batters any non-primary team may contribute to one lineup.
    pub fn max_secondary_batters(&self) -> usize {
        pct_to_batters(self.max_secondary_stack_pct, self.stack_pct_basis)
    }
}

fn pct_to_batters(pct: f64, basis: u32) -> usize {
    // Trim float noise before ceil: 0.125 * 24 must stay 3.
    let raw = (pct * f64::from(basis) * 1_000.0).round() / 1_000.0;
    raw.ceil().max(0.0) as usize
}

/// The immutable rule set handed to the validator, the plan builder and the
/// engine. Built once per run from slate.toml, or directly in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SlateRules {
    pub name: String,
    pub salary_cap: u32,
    pub locked_teams: Vec<String>,
    pub stacks: StackRules,
    pub pitcher_opponent: OpponentPolicy,
    /// Cap on batters hitting 8th or 9th. `None` disables the rule.
    pub max_low_order_batters: Option<usize>,
}

impl Default for SlateRules {
    fn default() -> Self {
        SlateRules {
            name: "default".into(),
            salary_cap: DEFAULT_SALARY_CAP,
            locked_teams: Vec::new(),
            stacks: StackRules::default(),
            pitcher_opponent: OpponentPolicy::default(),
            max_low_order_batters: None,
        }
    }
}

impl SlateRules {
    pub fn is_locked(&self, team: &str) -> bool {
        self.locked_teams.iter().any(|t| t == team)
    }
}

// ---------------------------------------------------------------------------
// swap.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct SwapFile {
    #[serde(default)]
    swap: SwapSettings,
    data_paths: DataPaths,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwapSettings {
    /// Try the stack-aware multi-slot plan before greedy replacement.
    pub use_optimized_plan: bool,
}

impl Default for SwapSettings {
    fn default() -> Self {
        SwapSettings {
            use_optimized_plan: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub player_pool: String,
    pub lineups: String,
    pub output: String,
    pub report: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: "logs".into(),
            filter: "lateswap=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/slate.toml` and
/// `config/swap.toml`, both relative to the given `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- slate.toml (required) ---
    let slate_path = config_dir.join("slate.toml");
    let slate_text = read_file(&slate_path)?;
    let slate_file: SlateFile =
        toml::from_str(&slate_text).map_err(|e| ConfigError::ParseError {
            path: slate_path.clone(),
            source: e,
        })?;

    let slate = SlateRules {
        name: slate_file.slate.name,
        salary_cap: slate_file.slate.salary_cap,
        locked_teams: slate_file.slate.locked_teams,
        stacks: slate_file.stacks,
        pitcher_opponent: slate_file.rules.pitcher_opponent,
        max_low_order_batters: slate_file.rules.max_low_order_batters,
    };

    // --- swap.toml (required) ---
    let swap_path = config_dir.join("swap.toml");
    let swap_text = read_file(&swap_path)?;
    let swap_file: SwapFile =
        toml::from_str(&swap_text).map_err(|e| ConfigError::ParseError {
            path: swap_path.clone(),
            source: e,
        })?;

    let config = Config {
        slate,
        swap: swap_file.swap,
        data_paths: swap_file.data_paths,
        logging: swap_file.logging,
    };

    validate(&config)?;

    Ok(config)
}

/// Files `load_config_from` reads from `config/`.
pub const CONFIG_FILES: [&str; 2] = ["slate.toml", "swap.toml"];

/// Seed `config/` with whichever of [`CONFIG_FILES`] it lacks, copied from
/// `defaults/`. Files already in `config/` are left alone. Returns the files
/// written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    let missing: Vec<&str> = CONFIG_FILES
        .iter()
        .copied()
        .filter(|name| !config_dir.join(name).is_file())
        .collect();
    if missing.is_empty() {
        return Ok(Vec::new());
    }
    if !defaults_dir.is_dir() {
        return Err(ConfigError::NoDefaults {
            base_dir: base_dir.to_path_buf(),
            missing: missing.join(", "),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|source| ConfigError::Seed {
        path: config_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(missing.len());
    for name in missing {
        let default = defaults_dir.join(name);
        // Nothing to seed from; load_config_from reports the missing file.
        if !default.is_file() {
            continue;
        }
        let target = config_dir.join(name);
        std::fs::copy(&default, &target).map_err(|source| ConfigError::Seed {
            path: target.clone(),
            source,
        })?;
        written.push(target);
    }
    Ok(written)
}

/// Convenience wrapper: loads config relative to `base_dir`, copying default
/// config files first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    let copied = ensure_config_files(base_dir)?;
    for path in &copied {
        tracing::info!("initialized {} from defaults", path.display());
    }
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let slate = &config.slate;

    if slate.salary_cap == 0 {
        return Err(ConfigError::ValidationError {
            field: "slate.salary_cap".into(),
            message: "must be greater than 0".into(),
        });
    }

    let stacks = &slate.stacks;
    if stacks.min_primary_stack == 0 {
        return Err(ConfigError::ValidationError {
            field: "stacks.min_primary_stack".into(),
            message: "must be greater than 0".into(),
        });
    }
    if stacks.min_secondary_stack == 0 || stacks.min_secondary_stack > stacks.min_primary_stack {
        return Err(ConfigError::ValidationError {
            field: "stacks.min_secondary_stack".into(),
            message: format!(
                "must be between 1 and min_primary_stack ({}), got {}",
                stacks.min_primary_stack, stacks.min_secondary_stack
            ),
        });
    }

    let pct_fields: &[(&str, f64)] = &[
        ("stacks.max_primary_stack_pct", stacks.max_primary_stack_pct),
        ("stacks.max_secondary_stack_pct", stacks.max_secondary_stack_pct),
    ];
    for (name, val) in pct_fields {
        if !(0.0..=1.0).contains(val) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            });
        }
    }

    if stacks.stack_pct_basis == 0 {
        return Err(ConfigError::ValidationError {
            field: "stacks.stack_pct_basis".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
