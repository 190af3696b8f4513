// Shared configuration and rule types for the late-swap workspace.

pub mod config;

pub use config::{Config, ConfigError, OpponentPolicy, SlateRules, StackRules};
