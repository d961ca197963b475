//! Configuration for the hamlet generator.
//!
//! Settings persist to disk as a RON file, every section falls back to its
//! defaults when missing, and command-line flags override what was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BuildingConfig, CONFIG_FILE, Config, DebugConfig, RegionConfig, SettlementConfig, TerrainConfig,
};
pub use error::ConfigError;
