//! Command-line flags for the hamlet demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Hamlet command-line arguments.
///
/// Values given here override the ones loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "hamlet", about = "Procedural settlement buildings on voxel terrain")]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Roof shape: hip, gable or flat.
    #[arg(long)]
    pub roof: Option<String>,

    /// Wall height in blocks.
    #[arg(long)]
    pub wall_height: Option<i32>,

    /// Chunks generated along x and z.
    #[arg(long)]
    pub chunks: Option<u32>,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(ref roof) = args.roof {
            self.building.roof_kind = roof.clone();
        }
        if let Some(h) = args.wall_height {
            self.building.wall_height = h;
        }
        if let Some(n) = args.chunks {
            self.region.chunks_x = n;
            self.region.chunks_z = n;
        }
        if let Some(n) = args.threads {
            self.region.worker_threads = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            roof: Some("flat".to_string()),
            chunks: Some(2),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.seed, 99);
        assert_eq!(config.building.roof_kind, "flat");
        assert_eq!((config.region.chunks_x, config.region.chunks_z), (2, 2));
        // Non-overridden fields retain defaults
        assert_eq!(config.building.wall_height, 3);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["hamlet", "--roof", "gable", "--threads", "3"]);
        assert_eq!(args.roof.as_deref(), Some("gable"));
        assert_eq!(args.threads, Some(3));
        assert!(args.config.is_none());
    }
}
