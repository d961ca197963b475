//! Configuration structs with defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside its directory.
pub const CONFIG_FILE: &str = "hamlet.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub terrain: TerrainConfig,
    pub region: RegionConfig,
    /// Block role -> block name overrides (e.g. `"wall": "planks"`).
    pub theme: HashMap<String, String>,
    pub debug: DebugConfig,
}

/// Shape of the generated houses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    /// Cells between the parcel border and the walls.
    pub inset_margin: i32,
    /// Wall blocks above the floor.
    pub wall_height: i32,
    /// "hip", "gable" or "flat".
    pub roof_kind: String,
    /// Rise per cell towards the ridge.
    pub roof_pitch: i32,
    /// Cells the roof reaches past the walls.
    pub roof_overhang: i32,
    /// Apex height above the eaves.
    pub apex_rise: i32,
    /// Rim height around flat roofs.
    pub flat_border_height: i32,
    /// Put a decorative column on every house corner.
    pub corner_columns: bool,
}

/// Reference terrain the buildings are placed on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u32,
    pub octaves: u32,
    /// Frequency of the first noise octave.
    pub base_frequency: f64,
    /// Amplitude of the first noise octave, in blocks.
    pub amplitude: f64,
    /// Elevation the noise varies around.
    pub base_height: f64,
    /// Mirror the terrain along the x = z diagonal.
    pub mirror_diagonal: bool,
}

/// A settlement the demo fills with parcels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementConfig {
    pub name: String,
    pub x: i32,
    pub z: i32,
    pub radius: i32,
}

/// Which part of the world is generated and how it is split up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionConfig {
    /// Chunks generated along x.
    pub chunks_x: u32,
    /// Chunk layers generated along y, starting at y = 0.
    pub chunks_y: u32,
    /// Chunks generated along z.
    pub chunks_z: u32,
    /// Horizontal margin each region reads beyond its own chunk.
    pub border_sides: i32,
    pub border_top: i32,
    pub border_bottom: i32,
    /// Edge length of a parcel in blocks.
    pub parcel_size: i32,
    /// Gap between neighbouring parcels.
    pub street_width: i32,
    pub settlements: Vec<SettlementConfig>,
    /// Worker threads for region generation (0 = one per CPU).
    pub worker_threads: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,hamlet_bldg=trace").
    pub log_level: String,
    /// Write a JSON log file next to the config.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            inset_margin: 2,
            wall_height: 3,
            roof_kind: "hip".to_string(),
            roof_pitch: 1,
            roof_overhang: 1,
            apex_rise: 1,
            flat_border_height: 0,
            corner_columns: false,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            base_frequency: 0.01,
            amplitude: 6.0,
            base_height: 16.0,
            mirror_diagonal: false,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            chunks_x: 4,
            chunks_y: 1,
            chunks_z: 4,
            border_sides: 16,
            border_top: 0,
            border_bottom: 0,
            parcel_size: 14,
            street_width: 3,
            settlements: vec![SettlementConfig {
                name: "Ashford".to_string(),
                x: 64,
                z: 64,
                radius: 56,
            }],
            worker_threads: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: cfg!(debug_assertions),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Per-user config directory, e.g. `~/.config/hamlet` on Linux.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("hamlet"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let write_error = |source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let region = &self.region;
        if region.chunks_x == 0 || region.chunks_y == 0 || region.chunks_z == 0 {
            return Err(invalid("region.chunks_*", "must be at least 1"));
        }
        if region.parcel_size <= 0 {
            return Err(invalid("region.parcel_size", "must be positive"));
        }
        if region.street_width < 0 {
            return Err(invalid("region.street_width", "must not be negative"));
        }

        let building = &self.building;
        let non_negative = [
            ("building.inset_margin", building.inset_margin),
            ("building.wall_height", building.wall_height),
            ("building.roof_pitch", building.roof_pitch),
            ("building.roof_overhang", building.roof_overhang),
            ("building.apex_rise", building.apex_rise),
        ];
        if let Some((field, _)) = non_negative.into_iter().find(|&(_, v)| v < 0) {
            return Err(invalid(field, "must not be negative"));
        }

        if !self.terrain.base_height.is_finite() || !self.terrain.amplitude.is_finite() {
            return Err(invalid("terrain", "heights must be finite"));
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("wall_height: 3"));
        assert!(ron_str.contains("roof_kind: \"hip\""));
        assert!(ron_str.contains("parcel_size: 14"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.theme.insert("wall".to_string(), "planks".to_string());
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(building: (wall_height: 5))").unwrap();
        assert_eq!(config.building.wall_height, 5);
        assert_eq!(config.building.inset_margin, 2);
        assert_eq!(config.region, RegionConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.building.roof_kind = "gable".to_string();
        config.terrain.seed = 1234;
        config.region.worker_threads = 2;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.building.wall_height = 4;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.building.wall_height), Some(4));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.region.parcel_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "region.parcel_size",
                ..
            })
        ));

        let mut config = Config::default();
        config.building.roof_pitch = -1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "building.roof_pitch",
                ..
            })
        ));
    }
}
