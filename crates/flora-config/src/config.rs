//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial inputs of the L-system instance node.
    pub lsystem: LSystemConfig,
    /// Initial inputs of the random point node.
    pub random_points: RandomPointsConfig,
    /// Instancing constants used by the geometry translator.
    pub instancing: InstancingConfig,
    /// Filesystem locations.
    pub paths: PathsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// L-system node inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LSystemConfig {
    /// Number of rewriting generations (clamped to at least 1 by the node).
    pub iterations: u32,
    /// Default turn angle in degrees.
    pub angle: f32,
    /// Default step length.
    pub step: f32,
    /// Inline grammar program, or a file name when `from_file` is set.
    pub grammar: String,
    /// Interpret `grammar` as a file name under the plants directory.
    pub from_file: bool,
    /// Seed for weighted production selection.
    pub seed: u64,
}

/// Random point node inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RandomPointsConfig {
    /// Number of points to sample.
    pub number_of_points: u32,
    /// Minimum corner of the sampling box.
    pub minimum_bound: [f32; 3],
    /// Maximum corner of the sampling box.
    pub maximum_bound: [f32; 3],
}

/// Constants for branch and flower instance records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstancingConfig {
    /// Y/Z scale of every branch instance.
    pub branch_width: f32,
    /// Uniform scale of every flower instance.
    pub flower_scale: f32,
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory that grammar files are resolved against.
    pub plants_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LSystemConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            angle: 22.5,
            step: 1.0,
            grammar: String::new(),
            from_file: false,
            seed: 0,
        }
    }
}

impl Default for RandomPointsConfig {
    fn default() -> Self {
        Self {
            number_of_points: 1,
            minimum_bound: [-5.0; 3],
            maximum_bound: [5.0; 3],
        }
    }
}

impl Default for InstancingConfig {
    fn default() -> Self {
        Self {
            branch_width: 0.25,
            flower_scale: 0.25,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plants_dir: PathBuf::from("plants"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default directory holding `config.ron`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flora"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Resolve the plants directory against `base` when it is relative.
    pub fn plants_dir(&self, base: &Path) -> PathBuf {
        if self.paths.plants_dir.is_absolute() {
            self.paths.plants_dir.clone()
        } else {
            base.join(&self.paths.plants_dir)
        }
    }
}
