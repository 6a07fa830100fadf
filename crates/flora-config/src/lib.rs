//! Configuration system for flora.
//!
//! Node defaults, instancing constants, and the plants directory persist to
//! disk as a RON file. CLI flags (clap) override any loaded value.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, NodeKind};
pub use config::{
    Config, DebugConfig, InstancingConfig, LSystemConfig, PathsConfig, RandomPointsConfig,
    default_config_dir,
};
pub use error::ConfigError;
