//! Command-line argument parsing for flora.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::Config;

/// Which node the command-line driver evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NodeKind {
    /// L-system branch/flower instancing node.
    #[default]
    Lsystem,
    /// Uniform random point node.
    Random,
}

/// flora command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "flora", about = "L-system plant instancing")]
pub struct CliArgs {
    /// Node to evaluate.
    #[arg(long, value_enum, default_value_t = NodeKind::Lsystem)]
    pub node: NodeKind,

    /// Number of rewriting iterations.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Default turn angle in degrees.
    #[arg(long)]
    pub angle: Option<f32>,

    /// Default step length.
    #[arg(long)]
    pub step: Option<f32>,

    /// Inline grammar program, or a file name with `--from-file true`.
    #[arg(long)]
    pub grammar: Option<String>,

    /// Resolve `--grammar` as a file under the plants directory.
    #[arg(long)]
    pub from_file: Option<bool>,

    /// Seed for weighted production selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of random points.
    #[arg(long)]
    pub points: Option<u32>,

    /// Directory containing grammar files.
    #[arg(long)]
    pub plants_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the instancing arrays to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(iterations) = args.iterations {
            self.lsystem.iterations = iterations;
        }
        if let Some(angle) = args.angle {
            self.lsystem.angle = angle;
        }
        if let Some(step) = args.step {
            self.lsystem.step = step;
        }
        if let Some(ref grammar) = args.grammar {
            self.lsystem.grammar = grammar.clone();
        }
        if let Some(from_file) = args.from_file {
            self.lsystem.from_file = from_file;
        }
        if let Some(seed) = args.seed {
            self.lsystem.seed = seed;
        }
        if let Some(points) = args.points {
            self.random_points.number_of_points = points;
        }
        if let Some(ref dir) = args.plants_dir {
            self.paths.plants_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
