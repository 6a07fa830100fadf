//! `flora`: evaluate an instancing node and print its output arrays as JSON.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! `cargo run -p flora-cli -- --grammar fractal_plant.txt --from-file true --iterations 4`
//! writes the branch and flower arrays of a plant from `plants/`.

mod setup;

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use clap::Parser;
use flora_config::{CliArgs, Config, NodeKind, default_config_dir};
use flora_instancing::InstanceArrays;
use flora_nodes::InstancerNode;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let Some(config_dir) = args.config.clone().or_else(default_config_dir) else {
        bail!("no config directory on this platform, pass --config");
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    flora_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let mut node: Box<dyn InstancerNode> = match args.node {
        NodeKind::Lsystem => Box::new(setup::lsystem_node(&config, &cwd)),
        NodeKind::Random => Box::new(setup::random_node(&config)),
    };
    info!(node = node.type_name(), "evaluating");

    let mut outputs: BTreeMap<&str, InstanceArrays> = BTreeMap::new();
    for &name in node.output_names() {
        let arrays = node.output(name)?.clone();
        info!(output = name, instances = arrays.len(), "pulled output");
        outputs.insert(name, arrays);
    }

    let json = serde_json::to_string_pretty(&outputs).context("failed to encode outputs")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote instancing arrays");
        }
        None => println!("{json}"),
    }

    Ok(())
}
