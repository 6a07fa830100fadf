//! Node construction from a loaded [`Config`].

use std::path::Path;

use flora_config::Config;
use flora_instancing::GeometryTranslator;
use flora_nodes::{LSystemInstanceNode, RandomPointNode};
use glam::Vec3;

/// Build the L-system node; relative plants directories resolve against `base`.
pub fn lsystem_node(config: &Config, base: &Path) -> LSystemInstanceNode {
    let translator = GeometryTranslator {
        branch_width: config.instancing.branch_width,
        flower_scale: config.instancing.flower_scale,
        ..GeometryTranslator::default()
    };

    let mut node =
        LSystemInstanceNode::new(config.plants_dir(base)).with_translator(translator);
    let inputs = &config.lsystem;
    node.set_seed(inputs.seed);
    node.set_iterations(i64::from(inputs.iterations));
    node.set_angle(inputs.angle);
    node.set_step(inputs.step);
    node.set_from_file(inputs.from_file);
    node.set_grammar(inputs.grammar.as_str());
    node
}

pub fn random_node(config: &Config) -> RandomPointNode {
    let inputs = &config.random_points;
    let mut node = RandomPointNode::new();
    node.set_number_of_points(i64::from(inputs.number_of_points));
    node.set_minimum_bound(Vec3::from_array(inputs.minimum_bound));
    node.set_maximum_bound(Vec3::from_array(inputs.maximum_bound));
    node
}
