//! Node that turns an L-system grammar into branch and flower instances.

use std::path::{Path, PathBuf};

use flora_instancing::{GeometryTranslator, InstanceArrays};
use flora_lsystem::{DEFAULT_ANGLE, DEFAULT_STEP, LSystem, LSystemError};

use crate::InstancerNode;
use crate::attribute::AttributeValue;
use crate::error::NodeError;
use crate::slot::OutputSlot;

/// Inputs of [`LSystemInstanceNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LSystemAttribute {
    Iterations,
    Step,
    Angle,
    Grammar,
    FromFile,
}

impl LSystemAttribute {
    pub const ALL: [Self; 5] = [
        Self::Iterations,
        Self::Step,
        Self::Angle,
        Self::Grammar,
        Self::FromFile,
    ];

    pub fn long_name(self) -> &'static str {
        match self {
            Self::Iterations => "iterations",
            Self::Step => "step",
            Self::Angle => "angle",
            Self::Grammar => "grammar",
            Self::FromFile => "fromFile",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Iterations => "it",
            Self::Step => "st",
            Self::Angle => "an",
            Self::Grammar => "gr",
            Self::FromFile => "fi",
        }
    }

    /// Look up by long or short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.long_name() == name || a.short_name() == name)
    }
}

/// Outputs of [`LSystemInstanceNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LSystemOutput {
    Branches,
    Flowers,
}

impl LSystemOutput {
    pub const ALL: [Self; 2] = [Self::Branches, Self::Flowers];

    pub fn long_name(self) -> &'static str {
        match self {
            Self::Branches => "outBranches",
            Self::Flowers => "outFlowers",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Branches => "ob",
            Self::Flowers => "of",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.long_name() == name || o.short_name() == name)
    }
}

/// Evaluates an L-system and exposes branches and flowers as instancing arrays.
///
/// Grammar and from-file edits reload the engine immediately. Iteration, step,
/// and angle edits only invalidate the outputs; they reach the engine on the
/// next recompute.
#[derive(Debug)]
pub struct LSystemInstanceNode {
    engine: LSystem,
    translator: GeometryTranslator,
    plants_dir: PathBuf,
    iterations: u32,
    angle: f32,
    step: f32,
    grammar: String,
    from_file: bool,
    branches: OutputSlot,
    flowers: OutputSlot,
}

impl LSystemInstanceNode {
    pub const TYPE_NAME: &'static str = "LSystemInstanceNode";
    const OUTPUT_NAMES: [&'static str; 2] = ["outBranches", "outFlowers"];

    /// A node with default inputs whose grammar files resolve under `plants_dir`.
    pub fn new(plants_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine: LSystem::new(),
            translator: GeometryTranslator::default(),
            plants_dir: plants_dir.into(),
            iterations: 1,
            angle: DEFAULT_ANGLE,
            step: DEFAULT_STEP,
            grammar: String::new(),
            from_file: false,
            branches: OutputSlot::default(),
            flowers: OutputSlot::default(),
        }
    }

    pub fn with_translator(mut self, translator: GeometryTranslator) -> Self {
        self.translator = translator;
        self.mark_dirty();
        self
    }

    pub fn plants_dir(&self) -> &Path {
        &self.plants_dir
    }

    pub fn engine(&self) -> &LSystem {
        &self.engine
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    pub fn from_file(&self) -> bool {
        self.from_file
    }

    /// Values below 1 are clamped to 1.
    pub fn set_iterations(&mut self, iterations: i64) {
        self.iterations = iterations.clamp(1, i64::from(u32::MAX)) as u32;
        self.mark_dirty();
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
        self.mark_dirty();
    }

    pub fn set_step(&mut self, distance: f32) {
        self.step = distance;
        self.mark_dirty();
    }

    /// Seed for weighted productions.
    pub fn set_seed(&mut self, seed: u64) {
        self.engine.set_seed(seed);
        self.mark_dirty();
    }

    /// Set the grammar text (or file name) and reload the engine.
    pub fn set_grammar(&mut self, grammar: impl Into<String>) {
        self.grammar = grammar.into();
        self.reload_logged();
    }

    /// Switch between inline and file grammar and reload the engine.
    pub fn set_from_file(&mut self, from_file: bool) {
        self.from_file = from_file;
        self.reload_logged();
    }

    /// Path the grammar is read from when `fromFile` is set.
    pub fn grammar_path(&self) -> PathBuf {
        self.plants_dir.join(&self.grammar)
    }

    /// Reload the grammar from the current inputs.
    ///
    /// On error the engine keeps its previous grammar.
    pub fn reload_grammar(&mut self) -> Result<(), LSystemError> {
        if self.from_file {
            if self.grammar.is_empty() {
                tracing::debug!("fromFile set without a file name, keeping current grammar");
                return Ok(());
            }
            let path = self.grammar_path();
            self.engine.load_program(&path)?;
            tracing::info!(path = %path.display(), "loaded grammar file");
        } else {
            self.engine.load_program_from_str(&self.grammar)?;
            tracing::info!(rules = self.engine.grammar().rule_count(), "loaded inline grammar");
        }
        Ok(())
    }

    fn reload_logged(&mut self) {
        if let Err(err) = self.reload_grammar() {
            tracing::error!(error = %err, "grammar reload failed, keeping previous grammar");
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.branches.mark_dirty();
        self.flowers.mark_dirty();
    }

    pub fn is_dirty(&self, output: LSystemOutput) -> bool {
        self.slot(output).is_dirty()
    }

    fn slot(&self, output: LSystemOutput) -> &OutputSlot {
        match output {
            LSystemOutput::Branches => &self.branches,
            LSystemOutput::Flowers => &self.flowers,
        }
    }

    /// Run expansion, interpretation, and translation, writing both outputs.
    ///
    /// On error neither output is modified.
    pub fn compute(&mut self) -> Result<(), NodeError> {
        self.engine.set_default_angle(self.angle);
        self.engine.set_default_step(self.step);

        let geometry = self
            .engine
            .expand_and_interpret(self.iterations)
            .map_err(LSystemError::from)?;

        let branches = self.translator.translate_branches(&geometry.branches);
        let flowers = self.translator.translate_flowers(&geometry.flowers);

        self.branches.write(InstanceArrays::from_records(&branches));
        self.flowers.write(InstanceArrays::from_records(&flowers));

        tracing::info!(
            iterations = self.iterations,
            branches = branches.len(),
            flowers = flowers.len(),
            "finished LSystemInstanceNode generation"
        );
        Ok(())
    }

    /// Pull one output, recomputing first if it is dirty.
    ///
    /// A failed recompute is logged; the stale output is returned and stays
    /// clean until the next input edit.
    pub fn pull(&mut self, output: LSystemOutput) -> &InstanceArrays {
        if self.slot(output).is_dirty()
            && let Err(err) = self.compute()
        {
            tracing::error!(error = %err, "recompute failed, outputs left unchanged");
            self.branches.mark_clean();
            self.flowers.mark_clean();
        }
        self.slot(output).value()
    }

    pub fn branches(&mut self) -> &InstanceArrays {
        self.pull(LSystemOutput::Branches)
    }

    pub fn flowers(&mut self) -> &InstanceArrays {
        self.pull(LSystemOutput::Flowers)
    }
}

impl InstancerNode for LSystemInstanceNode {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), NodeError> {
        let attribute =
            LSystemAttribute::from_name(name).ok_or_else(|| NodeError::UnknownAttribute {
                node: Self::TYPE_NAME,
                name: name.to_string(),
            })?;

        match attribute {
            LSystemAttribute::Iterations => self.set_iterations(value.as_int(name)?),
            LSystemAttribute::Step => self.set_step(value.as_float(name)? as f32),
            LSystemAttribute::Angle => self.set_angle(value.as_float(name)? as f32),
            LSystemAttribute::Grammar => self.set_grammar(value.into_string(name)?),
            LSystemAttribute::FromFile => self.set_from_file(value.as_bool(name)?),
        }
        Ok(())
    }

    fn output(&mut self, name: &str) -> Result<&InstanceArrays, NodeError> {
        let output = LSystemOutput::from_name(name).ok_or_else(|| NodeError::UnknownAttribute {
            node: Self::TYPE_NAME,
            name: name.to_string(),
        })?;
        Ok(self.pull(output))
    }

    fn output_names(&self) -> &'static [&'static str] {
        &Self::OUTPUT_NAMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(grammar: &str) -> LSystemInstanceNode {
        let mut node = LSystemInstanceNode::new("plants");
        node.set_grammar(grammar);
        node
    }

    #[test]
    fn test_attribute_names() {
        for attribute in LSystemAttribute::ALL {
            assert_eq!(
                LSystemAttribute::from_name(attribute.long_name()),
                Some(attribute)
            );
            assert_eq!(
                LSystemAttribute::from_name(attribute.short_name()),
                Some(attribute)
            );
        }
        assert_eq!(LSystemOutput::from_name("of"), Some(LSystemOutput::Flowers));
        assert!(LSystemAttribute::from_name("seed").is_none());
    }

    #[test]
    fn test_defaults() {
        let node = LSystemInstanceNode::new("plants");
        assert_eq!(node.iterations(), 1);
        assert_eq!(node.angle(), 22.5);
        assert_eq!(node.step(), 1.0);
        assert!(!node.from_file());
        assert!(node.is_dirty(LSystemOutput::Branches));
    }

    #[test]
    fn test_iterations_clamped() {
        let mut node = LSystemInstanceNode::new("plants");
        node.set_iterations(0);
        assert_eq!(node.iterations(), 1);
        node.set_iterations(-4);
        assert_eq!(node.iterations(), 1);
        node.set_iterations(6);
        assert_eq!(node.iterations(), 6);
    }

    #[test]
    fn test_pull_computes_both_outputs() {
        let mut node = node_with("F\nF -> F[+F]F*");
        node.set_angle(90.0);

        assert_eq!(node.branches().len(), 3);
        assert!(!node.is_dirty(LSystemOutput::Branches));
        assert!(!node.is_dirty(LSystemOutput::Flowers));
        assert_eq!(node.flowers().len(), 1);
        assert!(node.branches().is_aligned());
    }

    #[test]
    fn test_edit_marks_dirty() {
        let mut node = node_with("F\nF -> FF");
        node.branches();
        node.set_step(2.0);
        assert!(node.is_dirty(LSystemOutput::Branches));
        assert!(node.is_dirty(LSystemOutput::Flowers));
        let scale = node.branches().scale[0];
        assert_eq!(scale.x, 2.0);
    }

    #[test]
    fn test_branch_positions_in_host_space() {
        let mut node = node_with("F");
        node.set_step(2.0);
        let branches = node.branches();
        assert_eq!(branches.position[0], glam::DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(branches.aim_direction[0], glam::DVec3::Y);
    }

    #[test]
    fn test_every_input_dirties_both_outputs() {
        let mut node = node_with("F\nF -> F[+F]F*");
        for attribute in LSystemAttribute::ALL {
            let value = match attribute {
                LSystemAttribute::Iterations => AttributeValue::Int(2),
                LSystemAttribute::Step => AttributeValue::Float(2.0),
                LSystemAttribute::Angle => AttributeValue::Float(30.0),
                LSystemAttribute::Grammar => AttributeValue::String("F\nF -> F[-F]F*".into()),
                LSystemAttribute::FromFile => AttributeValue::Bool(false),
            };
            node.branches();
            node.flowers();
            node.set_attribute(attribute.long_name(), value).unwrap();
            for output in LSystemOutput::ALL {
                assert!(node.is_dirty(output), "{attribute:?} left {output:?} clean");
            }
        }
    }

    #[test]
    fn test_failed_reload_keeps_grammar() {
        let mut node = node_with("F\nF -> FF");
        node.set_grammar("F\nF -> F[");
        assert_eq!(node.engine().grammar_source(), "F\nF -> FF");
        // Two rewrites of F -> FF.
        node.set_iterations(2);
        assert_eq!(node.branches().len(), 4);
    }

    #[test]
    fn test_failed_recompute_leaves_outputs() {
        let mut node = node_with("F\nF -> FF");
        assert_eq!(node.branches().len(), 2);

        node.set_grammar("]F");
        assert!(node.compute().is_err());
        assert_eq!(node.branches().len(), 2);
        assert!(!node.is_dirty(LSystemOutput::Branches));
    }

    #[test]
    fn test_set_attribute_dispatch() {
        let mut node = LSystemInstanceNode::new("plants");
        node.set_attribute("gr", AttributeValue::String("F".into()))
            .unwrap();
        node.set_attribute("iterations", AttributeValue::Int(3))
            .unwrap();
        node.set_attribute("st", AttributeValue::Float(0.5)).unwrap();
        node.set_attribute("an", AttributeValue::Int(45)).unwrap();
        assert_eq!(node.iterations(), 3);
        assert_eq!(node.step(), 0.5);
        assert_eq!(node.angle(), 45.0);

        assert!(matches!(
            node.set_attribute("fromFile", AttributeValue::Int(1)),
            Err(NodeError::AttributeType { .. })
        ));
        assert!(matches!(
            node.set_attribute("bogus", AttributeValue::Int(1)),
            Err(NodeError::UnknownAttribute { .. })
        ));
        assert_eq!(node.output("ob").unwrap().len(), 1);
        assert!(node.output("outPoints").is_err());
    }

    #[test]
    fn test_from_file_without_name_keeps_grammar() {
        let mut node = LSystemInstanceNode::new("plants");
        node.set_from_file(true);
        assert!(node.reload_grammar().is_ok());
        assert_eq!(node.engine().grammar_source(), "");
    }
}
