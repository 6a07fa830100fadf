//! The L-system engine: active grammar, defaults, and cached generations.

use std::path::Path;

use crate::error::{GrammarParseError, InterpretationError, LSystemError};
use crate::expand::{generation_rng, rewrite};
use crate::grammar::Grammar;
use crate::token::{Token, render};
use crate::turtle::{TurtleOutput, interpret};

/// Default turn angle in degrees.
pub const DEFAULT_ANGLE: f32 = 22.5;
/// Default step length.
pub const DEFAULT_STEP: f32 = 1.0;

/// Grammar engine owned by a single node.
///
/// The grammar is replaced only by a successful load; a failed load leaves the
/// previous grammar active. Expanded generations are cached until the grammar
/// or seed changes.
#[derive(Clone, Debug)]
pub struct LSystem {
    grammar: Grammar,
    default_angle: f32,
    default_step: f32,
    seed: u64,
    /// `generations[k]` is the axiom rewritten `k` times.
    generations: Vec<Vec<Token>>,
}

impl Default for LSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LSystem {
    /// An engine with an empty grammar and the default angle and step.
    pub fn new() -> Self {
        Self {
            grammar: Grammar::default(),
            default_angle: DEFAULT_ANGLE,
            default_step: DEFAULT_STEP,
            seed: 0,
            generations: Vec::new(),
        }
    }

    /// Replace the grammar and the defaults in one call.
    ///
    /// On error nothing changes, including the defaults.
    pub fn configure(
        &mut self,
        axiom: &str,
        rules: &[&str],
        default_angle: f32,
        default_step: f32,
    ) -> Result<(), GrammarParseError> {
        let grammar = Grammar::from_parts(axiom, rules)?;
        self.set_grammar(grammar);
        self.default_angle = default_angle;
        self.default_step = default_step;
        Ok(())
    }

    /// Parse a grammar program and make it active.
    pub fn load_program_from_str(&mut self, program: &str) -> Result<(), GrammarParseError> {
        let grammar = Grammar::parse(program)?;
        self.set_grammar(grammar);
        Ok(())
    }

    /// Read a grammar program from `path` and make it active.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<(), LSystemError> {
        let path = path.as_ref();
        let program = std::fs::read_to_string(path).map_err(|source| LSystemError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_program_from_str(&program)?;
        tracing::debug!(path = %path.display(), "loaded grammar file");
        Ok(())
    }

    /// Install an already validated grammar.
    pub fn set_grammar(&mut self, grammar: Grammar) {
        tracing::debug!(
            rules = grammar.rule_count(),
            stochastic = grammar.is_stochastic(),
            "grammar replaced"
        );
        self.grammar = grammar;
        self.generations.clear();
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Source text of the active grammar.
    pub fn grammar_source(&self) -> &str {
        self.grammar.source()
    }

    /// Takes effect on the next interpretation.
    pub fn set_default_angle(&mut self, degrees: f32) {
        self.default_angle = degrees;
    }

    /// Takes effect on the next interpretation.
    pub fn set_default_step(&mut self, distance: f32) {
        self.default_step = distance;
    }

    pub fn default_angle(&self) -> f32 {
        self.default_angle
    }

    pub fn default_step(&self) -> f32 {
        self.default_step
    }

    /// Seed for weighted production selection. Clears the generation cache.
    pub fn set_seed(&mut self, seed: u64) {
        if seed != self.seed {
            self.seed = seed;
            self.generations.clear();
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Tokens of the axiom rewritten `n` times, computing missing generations.
    pub fn generation(&mut self, n: u32) -> &[Token] {
        if self.generations.is_empty() {
            self.generations.push(self.grammar.axiom().to_vec());
        }

        while self.generations.len() <= n as usize {
            let index = self.generations.len() - 1;
            let mut rng = generation_rng(self.seed, index as u32);
            let next = rewrite(&self.generations[index], &self.grammar, &mut rng);
            self.generations.push(next);
        }

        &self.generations[n as usize]
    }

    /// The axiom rewritten `n` times, as text.
    pub fn iteration(&mut self, n: u32) -> String {
        render(self.generation(n))
    }

    /// Expand the axiom `iterations` times and interpret the result.
    ///
    /// `iterations = 0` interprets the axiom as written. Repeated calls with
    /// unchanged configuration return identical geometry.
    pub fn expand_and_interpret(
        &mut self,
        iterations: u32,
    ) -> Result<TurtleOutput, InterpretationError> {
        let (step, angle) = (self.default_step, self.default_angle);
        let tokens = self.generation(iterations);
        let output = interpret(tokens, step, angle)?;
        tracing::debug!(
            iterations,
            symbols = tokens.len(),
            branches = output.branches.len(),
            flowers = output.flowers.len(),
            "interpreted L-system"
        );
        Ok(output)
    }
}
