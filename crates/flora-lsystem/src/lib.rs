//! L-system grammar engine: grammar parsing, seeded string rewriting, and 3-D
//! turtle interpretation into branch segments and flower points.

mod engine;
mod error;
mod expand;
mod grammar;
mod parser;
mod token;
mod turtle;

pub use engine::{DEFAULT_ANGLE, DEFAULT_STEP, LSystem};
pub use error::{GrammarParseError, InterpretationError, LSystemError, TokenError};
pub use expand::{derive_generation_seed, generation_rng, rewrite};
pub use grammar::{Grammar, Production};
pub use token::{Token, render, tokenize};
pub use turtle::{
    BranchSegment, FlowerPoint, LOCAL_HEADING, LOCAL_LEFT, LOCAL_UP, Turtle, TurtleCommand,
    TurtleOutput, interpret,
};
