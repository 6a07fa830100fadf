//! Error types for grammar parsing, interpretation, and grammar loading.

use std::path::PathBuf;

/// Errors in the symbol/argument syntax of an axiom or successor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    /// An argument list was opened but never closed.
    #[error("argument opened at column {column} is missing ')'")]
    Unclosed { column: usize },

    /// The text between the parentheses is not a number.
    #[error("invalid argument '{text}' at column {column}")]
    InvalidNumber { column: usize, text: String },

    /// A parenthesis that does not follow a symbol.
    #[error("unexpected '{found}' at column {column}")]
    UnexpectedParen { column: usize, found: char },

    /// Text the symbol grammar could not match at all.
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },
}

/// Malformed grammar source.
///
/// Line numbers are 1-based. For grammars built from an axiom and a rule list,
/// the axiom is line 1 and rule `i` is line `i + 2`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarParseError {
    /// The program contains rules but no axiom line.
    #[error("grammar has no axiom")]
    MissingAxiom,

    /// A second non-rule line was found.
    #[error("line {line}: unexpected second axiom '{text}'")]
    DuplicateAxiom { line: usize, text: String },

    /// The left-hand side of `->` is not exactly one symbol.
    #[error("line {line}: rule predecessor '{text}' must be a single symbol")]
    InvalidPredecessor { line: usize, text: String },

    /// Nothing to the right of `->`.
    #[error("line {line}: rule for '{symbol}' has an empty body")]
    EmptyBody { line: usize, symbol: char },

    /// `[` and `]` do not nest properly in a successor.
    #[error("line {line}: unbalanced branch markers in rule for '{symbol}'")]
    UnbalancedBrackets { line: usize, symbol: char },

    /// The weight after `:` is not a positive finite number.
    #[error("line {line}: invalid rule weight '{text}'")]
    InvalidWeight { line: usize, text: String },

    /// The program did not match the grammar-program syntax.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Symbol/argument syntax error.
    #[error("line {line}: {source}")]
    Token {
        line: usize,
        #[source]
        source: TokenError,
    },
}

/// Interpretation failure of an expanded symbol string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InterpretationError {
    /// `]` with no saved state to restore.
    #[error("pop on empty state stack at symbol {index}")]
    StackUnderflow { index: usize },
}

/// Umbrella error for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum LSystemError {
    /// The grammar source is malformed.
    #[error(transparent)]
    Parse(#[from] GrammarParseError),

    /// The expanded string could not be interpreted.
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    /// The grammar file could not be read.
    #[error("failed to read grammar file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
