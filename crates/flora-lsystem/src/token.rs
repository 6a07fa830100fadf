//! Symbols with optional numeric arguments, e.g. `F`, `F(2.5)`, `+(45)`.

use std::fmt;

use crate::error::TokenError;
use crate::parser;

/// One symbol of an L-system string.
///
/// The optional argument overrides the step length or turn angle for that
/// single turtle instruction. Tokens that carry an argument are terminals:
/// rewriting never replaces them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub symbol: char,
    pub argument: Option<f32>,
}

impl Token {
    /// A bare symbol.
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            argument: None,
        }
    }

    /// A symbol with an explicit argument.
    pub const fn with_argument(symbol: char, argument: f32) -> Self {
        Self {
            symbol,
            argument: Some(argument),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(arg) => write!(f, "{}({})", self.symbol, arg),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// Split `text` into tokens. Whitespace between symbols is ignored.
///
/// An argument must directly follow its symbol and be a finite number.
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenError> {
    parser::tokens(text)
}

/// Render tokens back into their textual form.
pub fn render(tokens: &[Token]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(tokens.len());
    for token in tokens {
        let _ = write!(out, "{token}");
    }
    out
}
