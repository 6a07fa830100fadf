//! Pest front end: program text to raw statements, symbol text to tokens.
//!
//! Validation that needs more than the syntax (single-symbol predecessors,
//! weights, bracket nesting, duplicate axioms) happens in [`crate::grammar`].

use pest::Parser;
use pest::error::{Error, LineColLocation};
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::{GrammarParseError, TokenError};
use crate::token::Token;

#[derive(Parser)]
#[grammar = "src/lsystem.pest"]
struct LSystemParser;

/// A rule line before validation.
pub(crate) struct RawProduction<'i> {
    pub line: usize,
    pub predecessor: &'i str,
    pub successor: Result<Vec<Token>, TokenError>,
    pub weight: Option<&'i str>,
}

/// A non-comment program line, in source order.
pub(crate) enum Statement<'i> {
    Axiom {
        line: usize,
        text: &'i str,
        tokens: Result<Vec<Token>, TokenError>,
    },
    Production(RawProduction<'i>),
}

/// Split a whole program into statements.
pub(crate) fn program(source: &str) -> Result<Vec<Statement<'_>>, GrammarParseError> {
    let pairs = LSystemParser::parse(Rule::program, source).map_err(|e| {
        GrammarParseError::Syntax {
            line: error_line_col(&e).0,
            message: e.variant.message().into_owned(),
        }
    })?;

    let mut statements = Vec::new();
    for pair in pairs.flat_map(|p| p.into_inner()) {
        let line = line_col(&pair).0;
        match pair.as_rule() {
            Rule::axiom => statements.push(Statement::Axiom {
                line,
                text: pair.as_str(),
                tokens: collect_tokens(pair.into_inner()),
            }),
            Rule::production => statements.push(Statement::Production(production(pair, line))),
            _ => {}
        }
    }
    Ok(statements)
}

/// Parse a single `P -> body [: weight]` line. `None` if there is no `->`.
pub(crate) fn rule_line(text: &str, line: usize) -> Option<RawProduction<'_>> {
    let pairs = LSystemParser::parse(Rule::rule_line, text).ok()?;
    pairs
        .flat_map(|p| p.into_inner())
        .find(|p| p.as_rule() == Rule::production)
        .map(|pair| production(pair, line))
}

/// Tokenize free-standing symbol text, where newlines count as whitespace.
pub(crate) fn tokens(text: &str) -> Result<Vec<Token>, TokenError> {
    let pairs = LSystemParser::parse(Rule::tokens, text).map_err(|e| TokenError::Syntax {
        column: error_line_col(&e).1.saturating_sub(1),
        message: e.variant.message().into_owned(),
    })?;
    collect_tokens(pairs.flat_map(|p| p.into_inner()))
}

fn production<'i>(pair: Pair<'i, Rule>, line: usize) -> RawProduction<'i> {
    let mut predecessor = "";
    let mut successor = Ok(Vec::new());
    let mut weight = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::predecessor => predecessor = part.as_str(),
            Rule::successor => successor = collect_tokens(part.into_inner()),
            Rule::weight => {
                weight = part
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::weight_text)
                    .map(|p| p.as_str());
            }
            _ => {}
        }
    }

    RawProduction {
        line,
        predecessor,
        successor,
        weight,
    }
}

/// Convert token-level pairs, stopping at the first malformed one.
fn collect_tokens<'i>(
    items: impl Iterator<Item = Pair<'i, Rule>>,
) -> Result<Vec<Token>, TokenError> {
    let mut out = Vec::new();

    for item in items {
        let column = column(&item);
        match item.as_rule() {
            Rule::token | Rule::body_token => {
                let Some(symbol) = item.as_str().chars().next() else {
                    continue;
                };
                let argument = item
                    .into_inner()
                    .flatten()
                    .find(|p| p.as_rule() == Rule::argument_text);
                out.push(match argument {
                    Some(text) => Token::with_argument(symbol, number(&text)?),
                    None => Token::new(symbol),
                });
            }
            Rule::unclosed => return Err(TokenError::Unclosed { column }),
            Rule::stray => {
                return Err(TokenError::UnexpectedParen {
                    column,
                    found: item.as_str().chars().next().unwrap_or('('),
                });
            }
            _ => {}
        }
    }

    Ok(out)
}

/// Arguments must be finite numbers.
fn number(pair: &Pair<'_, Rule>) -> Result<f32, TokenError> {
    let raw = pair.as_str().trim();
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TokenError::InvalidNumber {
            column: column(pair),
            text: raw.to_string(),
        })
}

fn line_col(pair: &Pair<'_, Rule>) -> (usize, usize) {
    pair.as_span().start_pos().line_col()
}

/// 0-based column within the pair's line.
fn column(pair: &Pair<'_, Rule>) -> usize {
    line_col(pair).1 - 1
}

fn error_line_col(error: &Error<Rule>) -> (usize, usize) {
    match error.line_col {
        LineColLocation::Pos(pos) | LineColLocation::Span(pos, _) => pos,
    }
}
