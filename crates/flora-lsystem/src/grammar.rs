//! Grammar programs: an axiom plus weighted production rules.
//!
//! Program text, one statement per line:
//!
//! ```text
//! # comment
//! F
//! F -> F[+F]F
//! F -> F[-F]F : 0.5
//! ```
//!
//! The single non-rule line is the axiom. Rules sharing a predecessor form a
//! weighted choice; the weight after `:` defaults to 1. Inside a successor `:`
//! always starts the weight.

use hashbrown::HashMap;

use crate::error::GrammarParseError;
use crate::parser::{self, RawProduction, Statement};
use crate::token::{Token, tokenize};

/// One successor of a production rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Production {
    pub successor: Vec<Token>,
    pub weight: f32,
}

/// An immutable, validated L-system grammar.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    axiom: Vec<Token>,
    rules: HashMap<char, Vec<Production>>,
    source: String,
}

impl Grammar {
    /// Parse a whole grammar program.
    ///
    /// An empty program (only blank or comment lines) yields the empty grammar.
    pub fn parse(program: &str) -> Result<Self, GrammarParseError> {
        let mut axiom: Option<Vec<Token>> = None;
        let mut rules: HashMap<char, Vec<Production>> = HashMap::new();

        for statement in parser::program(program)? {
            match statement {
                Statement::Production(raw) => {
                    let (symbol, production) = build_production(raw)?;
                    rules.entry(symbol).or_default().push(production);
                }
                Statement::Axiom { line, text, .. } if axiom.is_some() => {
                    return Err(GrammarParseError::DuplicateAxiom {
                        line,
                        text: text.trim().to_string(),
                    });
                }
                Statement::Axiom { line, tokens, .. } => {
                    let tokens =
                        tokens.map_err(|source| GrammarParseError::Token { line, source })?;
                    axiom = Some(tokens);
                }
            }
        }

        let axiom = match axiom {
            Some(axiom) => axiom,
            None if rules.is_empty() => Vec::new(),
            None => return Err(GrammarParseError::MissingAxiom),
        };

        Ok(Self {
            axiom,
            rules,
            source: program.to_string(),
        })
    }

    /// Build a grammar from an axiom and a list of rule lines (`P -> body`).
    ///
    /// The axiom must be a single line; a second line would read as another
    /// statement when the stored source is parsed again.
    pub fn from_parts(axiom: &str, rules: &[&str]) -> Result<Self, GrammarParseError> {
        let axiom = axiom.trim();
        if let Some((_, rest)) = axiom.split_once('\n') {
            return Err(GrammarParseError::DuplicateAxiom {
                line: 2,
                text: rest.trim().to_string(),
            });
        }

        let mut program = String::from(axiom);
        for rule in rules {
            program.push('\n');
            program.push_str(rule.trim());
        }

        let axiom_tokens =
            tokenize(axiom).map_err(|source| GrammarParseError::Token { line: 1, source })?;

        let mut table: HashMap<char, Vec<Production>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            let line = index + 2;
            let rule = rule.trim();
            let raw = parser::rule_line(rule, line).ok_or_else(|| {
                GrammarParseError::InvalidPredecessor {
                    line,
                    text: rule.to_string(),
                }
            })?;
            let (symbol, production) = build_production(raw)?;
            table.entry(symbol).or_default().push(production);
        }

        Ok(Self {
            axiom: axiom_tokens,
            rules: table,
            source: program,
        })
    }

    /// The start string.
    pub fn axiom(&self) -> &[Token] {
        &self.axiom
    }

    /// Productions for `symbol`, if it is a non-terminal.
    pub fn productions(&self, symbol: char) -> Option<&[Production]> {
        self.rules.get(&symbol).map(Vec::as_slice)
    }

    /// Number of production rules, counting every alternative.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// True if any symbol has more than one production.
    pub fn is_stochastic(&self) -> bool {
        self.rules.values().any(|p| p.len() > 1)
    }

    /// The text this grammar was built from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

fn build_production(raw: RawProduction<'_>) -> Result<(char, Production), GrammarParseError> {
    let RawProduction {
        line,
        predecessor,
        successor,
        weight,
    } = raw;

    let lhs = predecessor.trim();
    let mut chars = lhs.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) if !matches!(c, '(' | ')' | '[' | ']') => c,
        _ => {
            return Err(GrammarParseError::InvalidPredecessor {
                line,
                text: lhs.to_string(),
            });
        }
    };

    let weight = match weight.map(str::trim) {
        Some(text) => text
            .parse::<f32>()
            .ok()
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| GrammarParseError::InvalidWeight {
                line,
                text: text.to_string(),
            })?,
        None => 1.0,
    };

    let successor = successor.map_err(|source| GrammarParseError::Token { line, source })?;
    if successor.is_empty() {
        return Err(GrammarParseError::EmptyBody { line, symbol });
    }
    if !is_properly_nested(&successor) {
        return Err(GrammarParseError::UnbalancedBrackets { line, symbol });
    }

    Ok((symbol, Production { successor, weight }))
}

/// Every `]` closes an earlier `[` and nothing is left open.
fn is_properly_nested(tokens: &[Token]) -> bool {
    let mut depth: usize = 0;
    for token in tokens {
        match token.symbol {
            '[' => depth += 1,
            ']' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;
    use crate::token::render;

    #[test]
    fn test_parse_program() {
        let grammar = Grammar::parse("# plant\nX\n\nX -> F[+X]F[-X]+X\nF -> FF\n").unwrap();
        assert_eq!(render(grammar.axiom()), "X");
        assert_eq!(grammar.rule_count(), 2);
        assert_eq!(render(&grammar.productions('F').unwrap()[0].successor), "FF");
        assert!(grammar.productions('+').is_none());
        assert!(!grammar.is_stochastic());
    }

    #[test]
    fn test_weighted_alternatives() {
        let grammar = Grammar::parse("F\nF -> F[+F]F : 2\nF -> F[-F]F : 0.5").unwrap();
        let productions = grammar.productions('F').unwrap();
        assert_eq!(productions.len(), 2);
        assert_eq!(productions[0].weight, 2.0);
        assert_eq!(productions[1].weight, 0.5);
        assert!(grammar.is_stochastic());
    }

    #[test]
    fn test_empty_program() {
        let grammar = Grammar::parse("\n# nothing here\n").unwrap();
        assert!(grammar.axiom().is_empty());
        assert_eq!(grammar.rule_count(), 0);
    }

    #[test]
    fn test_missing_axiom() {
        assert_eq!(
            Grammar::parse("F -> FF").unwrap_err(),
            GrammarParseError::MissingAxiom
        );
    }

    #[test]
    fn test_duplicate_axiom() {
        assert!(matches!(
            Grammar::parse("F\nX"),
            Err(GrammarParseError::DuplicateAxiom { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            Grammar::parse("F\nF ->   ").unwrap_err(),
            GrammarParseError::EmptyBody {
                line: 2,
                symbol: 'F'
            }
        );
    }

    #[test]
    fn test_unbalanced_brackets() {
        for body in ["F[+F", "F]+F[", "F[[F]"] {
            let program = format!("F\nF -> {body}");
            assert!(
                matches!(
                    Grammar::parse(&program),
                    Err(GrammarParseError::UnbalancedBrackets { line: 2, .. })
                ),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn test_invalid_predecessor() {
        assert!(matches!(
            Grammar::parse("F\nFF -> F"),
            Err(GrammarParseError::InvalidPredecessor { line: 2, .. })
        ));
        assert!(matches!(
            Grammar::parse("F\n -> F"),
            Err(GrammarParseError::InvalidPredecessor { .. })
        ));
    }

    #[test]
    fn test_invalid_weight() {
        for weight in ["abc", "0", "-1"] {
            let program = format!("F\nF -> FF : {weight}");
            assert!(matches!(
                Grammar::parse(&program),
                Err(GrammarParseError::InvalidWeight { line: 2, .. })
            ));
        }
    }

    #[test]
    fn test_token_error_carries_line() {
        assert!(matches!(
            Grammar::parse("F\n\nF -> F(oops)"),
            Err(GrammarParseError::Token { line: 3, .. })
        ));
    }

    #[test]
    fn test_from_parts() {
        let grammar = Grammar::from_parts("F", &["F -> F[+F]F"]).unwrap();
        assert_eq!(grammar.source(), "F\nF -> F[+F]F");
        assert_eq!(grammar.rule_count(), 1);

        let err = Grammar::from_parts("F", &["F -> FF", "F -> [F"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarParseError::UnbalancedBrackets { line: 3, .. }
        ));
    }

    #[test]
    fn test_non_finite_argument_carries_line() {
        for program in ["F\nF -> F(NaN)F", "# plant\nF\nF -> F+(inf)F"] {
            let err = Grammar::parse(program).unwrap_err();
            let expected_line = program.lines().count();
            assert!(
                matches!(
                    err,
                    GrammarParseError::Token {
                        line,
                        source: TokenError::InvalidNumber { .. },
                    } if line == expected_line
                ),
                "{program:?} gave {err:?}"
            );
        }
        assert!(matches!(
            Grammar::parse("F(inf)"),
            Err(GrammarParseError::Token { line: 1, .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_multiline_axiom() {
        assert_eq!(
            Grammar::from_parts("F\nX", &["F -> FF"]).unwrap_err(),
            GrammarParseError::DuplicateAxiom {
                line: 2,
                text: "X".to_string()
            }
        );
    }

    #[test]
    fn test_from_parts_rule_without_arrow() {
        assert!(matches!(
            Grammar::from_parts("F", &["F -> FF", "FF"]),
            Err(GrammarParseError::InvalidPredecessor { line: 3, .. })
        ));
    }

    #[test]
    fn test_colon_starts_weight() {
        assert!(matches!(
            Grammar::parse("F\nF -> F:X"),
            Err(GrammarParseError::InvalidWeight { line: 2, .. })
        ));
    }

    #[test]
    fn test_axiom_brackets_not_validated() {
        // Unmatched pops in the axiom surface at interpretation time.
        let grammar = Grammar::parse("]F").unwrap();
        assert_eq!(grammar.axiom().len(), 2);
    }
}
