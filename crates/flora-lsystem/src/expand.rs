//! Parallel string rewriting with seeded production selection.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grammar::{Grammar, Production};
use crate::token::Token;

/// Derive the seed used to rewrite generation `generation` from the engine seed.
///
/// `DefaultHasher` is only stable within one Rust release, so a seed reproduces
/// the same plant on a given toolchain but may change after an upgrade.
pub fn derive_generation_seed(seed: u64, generation: u32) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    generation.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one rewriting step.
///
/// Each generation gets its own stream, so a cached generation `k` always
/// rewrites to the same generation `k + 1` for a fixed seed.
pub fn generation_rng(seed: u64, generation: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_generation_seed(seed, generation))
}

/// Rewrite every token once.
///
/// Tokens without productions, and tokens carrying an explicit argument, are
/// copied unchanged. The RNG is only consulted for symbols with more than one
/// production.
pub fn rewrite<R: Rng>(tokens: &[Token], grammar: &Grammar, rng: &mut R) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);

    for token in tokens {
        let productions = match token.argument {
            None => grammar.productions(token.symbol),
            Some(_) => None,
        };

        match productions {
            Some([single]) => out.extend_from_slice(&single.successor),
            Some(choices) if !choices.is_empty() => {
                out.extend_from_slice(&choose(choices, rng).successor)
            }
            _ => out.push(*token),
        }
    }

    out
}

fn choose<'a, R: Rng>(choices: &'a [Production], rng: &mut R) -> &'a Production {
    let total: f32 = choices.iter().map(|p| p.weight).sum();
    let mut pick = rng.random::<f32>() * total;

    for production in choices {
        if pick < production.weight {
            return production;
        }
        pick -= production.weight;
    }

    // Rounding can leave `pick` a hair above the last weight.
    &choices[choices.len() - 1]
}
