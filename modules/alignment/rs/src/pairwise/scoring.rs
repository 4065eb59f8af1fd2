use std::str::FromStr;

use derive_getters::Dissolve;
use eyre::{eyre, Result};

use crate::Score;

/// Linear (affine-free) scoring scheme: a reward/penalty per aligned column.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Dissolve)]
pub struct Scoring<S: Score> {
    pub matched: S,
    pub mismatched: S,
    pub gap: S,
}

impl<S: Score> Scoring<S> {
    pub fn new(matched: S, mismatched: S, gap: S) -> Self {
        Self {
            matched,
            mismatched,
            gap,
        }
    }

    /// Parse the scoring scheme from raw user input. Every field must be an integer.
    pub fn parse(matched: &str, mismatched: &str, gap: &str) -> Result<Self>
    where
        S: FromStr,
    {
        let parse = |name: &str, raw: &str| -> Result<S> {
            raw.trim()
                .parse::<S>()
                .map_err(|_| eyre!("{name} score must be an integer, got {raw:?}"))
        };
        Ok(Self {
            matched: parse("Match", matched)?,
            mismatched: parse("Mismatch", mismatched)?,
            gap: parse("Gap", gap)?,
        })
    }

    #[inline(always)]
    pub fn symbols<Symbol: PartialEq>(&self, a: &Symbol, b: &Symbol) -> S {
        if a == b { self.matched } else { self.mismatched }
    }
}

impl<S: Score> Default for Scoring<S> {
    fn default() -> Self {
        Scoring {
            matched: S::one(),
            mismatched: S::zero() - S::one(),
            gap: S::zero() - (S::one() + S::one()),
        }
    }
}
