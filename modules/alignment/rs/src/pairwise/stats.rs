use std::fmt::Display;

use derive_getters::{Dissolve, Getters};

use crate::pairwise::nw::Hit;
use crate::pairwise::Op;
use crate::Score;

/// Column statistics of a single alignment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Getters, Dissolve)]
pub struct Summary {
    /// Number of alignment columns
    length: usize,
    matches: usize,
    mismatches: usize,
    /// Gap placeholders in the first fragment
    gaps_first: usize,
    /// Gap placeholders in the second fragment
    gaps_second: usize,
}

impl Summary {
    pub fn from_fragments(seq1: &str, seq2: &str) -> Self {
        let mut summary = Summary::default();
        for (a, b) in seq1.bytes().zip(seq2.bytes()) {
            summary.length += 1;
            match Op::classify(a, b) {
                Some(Op::Match) => summary.matches += 1,
                Some(Op::Mismatch) => summary.mismatches += 1,
                Some(Op::GapFirst) => summary.gaps_first += 1,
                Some(Op::GapSecond) => summary.gaps_second += 1,
                None => {}
            }
        }
        summary
    }

    pub fn gaps(&self) -> usize {
        self.gaps_first + self.gaps_second
    }

    /// Percent of alignment columns that are identical symbols.
    pub fn identity(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.matches as f64 / self.length as f64 * 100.0
        }
    }
}

impl<S: Score> From<&Hit<S>> for Summary {
    fn from(value: &Hit<S>) -> Self {
        Self::from_fragments(value.seq1(), value.seq2())
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "length: {}, matches: {}, mismatches: {}, gaps: {}, identity: {:.2}%",
            self.length,
            self.matches,
            self.mismatches,
            self.gaps(),
            self.identity()
        )
    }
}
