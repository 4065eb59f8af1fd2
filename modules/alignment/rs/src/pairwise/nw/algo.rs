use std::ops::{BitOr, BitOrAssign};

use crate::pairwise::scoring::Scoring;
use crate::{Alignable, Score};

use super::matrix::ScoreMatrix;

/// Set of recurrence branches that tie for the maximum in a single DP cell.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Branches(u8);

impl Branches {
    pub const NONE: Branches = Branches(0);
    /// `cell(i - 1, j - 1)` + symbol score, both sequences advance.
    pub const DIAGONAL: Branches = Branches(1);
    /// `cell(i, j - 1)` + gap, only the first sequence advances.
    pub const HORIZONTAL: Branches = Branches(1 << 1);
    /// `cell(i - 1, j)` + gap, only the second sequence advances.
    pub const VERTICAL: Branches = Branches(1 << 2);

    #[inline(always)]
    pub fn contains(&self, other: Branches) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Branches {
    type Output = Branches;

    fn bitor(self, rhs: Self) -> Self::Output {
        Branches(self.0 | rhs.0)
    }
}

impl BitOrAssign for Branches {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// The global fill runs row-by-row, left-to-right, and notifies the tracer about each
// interior cell together with every branch that achieved the cell maximum.
#[allow(unused_variables)]
pub trait Tracer {
    type Score: Score;

    fn fill_start(&mut self, rows: usize, cols: usize) {}
    fn fill_end(&mut self, rows: usize, cols: usize) {}

    fn cell(&mut self, row: usize, col: usize, score: Self::Score, branches: Branches) {}
}

/// Tracer that ignores every notification.
pub struct Silent<S: Score>(std::marker::PhantomData<S>);

impl<S: Score> Default for Silent<S> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<S: Score> Tracer for Silent<S> {
    type Score = S;
}

/// Fill the global alignment matrix of `seq2` (rows) against `seq1` (columns).
///
/// Cells are visited in row-major order; for each interior cell the tracer receives the exact set
/// of winning branches. Boundary cells are an arithmetic progression with step `gap` and are never
/// reported.
///
/// Scores are accumulated with plain integer arithmetic: the caller picks an `S` wide enough for
/// `(len(seq1) + len(seq2)) * max(|score|)`, which [`super::Engine::align`] verifies up front.
pub fn fill<S, Seq1, Seq2, T>(
    seq1: &Seq1,
    seq2: &Seq2,
    scoring: &Scoring<S>,
    tracer: &mut T,
) -> ScoreMatrix<S>
where
    S: Score,
    Seq1: Alignable,
    Seq2: Alignable<Symbol = Seq1::Symbol>,
    Seq1::Symbol: PartialEq,
    T: Tracer<Score = S>,
{
    let (rows, cols) = (seq2.len() + 1, seq1.len() + 1);
    let mut matrix = ScoreMatrix::with_boundary(rows, cols, scoring.gap);

    tracer.fill_start(rows, cols);
    for row in 1..rows {
        let s2 = seq2.at(row - 1);
        for col in 1..cols {
            let s1 = seq1.at(col - 1);

            let diagonal = matrix.at(row - 1, col - 1) + scoring.symbols(s1, s2);
            let horizontal = matrix.at(row, col - 1) + scoring.gap;
            let vertical = matrix.at(row - 1, col) + scoring.gap;

            let best = diagonal.max(horizontal).max(vertical);
            let mut branches = Branches::NONE;
            if diagonal == best {
                branches |= Branches::DIAGONAL;
            }
            if horizontal == best {
                branches |= Branches::HORIZONTAL;
            }
            if vertical == best {
                branches |= Branches::VERTICAL;
            }
            debug_assert!(!branches.is_empty());

            matrix.set(row, col, best);
            tracer.cell(row, col, best, branches);
        }
    }
    tracer.fill_end(rows, cols);

    matrix
}
