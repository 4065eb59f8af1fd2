use std::fmt::Display;

use itertools::Itertools;
use num::{CheckedAdd, CheckedMul};

use crate::Score;

/// Dense row-major DP table of size `(len(seq2) + 1) x (len(seq1) + 1)`.
///
/// Cell `(i, j)` holds the optimal global alignment score of `seq2[1..=i]` against `seq1[1..=j]`.
/// Row 0 and column 0 correspond to alignments against the empty prefix.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ScoreMatrix<S: Score> {
    rows: usize,
    cols: usize,
    data: Vec<S>,
}

impl<S: Score> ScoreMatrix<S> {
    /// Matrix with the boundary row and column filled by the gap progression, interior set to zero.
    pub(crate) fn with_boundary(rows: usize, cols: usize, gap: S) -> Self {
        let mut data = vec![S::zero(); rows * cols];
        for col in 1..cols {
            data[col] = data[col - 1] + gap;
        }
        for row in 1..rows {
            data[row * cols] = data[(row - 1) * cols] + gap;
        }

        Self { rows, cols, data }
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, row: usize, col: usize, score: S) {
        self.data[row * self.cols + col] = score;
    }

    /// Number of rows, `len(seq2) + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `len(seq1) + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> S {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[S] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Score of the full global alignment, i.e. the bottom-right corner.
    pub fn last(&self) -> S {
        self.at(self.rows - 1, self.cols - 1)
    }

    /// The best score reachable from the last row or the last column when the unconsumed tail up
    /// to the bottom-right corner is paid with `gap` per symbol. Returns the score and every
    /// coordinate `(row, col)` reaching it. Candidates whose adjusted score does not fit into `S`
    /// are skipped; the corner itself always qualifies.
    pub fn best_terminals(&self, gap: S) -> (S, Vec<(usize, usize)>) {
        let (lastrow, lastcol) = (self.rows - 1, self.cols - 1);

        let candidates = (0..=lastcol)
            .map(|col| (lastrow, col))
            .chain((0..lastrow).map(|row| (row, lastcol)));

        let mut best = self.last();
        let mut coordinates = Vec::new();
        for (row, col) in candidates {
            let tail = (lastrow - row) + (lastcol - col);
            let penalty = S::from(tail).and_then(|x| gap.checked_mul(&x));
            let Some(score) = penalty.and_then(|x| self.at(row, col).checked_add(&x)) else {
                continue;
            };

            if coordinates.is_empty() || score > best {
                best = score;
                coordinates.clear();
                coordinates.push((row, col));
            } else if score == best {
                coordinates.push((row, col));
            }
        }
        (best, coordinates)
    }
}

impl<S: Score> Display for ScoreMatrix<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row(row).iter().join("\t"))?;
        }
        Ok(())
    }
}
