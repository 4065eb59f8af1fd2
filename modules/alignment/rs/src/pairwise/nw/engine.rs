use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use num::ToPrimitive;

use crate::pairwise::scoring::Scoring;
use crate::pairwise::stats::Summary;
use crate::{Alignable, Score, GAP};

use super::algo;
use super::extract::{self, Hit, Mode};
use super::graph::{PathGraph, Retention};
use super::matrix::ScoreMatrix;

// Matrices above this size make the retained graph worth a warning
const RETAIN_WARN_CELLS: usize = 1 << 20;

pub struct EngineBuilder<S: Score> {
    scoring: Scoring<S>,
    retention: Retention,
}

impl<S: Score> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self {
            scoring: Scoring::default(),
            retention: Retention::default(),
        }
    }
}

impl<S: Score> EngineBuilder<S> {
    pub fn set_scoring(mut self, scoring: Scoring<S>) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn set_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Keep the complete graph for inspection instead of pruning it during the fill.
    pub fn retain_graph(self, retain: bool) -> Self {
        self.set_retention(if retain {
            Retention::Retain
        } else {
            Retention::Prune
        })
    }

    pub fn build(self) -> Engine<S> {
        Engine {
            scoring: self.scoring,
            retention: self.retention,
        }
    }
}

/// Global (Needleman-Wunsch) aligner that keeps every optimal backtrace path.
#[derive(Clone, Debug, Getters)]
pub struct Engine<S: Score> {
    scoring: Scoring<S>,
    retention: Retention,
}

impl<S: Score> Engine<S> {
    pub fn new(scoring: Scoring<S>, retention: Retention) -> Self {
        Self { scoring, retention }
    }

    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder::default()
    }

    /// Fill the score matrix of `seq2` (rows) against `seq1` (columns) and build the path graph.
    ///
    /// Fails before any computation if a sequence is empty, contains the gap placeholder, or if
    /// the scores of the alignment may not fit into `S`.
    pub fn align<Seq1, Seq2>(&self, seq1: &Seq1, seq2: &Seq2) -> Result<Outcome<S>>
    where
        Seq1: Alignable<Symbol = u8>,
        Seq2: Alignable<Symbol = u8>,
    {
        let seq1 = Self::collect(seq1, "first")?;
        let seq2 = Self::collect(seq2, "second")?;
        self.ensure_representable(seq1.len(), seq2.len())?;

        let cells = (seq1.len() + 1) * (seq2.len() + 1);
        if self.retention == Retention::Retain && cells > RETAIN_WARN_CELLS {
            log::warn!(
                "Retaining the full path graph for a {}x{} matrix, memory usage is unbounded",
                seq2.len() + 1,
                seq1.len() + 1
            );
        }

        let mut graph = PathGraph::new(&seq1, &seq2, self.retention);
        let matrix = algo::fill(&seq1.as_slice(), &seq2.as_slice(), &self.scoring, &mut graph);

        let stats = graph.stats();
        log::debug!(
            "Filled {}x{} matrix (score {}): {} nodes created, {} pruned, {} live (peak {})",
            matrix.rows(),
            matrix.cols(),
            matrix.last(),
            stats.created(),
            stats.pruned(),
            stats.live(),
            stats.peak_live()
        );

        Ok(Outcome {
            scoring: self.scoring,
            matrix,
            graph,
        })
    }

    // Every matrix value and every tail-adjusted terminal score is a sum of at most
    // len1 + len2 column scores
    fn ensure_representable(&self, len1: usize, len2: usize) -> Result<()> {
        let step = [self.scoring.matched, self.scoring.mismatched, self.scoring.gap]
            .iter()
            .filter_map(|x| x.to_i128())
            .map(|x| x.unsigned_abs())
            .max()
            .unwrap_or(0);
        let bound = (len1 as u128 + len2 as u128)
            .checked_mul(step)
            .and_then(|x| S::from(x));
        ensure!(
            bound.is_some(),
            "Alignment scores of {len1} against {len2} symbols with {:?} overflow the score type",
            self.scoring
        );
        Ok(())
    }

    fn collect<Seq: Alignable<Symbol = u8>>(seq: &Seq, name: &str) -> Result<Vec<u8>> {
        ensure!(!seq.is_empty(), "The {name} sequence is empty");

        let symbols: Vec<u8> = (0..seq.len()).map(|x| *seq.at(x)).collect();
        ensure!(
            !symbols.contains(&GAP),
            "The {name} sequence contains the gap placeholder '{}'",
            GAP as char
        );
        Ok(symbols)
    }
}

/// Finished alignment run: the filled score matrix and the graph of optimal paths.
#[derive(Getters, Dissolve)]
pub struct Outcome<S: Score> {
    scoring: Scoring<S>,
    matrix: ScoreMatrix<S>,
    graph: PathGraph<S>,
}

impl<S: Score> Outcome<S> {
    pub fn extract(&self, mode: Mode) -> Vec<Hit<S>> {
        extract::extract(&self.graph, &self.matrix, mode, self.scoring.gap)
    }

    /// The first top-scoring full path together with its column statistics.
    pub fn best(&self) -> Option<(Hit<S>, Summary)> {
        self.extract(Mode::TopScore).into_iter().next().map(|hit| {
            let summary = Summary::from(&hit);
            (hit, summary)
        })
    }
}
