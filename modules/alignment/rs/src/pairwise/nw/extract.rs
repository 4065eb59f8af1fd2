use std::fmt::Display;
use std::str::FromStr;

use ahash::AHashSet;
use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Report, Result};

use crate::pairwise::Op;
use crate::Score;

use super::graph::{Coordinate, FragmentPair, PathGraph};
use super::matrix::ScoreMatrix;

/// Selection policy applied to the fragment pairs stored at the graph terminals.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Mode {
    /// Every fragment pair at every terminal.
    All,
    /// Fragment pairs spanning at least one of the input sequences completely.
    FullPath,
    /// Full paths ending where the best last-row/last-column score is achieved.
    #[default]
    TopScore,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::FullPath => "full_path",
            Mode::TopScore => "top_score",
        }
    }
}

impl FromStr for Mode {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Mode::All),
            "full_path" | "full_paths" => Ok(Mode::FullPath),
            "top_score" => Ok(Mode::TopScore),
            _ => Err(eyre!(
                "Unknown mode {s:?}, expected one of: all, full_path, top_score"
            )),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A qualifying alignment: the fragment pair, the matrix score at its terminal and the terminal
/// coordinate itself.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Getters, Dissolve)]
pub struct Hit<S: Score> {
    seq1: String,
    seq2: String,
    score: S,
    end: Coordinate,
}

impl<S: Score> Hit<S> {
    pub fn new(fragment: &FragmentPair, score: S, end: Coordinate) -> Self {
        Self {
            seq1: fragment.seq1().clone(),
            seq2: fragment.seq2().clone(),
            score,
            end,
        }
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Column-by-column operation string, see [`Op::symbol`].
    pub fn ops(&self) -> String {
        self.seq1
            .bytes()
            .zip(self.seq2.bytes())
            .map(|(a, b)| Op::classify(a, b).map_or(' ', |op| op.symbol()))
            .collect()
    }
}

impl<S: Score> Display for Hit<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.seq1)?;
        writeln!(f, "{}", self.ops())?;
        writeln!(f, "{}", self.seq2)?;
        write!(f, "score: {}", self.score)
    }
}

// Either side of the pair covers its whole sequence.
// TODO: global alignments arguably need both sides; switch to AND once callers confirm it.
fn is_full(fragment: &FragmentPair, len1: usize, len2: usize) -> bool {
    fragment.seq1_consumed() == len1 || fragment.seq2_consumed() == len2
}

/// Collect the fragment pairs stored at the graph terminals (live nodes without children) that
/// satisfy `mode`. Scores are read from `matrix` at the terminal coordinate. Hits are grouped by
/// terminal, in node creation order.
pub fn extract<S: Score>(
    graph: &PathGraph<S>,
    matrix: &ScoreMatrix<S>,
    mode: Mode,
    gap: S,
) -> Vec<Hit<S>> {
    let (len1, len2) = (graph.seq1().len(), graph.seq2().len());
    debug_assert_eq!((matrix.rows(), matrix.cols()), (len2 + 1, len1 + 1));

    let best: AHashSet<Coordinate> = match mode {
        Mode::TopScore => matrix
            .best_terminals(gap)
            .1
            .into_iter()
            .map(Coordinate::from)
            .collect(),
        Mode::All | Mode::FullPath => AHashSet::new(),
    };

    let mut hits = Vec::new();
    for (_, node) in graph.terminals() {
        let end = *node.coordinate();
        if mode == Mode::TopScore && !best.contains(&end) {
            continue;
        }

        let score = matrix.at(end.x, end.y);
        for fragment in node.fragments() {
            let qualifies = match mode {
                Mode::All => true,
                Mode::FullPath | Mode::TopScore => is_full(fragment, len1, len2),
            };
            if qualifies {
                hits.push(Hit::new(fragment, score, end));
            }
        }
    }
    hits
}
