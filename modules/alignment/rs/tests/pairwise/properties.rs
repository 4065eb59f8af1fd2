use eyre::Result;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use nwgraph_alignment_rs::pairwise::nw::{self, Branches, Engine, Mode, Retention, Tracer};
use nwgraph_alignment_rs::pairwise::Scoring;
use nwgraph_alignment_rs::{Sequence, GAP};

pub type Score = i32;

const SCORINGS: &[(Score, Score, Score)] = &[
    (1, -1, -2),
    (1, -1, -1),
    (2, -1, -1),
    (1, 0, 0),
    (1, -3, -1),
];

fn sequences(seed: u64, count: usize, alphabet: &[u8]) -> Vec<Sequence> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=7);
            let raw: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
                .collect();
            Sequence::new(&raw).unwrap()
        })
        .collect()
}

fn workload() -> Vec<(Sequence, Sequence)> {
    let mut result = Vec::new();
    for (seed, alphabet) in [(7u64, b"AC".as_slice()), (42, b"ACGT"), (1337, b"AG")] {
        let seqs = sequences(seed, 8, alphabet);
        result.extend(seqs.into_iter().tuples());
    }
    result.push((Sequence::new("AAAA").unwrap(), Sequence::new("AA").unwrap()));
    result.push((Sequence::new("ACACAC").unwrap(), Sequence::new("CACA").unwrap()));
    result
}

fn hits(
    engine: &Engine<Score>,
    seq1: &Sequence,
    seq2: &Sequence,
    mode: Mode,
) -> Result<Vec<(String, String, Score)>> {
    let outcome = engine.align(seq1, seq2)?;
    Ok(outcome
        .extract(mode)
        .into_iter()
        .map(|x| {
            let (seq1, seq2, score, _) = x.dissolve();
            (seq1, seq2, score)
        })
        .sorted()
        .collect())
}

#[derive(Default)]
struct Recorder {
    cells: Vec<(usize, usize, Score, Branches)>,
}

impl Tracer for Recorder {
    type Score = Score;

    fn cell(&mut self, row: usize, col: usize, score: Score, branches: Branches) {
        self.cells.push((row, col, score, branches));
    }
}

#[test]
fn test_matrix_recurrence() {
    for (seq1, seq2) in workload() {
        for &(matched, mismatched, gap) in SCORINGS {
            let scoring = Scoring::new(matched, mismatched, gap);
            let mut recorder = Recorder::default();
            let matrix = nw::fill(&seq1.as_bytes(), &seq2.as_bytes(), &scoring, &mut recorder);

            for k in 0..matrix.cols() {
                assert_eq!(matrix.at(0, k), k as Score * gap);
            }
            for k in 0..matrix.rows() {
                assert_eq!(matrix.at(k, 0), k as Score * gap);
            }

            assert_eq!(recorder.cells.len(), seq1.as_bytes().len() * seq2.as_bytes().len());
            for (i, j, score, branches) in recorder.cells {
                let (s1, s2) = (seq1.symbol(j).unwrap(), seq2.symbol(i).unwrap());
                let diagonal = matrix.at(i - 1, j - 1) + scoring.symbols(&s1, &s2);
                let horizontal = matrix.at(i, j - 1) + gap;
                let vertical = matrix.at(i - 1, j) + gap;
                let best = diagonal.max(horizontal).max(vertical);

                assert_eq!(matrix.at(i, j), best);
                assert_eq!(score, best);
                assert_eq!(branches.contains(Branches::DIAGONAL), diagonal == best);
                assert_eq!(branches.contains(Branches::HORIZONTAL), horizontal == best);
                assert_eq!(branches.contains(Branches::VERTICAL), vertical == best);
            }
        }
    }
}

#[test]
fn test_fragments_are_prefix_alignments() -> Result<()> {
    for (seq1, seq2) in workload() {
        for &(matched, mismatched, gap) in SCORINGS {
            let engine = Engine::new(Scoring::new(matched, mismatched, gap), Retention::Prune);
            let outcome = engine.align(&seq1, &seq2)?;

            for hit in outcome.extract(Mode::All) {
                assert_eq!(hit.seq1().len(), hit.seq2().len());
                assert!(hit
                    .seq1()
                    .bytes()
                    .zip(hit.seq2().bytes())
                    .all(|(a, b)| a != GAP || b != GAP));

                let stripped1: String = hit.seq1().chars().filter(|x| *x != GAP as char).collect();
                let stripped2: String = hit.seq2().chars().filter(|x| *x != GAP as char).collect();
                // Fragments always start at the origin and end at their terminal
                assert_eq!(stripped1, seq1.as_str()[..hit.end().y]);
                assert_eq!(stripped2, seq2.as_str()[..hit.end().x]);
                assert_eq!(*hit.score(), outcome.matrix().at(hit.end().x, hit.end().y));
            }
        }
    }
    Ok(())
}

#[test]
fn test_extraction_is_idempotent() -> Result<()> {
    for (seq1, seq2) in workload() {
        let engine = Engine::new(Scoring::new(1, -1, -1), Retention::Prune);
        let outcome = engine.align(&seq1, &seq2)?;
        for mode in [Mode::All, Mode::FullPath, Mode::TopScore] {
            assert_eq!(outcome.extract(mode), outcome.extract(mode));
        }
    }
    Ok(())
}

#[test]
fn test_pruning_is_equivalent_to_retention() -> Result<()> {
    for (seq1, seq2) in workload() {
        for &(matched, mismatched, gap) in SCORINGS {
            let scoring = Scoring::new(matched, mismatched, gap);
            let pruned = Engine::new(scoring, Retention::Prune);
            let retained = Engine::new(scoring, Retention::Retain);

            for mode in [Mode::TopScore, Mode::FullPath, Mode::All] {
                assert_eq!(
                    hits(&pruned, &seq1, &seq2, mode)?,
                    hits(&retained, &seq1, &seq2, mode)?,
                    "{seq1} vs {seq2}, mode {mode}, scoring {scoring:?}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_top_score_always_reaches_the_corner() -> Result<()> {
    for (seq1, seq2) in workload() {
        for &(matched, mismatched, gap) in SCORINGS {
            let engine = Engine::new(Scoring::new(matched, mismatched, gap), Retention::Prune);
            let outcome = engine.align(&seq1, &seq2)?;
            let corner = (outcome.matrix().rows() - 1, outcome.matrix().cols() - 1);

            let hits = outcome.extract(Mode::TopScore);
            assert!(hits.iter().any(|x| (x.end().x, x.end().y) == corner));
            for hit in hits {
                let tail = (corner.0 - hit.end().x) + (corner.1 - hit.end().y);
                assert_eq!(*hit.score() + gap * tail as Score, outcome.matrix().last());
            }
        }
    }
    Ok(())
}

#[test]
fn test_pruned_graph_is_smaller() -> Result<()> {
    let (seq1, seq2) = (Sequence::new("ACGTACGTACGT")?, Sequence::new("TGCATGCATGCA")?);
    let scoring = Scoring::new(1, -1, -1);

    let pruned = Engine::new(scoring, Retention::Prune).align(&seq1, &seq2)?;
    let retained = Engine::new(scoring, Retention::Retain).align(&seq1, &seq2)?;

    assert!(pruned.graph().len() < retained.graph().len());
    assert!(pruned.graph().stats().peak_live() < retained.graph().stats().peak_live());
    assert!(retained.graph().render().lines().count() > 1);
    Ok(())
}

#[test]
fn test_render_lists_every_live_node() -> Result<()> {
    for (seq1, seq2) in workload() {
        for retention in [Retention::Prune, Retention::Retain] {
            let outcome = Engine::new(Scoring::new(1, -1, -1), retention).align(&seq1, &seq2)?;
            let graph = outcome.graph();

            let rendered = graph.render();
            for (_, node) in graph.nodes() {
                let label = format!("{} [", node.coordinate());
                assert!(rendered.contains(&label), "{seq1} vs {seq2}: {label} is missing");
            }
            assert!(graph.roots().all(|(_, node)| node.is_root()));
        }
    }
    Ok(())
}
