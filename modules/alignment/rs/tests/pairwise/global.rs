use eyre::Result;
use itertools::Itertools;

use nwgraph_alignment_rs::pairwise::nw::{self, Engine, Mode, Retention};
use nwgraph_alignment_rs::pairwise::{Scoring, Summary};
use nwgraph_alignment_rs::Sequence;

pub type Score = i32;

struct Workload<'a> {
    seq1: &'a str,
    seq2: &'a str,
    scoring: Scoring<Score>,
    mode: Mode,
    expected: Vec<(&'a str, &'a str, Score)>,
}

fn hits(
    engine: &Engine<Score>,
    seq1: &str,
    seq2: &str,
    mode: Mode,
) -> Result<Vec<(String, String, Score)>> {
    let outcome = engine.align(&Sequence::new(seq1)?, &Sequence::new(seq2)?)?;
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

fn ensure(w: Workload<'_>) -> Result<()> {
    let expected: Vec<_> = w
        .expected
        .iter()
        .map(|(a, b, s)| (a.to_string(), b.to_string(), *s))
        .sorted()
        .collect();
    // Swapping the inputs transposes the matrix and swaps the fragments
    let swapped: Vec<_> = expected
        .iter()
        .map(|(a, b, s)| (b.clone(), a.clone(), *s))
        .sorted()
        .collect();

    for retention in [Retention::Prune, Retention::Retain] {
        let engine = Engine::new(w.scoring, retention);
        assert_eq!(hits(&engine, w.seq1, w.seq2, w.mode)?, expected);
        assert_eq!(hits(&engine, w.seq2, w.seq1, w.mode)?, swapped);
    }
    Ok(())
}

#[test]
fn test_substitutions_only() -> Result<()> {
    ensure(Workload {
        seq1: "AAA",
        seq2: "CCC",
        scoring: Scoring::new(1, -1, -2),
        mode: Mode::TopScore,
        expected: vec![("AAA", "CCC", -3)],
    })
}

#[test]
fn test_identical() -> Result<()> {
    ensure(Workload {
        seq1: "ACGT",
        seq2: "ACGT",
        scoring: Scoring::new(1, -1, -2),
        mode: Mode::TopScore,
        expected: vec![("ACGT", "ACGT", 4)],
    })
}

#[test]
fn test_single_insertion() -> Result<()> {
    ensure(Workload {
        seq1: "AC",
        seq2: "ABC",
        scoring: Scoring::new(1, -1, -1),
        mode: Mode::TopScore,
        expected: vec![("A-C", "ABC", 1)],
    })
}

#[test]
fn test_tied_optimal_paths() -> Result<()> {
    // Deleting either of the two identical symbols is equally good
    ensure(Workload {
        seq1: "GAAT",
        seq2: "GAT",
        scoring: Scoring::new(1, -1, -1),
        mode: Mode::TopScore,
        expected: vec![("GAAT", "G-AT", 2), ("GAAT", "GA-T", 2)],
    })
}

#[test]
fn test_all_substitution_paths() -> Result<()> {
    ensure(Workload {
        seq1: "AAA",
        seq2: "CCC",
        scoring: Scoring::new(1, -1, -2),
        mode: Mode::FullPath,
        expected: vec![
            ("AAA", "CCC", -3),
            ("AAA", "-CC", -4),
            ("AAA", "C-C", -4),
            ("AAA", "CC-", -4),
            ("-AA", "CCC", -4),
            ("A-A", "CCC", -4),
            ("AA-", "CCC", -4),
            ("AAA", "--C", -5),
            ("AAA", "-C-", -5),
            ("AAA", "C--", -5),
            ("--A", "CCC", -5),
            ("-A-", "CCC", -5),
            ("A--", "CCC", -5),
        ],
    })
}

#[test]
fn test_single_symbols() -> Result<()> {
    ensure(Workload {
        seq1: "A",
        seq2: "C",
        scoring: Scoring::new(1, -1, -2),
        mode: Mode::All,
        expected: vec![("A", "C", -1)],
    })?;

    // Two gaps are cheaper than a mismatch
    ensure(Workload {
        seq1: "A",
        seq2: "C",
        scoring: Scoring::new(1, -5, -1),
        mode: Mode::TopScore,
        expected: vec![("-A", "C-", -2), ("A-", "-C", -2)],
    })
}

#[test]
fn test_degenerate_input() -> Result<()> {
    // The matrix itself is well defined for an empty sequence
    let matrix = nw::fill(
        &b"A".as_slice(),
        &b"".as_slice(),
        &Scoring::new(1, -1, -2),
        &mut nw::Silent::default(),
    );
    assert_eq!((matrix.rows(), matrix.cols()), (1, 2));
    assert_eq!(matrix.last(), -2);

    // ... but the aligner refuses to run on it
    let engine = Engine::<Score>::builder().build();
    assert!(engine.align(&b"A".as_slice(), &b"".as_slice()).is_err());
    assert!(Sequence::new("").is_err());
    Ok(())
}

#[test]
fn test_protein_report() -> Result<()> {
    let engine = Engine::<Score>::builder()
        .set_scoring(Scoring::new(2, -1, -2))
        .build();
    let outcome = engine.align(&Sequence::protein("HEAGAWGHEE")?, &Sequence::protein("PAWHEAE")?)?;

    let (hit, summary) = outcome.best().unwrap();
    assert_eq!(summary, Summary::from(&hit));

    // Every column of the reported alignment is paid exactly once
    let recomputed = 2 * *summary.matches() as Score
        - *summary.mismatches() as Score
        - 2 * summary.gaps() as Score;
    assert_eq!(recomputed, *hit.score());
    assert_eq!(*summary.length(), hit.len());
    Ok(())
}
