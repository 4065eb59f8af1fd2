use ahash::AHashSet;
use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, Display, From, Into};

use crate::GAP;

/// Index of a node inside the [`super::PathGraph`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Matrix coordinate of a node: `x` is the row (position in the second sequence), `y` is the
/// column (position in the first sequence).
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Default,
    Display,
    Constructor,
    Dissolve,
    From,
    Into,
)]
#[display("({x}, {y})")]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    /// The coordinate lies on row 0 or column 0, i.e. it aligns a prefix against nothing.
    pub fn is_boundary(&self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Predecessor on the anti-diagonal band, `(x - 1, y - 1)`.
    pub fn diagonal(&self) -> Option<Self> {
        if self.x == 0 || self.y == 0 {
            None
        } else {
            Some(Self::new(self.x - 1, self.y - 1))
        }
    }
}

/// A partial alignment of two sequence prefixes. Both fragments have the same length and use
/// [`GAP`] where the corresponding sequence does not advance.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Getters, Dissolve)]
pub struct FragmentPair {
    seq1: String,
    seq2: String,
}

impl FragmentPair {
    pub fn new(seq1: String, seq2: String) -> Option<Self> {
        if seq1.len() != seq2.len() || !seq1.is_ascii() || !seq2.is_ascii() {
            return None;
        }
        Some(Self { seq1, seq2 })
    }

    /// The all-gap alignment of `symbols` against the empty prefix of the other sequence.
    pub(crate) fn padding(seq1: &[u8], seq2: &[u8]) -> Self {
        debug_assert!(seq1.is_empty() || seq2.is_empty());
        let len = seq1.len().max(seq2.len());
        let mut result = Self {
            seq1: String::with_capacity(len + 1),
            seq2: String::with_capacity(len + 1),
        };
        for symbol in seq1 {
            result.push(*symbol, GAP);
        }
        for symbol in seq2 {
            result.push(GAP, *symbol);
        }
        result
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, s1: u8, s2: u8) {
        self.seq1.push(s1 as char);
        self.seq2.push(s2 as char);
    }

    /// Copy of the pair extended by a single alignment column.
    pub fn extended(&self, s1: u8, s2: u8) -> Self {
        let mut seq1 = String::with_capacity(self.seq1.len() + 1);
        seq1.push_str(&self.seq1);
        let mut seq2 = String::with_capacity(self.seq2.len() + 1);
        seq2.push_str(&self.seq2);

        let mut result = Self { seq1, seq2 };
        result.push(s1, s2);
        result
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Number of first-sequence symbols consumed by the pair.
    pub fn seq1_consumed(&self) -> usize {
        self.seq1.bytes().filter(|x| *x != GAP).count()
    }

    /// Number of second-sequence symbols consumed by the pair.
    pub fn seq2_consumed(&self) -> usize {
        self.seq2.bytes().filter(|x| *x != GAP).count()
    }
}

/// A matrix coordinate reachable through at least one optimal transition, together with every
/// distinct partial alignment that reaches it.
///
/// Parent and child links are plain arena indices. In the pruning mode a link may point to a node
/// that was already reclaimed, use [`super::PathGraph::parents`] and
/// [`super::PathGraph::children`] to iterate over live neighbours only.
#[derive(Clone, Eq, PartialEq, Debug, Getters)]
pub struct PathNode {
    coordinate: Coordinate,
    /// Fragment pairs in insertion order
    fragments: Vec<FragmentPair>,
    #[getter(skip)]
    known: AHashSet<FragmentPair>,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
}

impl PathNode {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            fragments: Vec::new(),
            known: AHashSet::new(),
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Store the fragment pair unless an identical pair is already present.
    pub(crate) fn add_fragment(&mut self, fragment: FragmentPair) -> bool {
        debug_assert_eq!(fragment.seq1_consumed(), self.coordinate.y);
        debug_assert_eq!(fragment.seq2_consumed(), self.coordinate.x);

        if !self.known.insert(fragment.clone()) {
            return false;
        }
        self.fragments.push(fragment);
        true
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// No recorded parents: every fragment starts at the matrix origin padding.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// No recorded children: the node terminates every path that reaches it.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn x(&self) -> usize {
        self.coordinate.x
    }

    pub fn y(&self) -> usize {
        self.coordinate.y
    }
}
