use crate::GAP;

/// `Op` classifies a single column of a global alignment.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Op {
    /// Gap placeholder in the first fragment, the second sequence advances (v)
    GapFirst,
    /// Gap placeholder in the second fragment, the first sequence advances (^)
    GapSecond,
    /// Identical symbols in both sequences (=)
    Match,
    /// Different symbols in both sequences (X)
    Mismatch,
}

impl Op {
    /// Classify an alignment column. Returns `None` for a column made of two gaps, which never
    /// appears in a well-formed alignment.
    pub fn classify(a: u8, b: u8) -> Option<Self> {
        match (a == GAP, b == GAP) {
            (true, true) => None,
            (true, false) => Some(Op::GapFirst),
            (false, true) => Some(Op::GapSecond),
            (false, false) if a == b => Some(Op::Match),
            (false, false) => Some(Op::Mismatch),
        }
    }

    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::GapFirst => 'v',
            Op::GapSecond => '^',
            Op::Match => '=',
            Op::Mismatch => 'X',
        }
    }
}
