use std::fmt::Display;

use derive_more::Into;
use eyre::{ensure, eyre, Result};

use crate::alignable::Alignable;

/// Placeholder symbol used in aligned fragments for a position that does not advance a sequence.
pub const GAP: u8 = b'-';

/// One-letter codes of the 20 standard amino acids.
pub const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// An immutable, normalized sequence of upper-case ASCII symbols.
///
/// Alignment coordinates are 1-based: position 0 is reserved for the empty prefix that precedes
/// the first symbol. Use [`Sequence::symbol`] for 1-based access and [`Alignable::at`] for
/// 0-based access.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Into)]
pub struct Sequence {
    symbols: Vec<u8>,
}

impl Sequence {
    /// Normalize the raw input (drop whitespace, upper-case letters) and validate it.
    pub fn new(raw: &str) -> Result<Self> {
        let symbols = Self::normalize(raw);
        ensure!(!symbols.is_empty(), "Sequence must contain at least one symbol");

        for (ind, symbol) in symbols.iter().enumerate() {
            ensure!(
                *symbol != GAP,
                "Gap placeholder '{}' is not allowed in input sequences (position {})",
                GAP as char,
                ind + 1
            );
            if !symbol.is_ascii_uppercase() {
                return Err(eyre!(
                    "Unsupported symbol '{}' at position {}",
                    symbol.escape_ascii(),
                    ind + 1
                ));
            }
        }
        Ok(Self { symbols })
    }

    /// Same as [`Sequence::new`], but restricted to the standard amino-acid alphabet.
    pub fn protein(raw: &str) -> Result<Self> {
        let sequence = Self::new(raw)?;
        if let Some(pos) = sequence.symbols.iter().position(|x| !AMINO_ACIDS.contains(x)) {
            return Err(eyre!(
                "Symbol '{}' at position {} is not a standard amino acid",
                sequence.symbols[pos] as char,
                pos + 1
            ));
        }
        Ok(sequence)
    }

    fn normalize(raw: &str) -> Vec<u8> {
        raw.bytes()
            .filter(|x| !x.is_ascii_whitespace())
            .map(|x| x.to_ascii_uppercase())
            .collect()
    }

    /// Symbol at the given 1-based position. Returns `None` for the sentinel position 0 and for
    /// positions past the end of the sequence.
    pub fn symbol(&self, pos: usize) -> Option<u8> {
        if pos == 0 {
            None
        } else {
            self.symbols.get(pos - 1).copied()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters pass validation
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl Alignable for Sequence {
    type Symbol = u8;

    #[inline(always)]
    fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        &self.symbols[pos]
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.symbols
    }
}

impl TryFrom<&str> for Sequence {
    type Error = eyre::Report;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl std::str::FromStr for Sequence {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
