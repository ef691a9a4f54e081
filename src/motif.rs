//! Repeat motifs
//!
//! A [`Motif`] is the short nucleotide unit searched for in tandem, such as the
//! vertebrate telomeric repeat `TTAGGG`. Motifs are validated and upper-cased
//! once, and carry a precomputed tolerance mask marking the positions where a
//! single substitution is accepted while scanning.

use crate::error::{Result, TaggerError};
use std::fmt;

/// Symbols accepted in a motif (IUPAC nucleotide codes, upper-case)
const MOTIF_ALPHABET: &[u8] = b"ACGTUNRYSWKMBDHV";

/// Complement of an upper-case IUPAC nucleotide symbol
fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        other => other,
    }
}

/// Reverse complement of a nucleotide byte string
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&b| complement(b.to_ascii_uppercase()))
        .collect()
}

/// A validated, upper-case nucleotide motif
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    bases: Vec<u8>,
    tolerant: Vec<bool>,
}

impl Motif {
    /// Parse and validate a motif string
    ///
    /// Surrounding whitespace is ignored and lower-case input is accepted.
    /// `U` is stored as `T`.
    pub fn new(motif: &str) -> Result<Self> {
        let trimmed = motif.trim();
        if trimmed.is_empty() {
            return Err(TaggerError::EmptyMotif);
        }

        let mut bases = Vec::with_capacity(trimmed.len());
        for (position, symbol) in trimmed.chars().enumerate() {
            let upper = symbol.to_ascii_uppercase();
            if !upper.is_ascii() || !MOTIF_ALPHABET.contains(&(upper as u8)) {
                return Err(TaggerError::InvalidMotif {
                    motif: trimmed.to_string(),
                    symbol,
                    position,
                });
            }
            bases.push(if upper == 'U' { b'T' } else { upper as u8 });
        }

        Ok(Self::from_validated(bases))
    }

    fn from_validated(bases: Vec<u8>) -> Self {
        let tolerant = tolerance_mask(&bases);
        Self { bases, tolerant }
    }

    /// The reverse complement of this motif, with its own tolerance mask
    pub fn reverse_complement(&self) -> Motif {
        Self::from_validated(reverse_complement(&self.bases))
    }

    /// Motif symbols
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Per-position flags: `true` where a single substitution is tolerated
    pub fn tolerance_mask(&self) -> &[bool] {
        &self.tolerant
    }

    /// Motif length in bases
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always false for a validated motif
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Validated motifs are ASCII.
        write!(f, "{}", String::from_utf8_lossy(&self.bases))
    }
}

impl std::str::FromStr for Motif {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        Motif::new(s)
    }
}

/// Mark interior positions of homopolymer stretches.
///
/// Position `i` is tolerant when both `bases[i - 1]` and `bases[i + 1]` equal
/// `bases[i]`, so only stretches of three or more identical symbols contribute
/// and the mask of a reverse complement is the mirror of the original's.
fn tolerance_mask(bases: &[u8]) -> Vec<bool> {
    (0..bases.len())
        .map(|i| {
            i > 0
                && i + 1 < bases.len()
                && bases[i - 1] == bases[i]
                && bases[i + 1] == bases[i]
        })
        .collect()
}
