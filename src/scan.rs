//! Tandem repeat scanning
//!
//! [`RepeatScanner`] finds runs of a motif repeated back to back in a
//! nucleotide sequence. Each sequence is scanned twice, once for the motif
//! and once for its reverse complement, and runs are always reported in
//! forward-strand coordinates of the input.
//!
//! A window of motif length qualifies when it matches the motif exactly, or
//! with a single substitution at a tolerant motif position (see
//! [`Motif::tolerance_mask`]). Qualifying windows placed end to end extend the
//! current run; the first window that does not qualify closes it. Closed runs
//! shorter than the configured minimum are dropped.
//!
//! Results are produced lazily and can be abandoned at any item boundary.

use crate::error::{Result, TaggerError};
use crate::motif::Motif;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Default minimum number of tandem copies for a run to be reported
pub const DEFAULT_MIN_REPEATS: usize = 3;

/// Strand a run was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// Both orientations, in reporting order
    pub const ALL: [Orientation; 2] = [Orientation::Forward, Orientation::Reverse];

    /// BED strand symbol
    pub fn strand(&self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.strand())
    }
}

/// A reported tandem run of the motif
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRun {
    /// Source sequence identifier
    pub sequence_id: String,
    /// 0-based start on the forward strand
    pub start: usize,
    /// Exclusive end on the forward strand
    pub end: usize,
    /// Orientation of the matched motif
    pub orientation: Orientation,
    /// Number of motif-length windows in the run
    pub repeat_count: usize,
}

impl RepeatRun {
    /// Run length in bases
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Never true for an emitted run
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Score written to BED output (run length in bases)
    pub fn score(&self) -> usize {
        self.len()
    }
}

/// Validated scan configuration for one motif
#[derive(Debug, Clone)]
pub struct RepeatScanner {
    forward: Motif,
    reverse: Motif,
    min_repeats: usize,
}

impl RepeatScanner {
    /// Validate `motif` and `min_repeats` and prepare both orientations.
    ///
    /// Fails before any scanning on an empty motif, a motif with
    /// non-nucleotide symbols, or a threshold of zero.
    pub fn new(motif: &str, min_repeats: usize) -> Result<Self> {
        let forward = Motif::new(motif)?;
        Self::from_motif(forward, min_repeats)
    }

    /// Build a scanner from an already parsed motif
    pub fn from_motif(forward: Motif, min_repeats: usize) -> Result<Self> {
        if min_repeats == 0 {
            return Err(TaggerError::InvalidMinRepeats(min_repeats));
        }
        let reverse = forward.reverse_complement();
        Ok(Self {
            forward,
            reverse,
            min_repeats,
        })
    }

    /// Motif searched for in the given orientation
    pub fn motif(&self, orientation: Orientation) -> &Motif {
        match orientation {
            Orientation::Forward => &self.forward,
            Orientation::Reverse => &self.reverse,
        }
    }

    /// Minimum number of windows a run needs to be reported
    pub fn min_repeats(&self) -> usize {
        self.min_repeats
    }

    /// Scan both orientations; the forward pass is yielded first.
    pub fn scan<'a>(&'a self, sequence_id: &'a str, sequence: &'a [u8]) -> Scan<'a> {
        Scan {
            forward: self.scan_orientation(sequence_id, sequence, Orientation::Forward),
            reverse: self.scan_orientation(sequence_id, sequence, Orientation::Reverse),
        }
    }

    /// Scan a single orientation
    pub fn scan_orientation<'a>(
        &'a self,
        sequence_id: &'a str,
        sequence: &'a [u8],
        orientation: Orientation,
    ) -> RepeatRuns<'a> {
        RepeatRuns {
            sequence_id,
            sequence,
            motif: self.motif(orientation),
            orientation,
            min_repeats: self.min_repeats,
            pos: 0,
        }
    }
}

/// Runs from both orientations of one sequence
#[derive(Debug, Clone)]
pub struct Scan<'a> {
    forward: RepeatRuns<'a>,
    reverse: RepeatRuns<'a>,
}

impl Iterator for Scan<'_> {
    type Item = RepeatRun;

    fn next(&mut self) -> Option<RepeatRun> {
        self.forward.next().or_else(|| self.reverse.next())
    }
}

impl FusedIterator for Scan<'_> {}

/// Runs from a single orientation pass, in ascending start order
#[derive(Debug, Clone)]
pub struct RepeatRuns<'a> {
    sequence_id: &'a str,
    sequence: &'a [u8],
    motif: &'a Motif,
    orientation: Orientation,
    min_repeats: usize,
    pos: usize,
}

impl RepeatRuns<'_> {
    fn fits(&self, pos: usize) -> bool {
        pos + self.motif.len() <= self.sequence.len()
    }

    fn window_matches(&self, pos: usize) -> bool {
        let window = &self.sequence[pos..pos + self.motif.len()];
        let mut tolerated = false;

        for ((&observed, &expected), &tolerant) in window
            .iter()
            .zip(self.motif.as_bytes())
            .zip(self.motif.tolerance_mask())
        {
            let observed = observed.to_ascii_uppercase();
            let is_base = matches!(observed, b'A' | b'C' | b'G' | b'T');
            if is_base && observed == expected {
                continue;
            }
            if is_base && tolerant && !tolerated {
                tolerated = true;
                continue;
            }
            return false;
        }

        true
    }
}

impl Iterator for RepeatRuns<'_> {
    type Item = RepeatRun;

    fn next(&mut self) -> Option<RepeatRun> {
        let width = self.motif.len();

        while self.fits(self.pos) {
            if !self.window_matches(self.pos) {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let mut repeat_count = 1;
            let mut next = start + width;
            while self.fits(next) && self.window_matches(next) {
                repeat_count += 1;
                next += width;
            }

            // The window at `next`, if any, is known not to qualify.
            self.pos = if self.fits(next) { next + 1 } else { next };

            if repeat_count >= self.min_repeats {
                return Some(RepeatRun {
                    sequence_id: self.sequence_id.to_string(),
                    start,
                    end: start + repeat_count * width,
                    orientation: self.orientation,
                    repeat_count,
                });
            }
        }

        None
    }
}

impl FusedIterator for RepeatRuns<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::reverse_complement;

    fn scanner(motif: &str, min_repeats: usize) -> RepeatScanner {
        RepeatScanner::new(motif, min_repeats).unwrap()
    }

    fn intervals(runs: impl Iterator<Item = RepeatRun>) -> Vec<(usize, usize)> {
        runs.map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_exact_tandem_run() {
        let s = scanner("TTAGGG", 3);
        let runs: Vec<_> = s.scan("chr1", b"TTAGGGTTAGGGTTAGGGACGT").collect();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].sequence_id, "chr1");
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[0].end, 18);
        assert_eq!(runs[0].repeat_count, 3);
        assert_eq!(runs[0].orientation, Orientation::Forward);
    }

    #[test]
    fn test_tolerated_homopolymer_mismatch() {
        let s = scanner("TTAGGG", 3);
        let runs: Vec<_> = s.scan("chr1", b"TTAGGGTTAGCGTTAGGG").collect();

        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].start, runs[0].end), (0, 18));
        assert_eq!(runs[0].repeat_count, 3);
        assert_eq!(runs[0].orientation, Orientation::Forward);
    }

    #[test]
    fn test_mismatch_outside_homopolymer_breaks_run() {
        let s = scanner("TTAGGG", 3);
        assert_eq!(s.scan("chr1", b"TTAGGGTTACGGTTAGGG").count(), 0);

        // Both fragments are found once the threshold allows single copies
        let s = scanner("TTAGGG", 1);
        let fwd = intervals(s.scan_orientation("chr1", b"TTAGGGTTACGGTTAGGG", Orientation::Forward));
        assert_eq!(fwd, vec![(0, 6), (12, 18)]);
    }

    #[test]
    fn test_sequence_shorter_than_motif() {
        let s = scanner("TTAGGG", 3);
        assert_eq!(s.scan("chr1", b"TTAGG").count(), 0);
        assert_eq!(s.scan("chr1", b"").count(), 0);
    }

    #[test]
    fn test_configuration_errors() {
        let err = RepeatScanner::new("", 3).unwrap_err();
        assert!(matches!(err, TaggerError::EmptyMotif));
        assert!(err.is_configuration());

        assert!(matches!(
            RepeatScanner::new("TTAGGG", 0),
            Err(TaggerError::InvalidMinRepeats(0))
        ));
        assert!(matches!(
            RepeatScanner::new("TTA-GG", 3),
            Err(TaggerError::InvalidMotif { .. })
        ));
    }

    #[test]
    fn test_reverse_orientation() {
        let s = scanner("TTAGGG", 3);
        let seq = b"ACCCCTAACCCTAACCCTAAGT";
        let runs: Vec<_> = s.scan("chr1", seq).collect();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].orientation, Orientation::Reverse);
        assert_eq!((runs[0].start, runs[0].end), (2, 20));
        assert_eq!(runs[0].repeat_count, 3);
    }

    #[test]
    fn test_forward_pass_reported_first() {
        let s = scanner("TTAGGG", 2);
        let seq = b"CCCTAACCCTAAGGGGTTAGGGTTAGGG";
        let runs: Vec<_> = s.scan("chr1", seq).collect();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].orientation, Orientation::Forward);
        assert_eq!((runs[0].start, runs[0].end), (16, 28));
        assert_eq!(runs[1].orientation, Orientation::Reverse);
        assert_eq!((runs[1].start, runs[1].end), (0, 12));
    }

    #[test]
    fn test_lowercase_sequence() {
        let s = scanner("TTAGGG", 3);
        let runs: Vec<_> = s.scan("chr1", b"ttagggttagggttaggg").collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].repeat_count, 3);
    }

    #[test]
    fn test_ambiguous_base_never_tolerated() {
        let s = scanner("TTAGGG", 3);
        // N sits on the tolerant position of the second copy
        assert_eq!(s.scan("chr1", b"TTAGGGTTAGNGTTAGGG").count(), 0);
    }

    #[test]
    fn test_one_tolerated_mismatch_per_window() {
        let s = scanner("AAAAAC", 2);
        assert_eq!(
            intervals(s.scan_orientation("s", b"AAAAACATAAAC", Orientation::Forward)),
            vec![(0, 12)]
        );
        assert_eq!(
            s.scan_orientation("s", b"AAAAACATTAAC", Orientation::Forward)
                .count(),
            0
        );
    }

    #[test]
    fn test_tolerated_windows_accumulate_within_run() {
        let s = scanner("TTAGGG", 3);
        let runs: Vec<_> = s
            .scan("chr1", b"TTAGCGTTAGTGTTAGAGTTAGGG")
            .collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].repeat_count, 4);
        assert_eq!(runs[0].end, 24);
    }

    #[test]
    fn test_longest_run_is_greedy() {
        let s = scanner("TTAGGG", 3);
        let mut seq = b"GA".to_vec();
        for _ in 0..10 {
            seq.extend_from_slice(b"TTAGGG");
        }
        let runs: Vec<_> = s.scan("chr1", &seq).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].start, runs[0].end), (2, 62));
        assert_eq!(runs[0].repeat_count, 10);
    }

    #[test]
    fn test_scan_is_repeatable() {
        let s = scanner("TTAGGG", 2);
        let seq = b"TTAGGGTTAGGGACCCCTAACCCTAACCCTAATTAGGGTTAGCG";
        let first: Vec<_> = s.scan("chr1", seq).collect();
        let second: Vec<_> = s.scan("chr1", seq).collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_runs_never_overlap_within_orientation() {
        let s = scanner("TTAGGG", 1);
        let seq = b"TTAGGGTTAGGGGTTAGGGTTAGGTTAGGGTTTAGGGTTAGGGCCCTAACCCTAA";
        for orientation in Orientation::ALL {
            let runs: Vec<_> = s.scan_orientation("chr1", seq, orientation).collect();
            for pair in runs.windows(2) {
                assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn test_threshold_monotonicity() {
        let seq = b"TTAGGGTTAGGGTTAGGGGTTAGGGTTAGGGCCCTAACCCTAACCCTAACCCTAAATTAGGG";
        let counts: Vec<usize> = (1..=6)
            .map(|k| scanner("TTAGGG", k).scan("chr1", seq).count())
            .collect();
        for pair in counts.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(counts[0] > 0);
    }

    #[test]
    fn test_coordinates_match_repeat_count() {
        let s = scanner("TTAGGG", 2);
        let seq = b"TTAGGGTTAGGGTTAGGGGTTAGGGTTAGGGCCCTAACCCTAACCCTAACCCTAA";
        let runs: Vec<_> = s.scan("chr1", seq).collect();
        assert!(!runs.is_empty());
        for run in runs {
            assert_eq!(run.end - run.start, run.repeat_count * 6);
            assert!(run.repeat_count >= 2);
            assert_eq!(run.score(), run.len());
        }
    }

    #[test]
    fn test_orientation_symmetry() {
        let s = scanner("TTAGGG", 3);
        let seq = b"GATCTTAGGGTTAGGGTTAGGGTTAGCGAC";
        let rc = reverse_complement(seq);
        let n = seq.len();

        let forward = intervals(s.scan_orientation("chr1", seq, Orientation::Forward));
        let mirrored: Vec<(usize, usize)> = intervals(
            s.scan_orientation("chr1", &rc, Orientation::Reverse),
        )
        .into_iter()
        .map(|(start, end)| (n - end, n - start))
        .rev()
        .collect();

        assert_eq!(forward, vec![(4, 28)]);
        assert_eq!(forward, mirrored);
    }

    #[test]
    fn test_self_overlapping_motif_is_anchored_left() {
        // Both passes extend left to right, so a periodic motif that does not
        // tile the sequence exactly lands on different phases per strand.
        let s = scanner("AAA", 1);
        let seq = b"AAAA";
        let rc = reverse_complement(seq);

        let forward = intervals(s.scan_orientation("s", seq, Orientation::Forward));
        let reverse = intervals(s.scan_orientation("s", &rc, Orientation::Reverse));
        let mirrored: Vec<(usize, usize)> = reverse
            .into_iter()
            .map(|(start, end)| (seq.len() - end, seq.len() - start))
            .collect();

        assert_eq!(forward, vec![(0, 3)]);
        assert_eq!(mirrored, vec![(1, 4)]);
    }

    #[test]
    fn test_truncated_consumption() {
        let s = scanner("TTAGGG", 1);
        let seq = b"TTAGGGACTTAGGGACTTAGGG";
        let mut runs = s.scan("chr1", seq);
        let first = runs.next().unwrap();
        assert_eq!((first.start, first.end), (0, 6));
        drop(runs);

        let all: Vec<_> = s.scan("chr1", seq).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], first);
    }

    #[test]
    fn test_orientation_display() {
        assert_eq!(format!("{}", Orientation::Forward), "+");
        assert_eq!(format!("{}", Orientation::Reverse), "-");
    }
}
