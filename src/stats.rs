//! Summary counters for a scan over many records

use crate::scan::{Orientation, RepeatRun, RepeatScanner};
use serde::{Deserialize, Serialize};

/// Totals accumulated while scanning a FASTA file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Motif searched on the forward strand
    pub motif: String,
    /// Reverse-complemented motif
    pub reverse_motif: String,
    /// Minimum number of tandem copies reported
    pub min_repeats: usize,
    /// Records screened
    pub records: u64,
    /// Records with at least one run in either orientation
    pub records_with_runs: u64,
    /// Total bases screened
    pub total_bases: u64,
    /// Runs found with the forward motif
    pub forward_runs: u64,
    /// Runs found with the reverse-complemented motif
    pub reverse_runs: u64,
    /// Bases covered by reported runs (both orientations)
    pub run_bases: u64,
}

/// Per-record tally, folded into a [`ScanSummary`] once the record is done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordTally {
    pub forward_runs: u64,
    pub reverse_runs: u64,
    pub run_bases: u64,
}

impl RecordTally {
    pub fn add(&mut self, run: &RepeatRun) {
        match run.orientation {
            Orientation::Forward => self.forward_runs += 1,
            Orientation::Reverse => self.reverse_runs += 1,
        }
        self.run_bases += run.len() as u64;
    }

    pub fn total_runs(&self) -> u64 {
        self.forward_runs + self.reverse_runs
    }
}

impl ScanSummary {
    pub fn new(scanner: &RepeatScanner) -> Self {
        Self {
            motif: scanner.motif(Orientation::Forward).to_string(),
            reverse_motif: scanner.motif(Orientation::Reverse).to_string(),
            min_repeats: scanner.min_repeats(),
            ..Default::default()
        }
    }

    /// Fold one finished record into the totals
    pub fn add_record(&mut self, sequence_len: usize, tally: &RecordTally) {
        self.records += 1;
        self.total_bases += sequence_len as u64;
        if tally.total_runs() > 0 {
            self.records_with_runs += 1;
        }
        self.forward_runs += tally.forward_runs;
        self.reverse_runs += tally.reverse_runs;
        self.run_bases += tally.run_bases;
    }

    pub fn total_runs(&self) -> u64 {
        self.forward_runs + self.reverse_runs
    }

    /// Format the summary as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut output = String::new();
        output.push_str("=== Telomeric Repeat Scan ===\n\n");

        output.push_str(&format!("Motif (fwd):             {:>12}\n", self.motif));
        output.push_str(&format!(
            "Motif (rev):             {:>12}\n",
            self.reverse_motif
        ));
        output.push_str(&format!(
            "Minimum repeats:         {:>12}\n",
            self.min_repeats
        ));
        output.push('\n');

        output.push_str(&format!("Records screened:        {:>12}\n", self.records));
        output.push_str(&format!(
            "Records with runs:       {:>12}\n",
            self.records_with_runs
        ));
        output.push_str(&format!(
            "Bases screened:          {:>12} bp\n",
            self.total_bases
        ));
        output.push('\n');

        output.push_str(&format!(
            "Forward runs:            {:>12}\n",
            self.forward_runs
        ));
        output.push_str(&format!(
            "Reverse runs:            {:>12}\n",
            self.reverse_runs
        ));
        output.push_str(&format!(
            "Bases in runs:           {:>12} bp\n",
            self.run_bases
        ));

        output
    }

    /// Export the summary as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
