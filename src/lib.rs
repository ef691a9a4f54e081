//! graphtagger - genome assembly annotation tools
//!
//! Library behind the `tel2bed` command: finds tandem runs of a telomeric
//! motif in FASTA sequences and reports them as BED intervals.
//!
//! # Features
//!
//! - Fuzzy tandem-repeat scanning of a motif and its reverse complement
//! - Single-substitution tolerance inside homopolymer stretches of the motif
//! - Streaming FASTA input, plain or gzip-compressed
//! - BED6 output and per-file run summaries
//!
//! # Example
//!
//! ```
//! use graphtagger::scan::{Orientation, RepeatScanner};
//!
//! let scanner = RepeatScanner::new("TTAGGG", 3).unwrap();
//! let runs: Vec<_> = scanner.scan("chr1", b"TTAGGGTTAGGGTTAGGGACGT").collect();
//!
//! assert_eq!(runs.len(), 1);
//! assert_eq!((runs[0].start, runs[0].end), (0, 18));
//! assert_eq!(runs[0].orientation, Orientation::Forward);
//! ```

pub mod bed;
pub mod cli;
pub mod error;
pub mod fasta;
pub mod motif;
pub mod scan;
pub mod stats;

pub use bed::BedWriter;
pub use error::{Result, TaggerError};
pub use fasta::{FastaReader, FastaRecord};
pub use motif::Motif;
pub use scan::{Orientation, RepeatRun, RepeatScanner};
pub use stats::ScanSummary;
