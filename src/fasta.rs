//! FASTA input
//!
//! Streams `(id, sequence)` records from plain or compressed FASTA files
//! without holding more than one record in memory. Parsing and
//! decompression (including multi-member bgzip) are handled by needletail.

use crate::error::{Result, TaggerError};
use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_file, parse_fastx_reader, FastxReader};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Recognised FASTA extensions (optionally followed by `.gz`)
pub const FASTA_EXTENSIONS: &[&str] = &["fa", "fasta", "fna"];

/// A single FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header text up to the first whitespace
    pub id: String,
    /// Remainder of the header line, if any
    pub description: Option<String>,
    /// Sequence with line breaks removed
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    fn from_header(header: &[u8], sequence: Vec<u8>) -> Result<Self> {
        let header = String::from_utf8_lossy(header);
        let header = header.trim();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => {
                let rest = rest.trim();
                (id, (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (header, None),
        };

        if id.is_empty() {
            return Err(TaggerError::FastaParse(
                "Record header has no identifier".to_string(),
            ));
        }

        Ok(Self {
            id: id.to_string(),
            description,
            sequence,
        })
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"))
}

/// Check that `path` exists and carries a FASTA extension
pub fn validate_fasta_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TaggerError::FileNotFound(path.display().to_string()));
    }

    let inner = if is_gzipped(path) {
        Path::new(path.file_stem().unwrap_or_default())
    } else {
        path
    };

    let valid = inner
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            FASTA_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

    if valid {
        Ok(())
    } else {
        Err(TaggerError::InvalidInput(format!(
            "Invalid file extension for '{}'. Supported extensions are .{}, optionally followed by .gz",
            path.display(),
            FASTA_EXTENSIONS.join(", .")
        )))
    }
}

/// Output path used when none is given: `genome.fa.gz` becomes `genome.bed`
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let base = if is_gzipped(input) {
        input.with_extension("")
    } else {
        input.to_path_buf()
    };
    base.with_extension("bed")
}

fn parse_error(err: ParseError) -> TaggerError {
    TaggerError::FastaParse(err.to_string())
}

/// Streaming FASTA records
///
/// An empty input yields no records rather than an error.
pub struct FastaReader {
    inner: Option<Box<dyn FastxReader>>,
}

impl FastaReader {
    fn from_parsed(
        parsed: std::result::Result<Box<dyn FastxReader>, ParseError>,
    ) -> Result<Self> {
        match parsed {
            Ok(reader) => Ok(Self {
                inner: Some(reader),
            }),
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(Self { inner: None }),
            Err(e) => Err(parse_error(e)),
        }
    }

    /// Open a FASTA file; compression is detected from the content
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TaggerError::FileNotFound(path.display().to_string()));
        }
        Self::from_parsed(parse_fastx_file(path))
    }

    /// Parse FASTA from any reader, e.g. an in-memory buffer
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Result<Self> {
        Self::from_parsed(parse_fastx_reader(reader))
    }
}

impl Iterator for FastaReader {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.inner.as_mut()?;
        let item = match reader.next()? {
            Ok(record) => FastaRecord::from_header(record.id(), record.seq().into_owned()),
            Err(e) => Err(parse_error(e)),
        };
        if item.is_err() {
            self.inner = None;
        }
        Some(item)
    }
}
