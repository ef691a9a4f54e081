//! BED output for repeat runs

use crate::error::Result;
use crate::scan::{Orientation, RepeatRun, RepeatScanner};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column header written before the first record
pub const BED_HEADER: &str = "#chrom\tchromStart\tchromEnd\tname\tscore\tstrand";

/// Writes [`RepeatRun`]s as BED6 lines
///
/// The name column holds the motif as searched in that orientation, so
/// reverse-strand runs are labelled with the reverse-complemented motif.
pub struct BedWriter<W: Write> {
    writer: W,
    forward_label: String,
    reverse_label: String,
    records_written: u64,
}

impl BedWriter<BufWriter<File>> {
    /// Create (or truncate) a BED file
    pub fn create<P: AsRef<Path>>(path: P, scanner: &RepeatScanner) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), scanner)
    }
}

impl<W: Write> BedWriter<W> {
    /// Wrap a writer and emit the header line
    pub fn new(mut writer: W, scanner: &RepeatScanner) -> Result<Self> {
        writeln!(writer, "{}", BED_HEADER)?;
        Ok(Self {
            writer,
            forward_label: scanner.motif(Orientation::Forward).to_string(),
            reverse_label: scanner.motif(Orientation::Reverse).to_string(),
            records_written: 0,
        })
    }

    pub fn write_run(&mut self, run: &RepeatRun) -> Result<()> {
        let label = match run.orientation {
            Orientation::Forward => &self.forward_label,
            Orientation::Reverse => &self.reverse_label,
        };
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            run.sequence_id,
            run.start,
            run.end,
            label,
            run.score(),
            run.orientation.strand()
        )?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of run lines written so far (header excluded)
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
