//! Command-line interface for tel2bed

use crate::bed::BedWriter;
use crate::fasta::{default_output_path, validate_fasta_path, FastaReader};
use crate::scan::{Orientation, RepeatScanner, DEFAULT_MIN_REPEATS};
use crate::stats::{RecordTally, ScanSummary};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Quick annotation of telomeric repeat runs in a FASTA file.
///
/// Both the motif and its reverse complement are searched. A single
/// substitution is tolerated inside homopolymer stretches of the motif.
#[derive(Parser, Debug, Clone)]
#[command(name = "tel2bed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input FASTA file (.fa, .fasta, .fna; may be gzipped)
    #[arg(short, long = "input_fasta")]
    pub input_fasta: PathBuf,

    /// Output BED file [default: input basename with .bed extension]
    #[arg(short, long = "output_bed")]
    pub output_bed: Option<PathBuf>,

    /// Telomeric motif to annotate, e.g. TTAGGG
    #[arg(short, long)]
    pub motif: String,

    /// Minimum number of sequential motif copies for a run to be reported
    #[arg(short = 'r', long = "min_repeats", default_value_t = DEFAULT_MIN_REPEATS)]
    pub min_repeats: usize,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Cli {
    /// Output path, derived from the input when not given
    pub fn output_path(&self) -> PathBuf {
        self.output_bed
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input_fasta))
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    execute(&cli).map(|_| ())
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();
}

fn create_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Scan every record of the input and write the BED file.
///
/// Parameters and the input path are validated before the output is created.
pub fn execute(cli: &Cli) -> Result<ScanSummary> {
    debug!("params: {:#?}", cli);

    let scanner = RepeatScanner::new(&cli.motif, cli.min_repeats)?;
    validate_fasta_path(&cli.input_fasta)?;
    let output = cli.output_path();

    let summary = scan_fasta(&scanner, &cli.input_fasta, &output, cli.no_progress)?;

    if cli.json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{}", summary.format_summary());
    }

    Ok(summary)
}

fn scan_fasta(
    scanner: &RepeatScanner,
    input: &Path,
    output: &Path,
    no_progress: bool,
) -> Result<ScanSummary> {
    info!("Reading seq records from: {}", input.display());
    let reader = FastaReader::from_path(input)?;

    info!("Writing bed to file: {}", output.display());
    let bed = BedWriter::create(output, scanner)
        .with_context(|| format!("cannot create {}", output.display()))?;

    let result = write_runs(scanner, reader, bed, input, no_progress);
    if result.is_err() {
        // A failed scan leaves no partial BED behind.
        if let Err(e) = std::fs::remove_file(output) {
            warn!("could not remove {}: {}", output.display(), e);
        }
    }
    result
}

fn write_runs<W: Write>(
    scanner: &RepeatScanner,
    reader: FastaReader,
    mut bed: BedWriter<W>,
    input: &Path,
    no_progress: bool,
) -> Result<ScanSummary> {
    let start = Instant::now();
    let mut summary = ScanSummary::new(scanner);
    let spinner = create_spinner("Scanning records...", no_progress);

    for record in reader {
        let record = record.with_context(|| format!("reading {}", input.display()))?;
        info!("Searching sequence: {}", record.id);
        spinner.set_message(format!("Scanning {}", record.id));

        let mut tally = RecordTally::default();
        for run in scanner.scan(&record.id, &record.sequence) {
            bed.write_run(&run)?;
            tally.add(&run);
        }

        if tally.forward_runs > 0 {
            info!("Fwd motif runs found: {}", tally.forward_runs);
        }
        if tally.reverse_runs > 0 {
            info!("Rev motif runs found: {}", tally.reverse_runs);
        }
        summary.add_record(record.sequence.len(), &tally);
    }

    bed.finish()?;
    spinner.finish_with_message(format!("Done in {:.2?}", start.elapsed()));

    info!(
        "Screened {} seq records for motifs: Fwd={} and Rev={}.",
        summary.records,
        scanner.motif(Orientation::Forward),
        scanner.motif(Orientation::Reverse)
    );
    info!(
        "Found {} in {} sequences.",
        summary.total_runs(),
        summary.records_with_runs
    );

    Ok(summary)
}
