//! tel2bed - annotate telomeric repeat runs in a FASTA file

use graphtagger::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
