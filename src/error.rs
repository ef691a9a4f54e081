//! Error types for graphtagger

use thiserror::Error;

/// Result type alias for graphtagger operations
pub type Result<T> = std::result::Result<T, TaggerError>;

/// Main error type for graphtagger
#[derive(Error, Debug)]
pub enum TaggerError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// FASTA parsing errors
    #[error("FASTA parse error: {0}")]
    FastaParse(String),

    /// Motif was empty after trimming
    #[error("Motif must not be empty")]
    EmptyMotif,

    /// Motif contains a symbol outside the nucleotide alphabet
    #[error("Invalid motif '{motif}': unexpected symbol '{symbol}' at position {position}")]
    InvalidMotif {
        motif: String,
        symbol: char,
        position: usize,
    },

    /// Repeat threshold below one
    #[error("Minimum repeats must be at least 1, got {0}")]
    InvalidMinRepeats(usize),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File not found errors
    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl TaggerError {
    /// True for errors raised while validating scan parameters
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TaggerError::EmptyMotif
                | TaggerError::InvalidMotif { .. }
                | TaggerError::InvalidMinRepeats(_)
        )
    }
}

impl From<serde_json::Error> for TaggerError {
    fn from(err: serde_json::Error) -> Self {
        TaggerError::Serialization(err.to_string())
    }
}
