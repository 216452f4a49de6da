use std::io;
use thiserror::Error;

/// Error type for VCF reading and writing.
#[derive(Error, Debug)]
pub enum VcfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Data lines were found before the `#CHROM` header line.
    #[error("VCF header line (#CHROM ...) is missing")]
    MissingHeader,

    #[error("Line {line}: expected at least {expected} tab-separated columns, found {found}")]
    TruncatedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid POS field '{value}'")]
    InvalidPosition { line: usize, value: String },

    #[error("Line {line}: invalid genotype '{value}' for sample {sample}")]
    InvalidGenotype {
        line: usize,
        sample: String,
        value: String,
    },

    #[error("Line {line}: header declares {expected} samples but the record has {found}")]
    SampleCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for VCF operations.
pub type Result<T> = std::result::Result<T, VcfError>;
