use thiserror::Error;

use vargraph_store::StoreError;
use vargraph_vcf::VcfError;

/// Error type for variant and annotation imports. Every variant stops the run.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Non-diploid or structurally invalid genotype.
    #[error("{sample}: {locus} has malformed genotype ({genotype}): {reason}")]
    MalformedGenotype {
        sample: String,
        locus: String,
        genotype: String,
        reason: String,
    },

    /// A diploid genotype that matches none of the supported zygosity patterns.
    #[error("{sample}: inheritance unknown for {locus} ({genotype})")]
    UnknownInheritance {
        sample: String,
        locus: String,
        genotype: String,
    },

    /// A genotype column for a sample without a `##SAMPLE` run info line.
    #[error("{sample}: no run info registered in this session ({locus})")]
    UnknownSample { sample: String, locus: String },

    #[error("Malformed ##SAMPLE header line: {0}")]
    MalformedRunInfo(String),

    /// An annotated variant that was never imported.
    #[error("Annotated variant {0} is not in the store")]
    MissingAnnotationTarget(String),

    #[error("Malformed annotation for {variant_id}: {reason}")]
    MalformedAnnotation { variant_id: String, reason: String },

    #[error("Attribute {key} has a non-numeric value '{value}'")]
    MalformedAttribute { key: String, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Vcf(#[from] VcfError),
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
