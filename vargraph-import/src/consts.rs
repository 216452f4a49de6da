//! Node labels, identity keys and relationship types written by the importers.

// labels
pub const SAMPLE_LABEL: &str = "Sample";
pub const RUN_INFO_LABEL: &str = "RunInfo";
pub const VARIANT_LABEL: &str = "Variant";
pub const SYMBOL_LABEL: &str = "Symbol";
pub const FEATURE_LABEL: &str = "Feature";
pub const CANONICAL_LABEL: &str = "Canonical";
pub const ANNOTATION_LABEL: &str = "Annotation";

// identity keys
pub const SAMPLE_ID: &str = "SampleId";
pub const ANALYSIS_ID: &str = "AnalysisId";
pub const VARIANT_ID: &str = "VariantId";
pub const SYMBOL_ID: &str = "SymbolId";
pub const FEATURE_ID: &str = "FeatureId";

// relationships
pub const HAS_ANALYSIS: &str = "HAS_ANALYSIS";
pub const HAS_HET_VARIANT: &str = "HAS_HET_VARIANT";
pub const HAS_HOM_VARIANT: &str = "HAS_HOM_VARIANT";
pub const HAS_IN_SYMBOL: &str = "HAS_IN_SYMBOL";
pub const HAS_IN_FEATURE: &str = "HAS_IN_FEATURE";
pub const HAS_UNKNOWN_CONSEQUENCE: &str = "HAS_UNKNOWN_CONSEQUENCE";

// call file conventions
pub const SAMPLE_META_KEY: &str = "SAMPLE";
pub const SPANNING_DELETION: &str = "*";
pub const PROTEIN_CODING: &str = "protein_coding";
pub const QUALITY: &str = "Quality";
/// Genotype quality stored when the call has no GQ.
pub const MISSING_QUALITY: i64 = -1;

pub const DEFAULT_ANNOTATION_FIELD: &str = "CSQ";
pub const DEFAULT_MIN_ALLELE_NUMBER: i64 = 120;

/// `HAS_<CONSEQUENCE>_CONSEQUENCE` for a consequence term.
pub fn consequence_rel_type(consequence: &str) -> String {
    format!("HAS_{}_CONSEQUENCE", consequence.to_uppercase())
}

/// `HAS_<BIOTYPE>_BIOTYPE` for a transcript biotype.
pub fn biotype_rel_type(biotype: &str) -> String {
    format!("HAS_{}_BIOTYPE", biotype.to_uppercase())
}
