use std::collections::{BTreeMap, BTreeSet};

///
/// One transcript-level annotation of a variant.
///
/// Equality is structural over every captured field, so a set of records
/// collapses transcripts that report identical values.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationRecord {
    /// Distinct consequence terms in first-seen order; empty when none were reported.
    pub consequences: Vec<String>,
    pub symbol: Option<String>,
    pub gene: Option<String>,
    pub feature_type: Option<String>,
    pub feature: Option<String>,
    pub biotype: Option<String>,
    /// `n/total` or `n-m/total`
    pub exon: Option<String>,
    pub intron: Option<String>,
    pub hgvs_coding: Option<String>,
    pub hgvs_protein: Option<String>,
    pub codons: Option<String>,
    pub ccds: Option<String>,
    pub sift: Option<String>,
    pub polyphen: Option<String>,
    /// 1 or -1
    pub strand: Option<i8>,
    pub canonical: bool,
    /// Domain ids per source database.
    pub domains: BTreeMap<String, BTreeSet<String>>,
}

impl AnnotationRecord {
    pub fn has_symbol(&self) -> bool {
        self.symbol.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn has_feature(&self) -> bool {
        self.feature.as_deref().is_some_and(|f| !f.is_empty())
    }
}
