use std::fmt::{self, Display};

use super::chromosome::ChromosomeCategory;

///
/// A genomic variant call. Instances produced by [`crate::canonicalize`] are in
/// minimal representation; equality and hashing run over all four fields, so two
/// observations that reduce to the same quadruple are the same variant.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct GenomeVariant {
    pub contig: String,
    /// 1-based position of the first reference base
    pub position: u64,
    pub reference: String,
    pub alternate: String,
}

impl GenomeVariant {
    pub fn new(contig: &str, position: u64, reference: &str, alternate: &str) -> Self {
        GenomeVariant {
            contig: contig.to_string(),
            position,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        }
    }

    ///
    /// Identity string of the variant in the graph store: `contig:posREF>ALT`.
    ///
    pub fn concatenated_id(&self) -> String {
        format!(
            "{}:{}{}>{}",
            self.contig, self.position, self.reference, self.alternate
        )
    }

    ///
    /// Chromosome category derived from the contig, if it has one.
    ///
    pub fn chromosome_category(&self) -> Option<ChromosomeCategory> {
        ChromosomeCategory::from_contig(&self.contig)
    }

    /// True for pure insertions and deletions (one side reduced to nothing).
    pub fn is_indel(&self) -> bool {
        self.reference.is_empty() || self.alternate.is_empty()
    }
}

impl Display for GenomeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.concatenated_id())
    }
}
