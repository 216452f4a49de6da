//! Zygosity classification of a single genotype call.
//!
//! Every call is mapped to exactly one [`GenotypeClass`] before anything touches
//! the store, so the importer is a plain `match` over the result.

use vargraph_vcf::{Genotype, VcfRecord};

use crate::consts::SPANNING_DELETION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCall,
    HomRef,
    /// Partly called, e.g. `0/.`
    Mixed,
    /// One allele is the `*` placeholder for an overlapping deletion.
    SpanningDeletion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalKind {
    /// Ploidy or allele count other than two.
    NotDiploid { ploidy: usize },
    /// A GT index with no matching allele in the record.
    AlleleOutOfRange { index: usize },
    /// Two different allele indices that name the same allele.
    UnknownInheritance,
}

///
/// The outcome of classifying one genotype against its record. Allele strings
/// borrow from the record and are raw, not yet canonicalized.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenotypeClass<'a> {
    Skip(SkipReason),
    Fatal(FatalKind),
    Homozygous { alternate: &'a str },
    Heterozygous { alternate: &'a str },
    HeterozygousNonRef { first: &'a str, second: &'a str },
}

/// Classify `genotype`, one of the calls of `record`.
pub fn classify<'a>(record: &'a VcfRecord, genotype: &Genotype) -> GenotypeClass<'a> {
    if genotype.is_no_call() {
        return GenotypeClass::Skip(SkipReason::NoCall);
    }
    if genotype.is_hom_ref() {
        return GenotypeClass::Skip(SkipReason::HomRef);
    }
    if genotype.is_mixed() {
        return GenotypeClass::Skip(SkipReason::Mixed);
    }
    if genotype.ploidy() != 2 {
        return GenotypeClass::Fatal(FatalKind::NotDiploid {
            ploidy: genotype.ploidy(),
        });
    }

    // not mixed and not a no-call, so both alleles are called
    let (Some(i), Some(j)) = (genotype.alleles[0], genotype.alleles[1]) else {
        return GenotypeClass::Skip(SkipReason::Mixed);
    };
    let (first, second) = match (record.allele(i), record.allele(j)) {
        (Some(a), Some(b)) => (a, b),
        (None, _) => return GenotypeClass::Fatal(FatalKind::AlleleOutOfRange { index: i }),
        (_, None) => return GenotypeClass::Fatal(FatalKind::AlleleOutOfRange { index: j }),
    };

    if first == SPANNING_DELETION || second == SPANNING_DELETION {
        return GenotypeClass::Skip(SkipReason::SpanningDeletion);
    }

    if i == j {
        GenotypeClass::Homozygous { alternate: second }
    } else if i == 0 {
        GenotypeClass::Heterozygous { alternate: second }
    } else if j == 0 {
        GenotypeClass::Heterozygous { alternate: first }
    } else if first != second {
        GenotypeClass::HeterozygousNonRef { first, second }
    } else {
        GenotypeClass::Fatal(FatalKind::UnknownInheritance)
    }
}
