use std::collections::BTreeSet;

use vargraph_vcf::InfoValue;

use super::csq::CsqLayout;
use super::record::AnnotationRecord;
use crate::consts::PROTEIN_CODING;

/// True for records that are not imported: anything but protein-coding transcripts.
pub fn filter_out(record: &AnnotationRecord) -> bool {
    record.biotype.as_deref() != Some(PROTEIN_CODING)
}

///
/// Split a raw annotation attribute into distinct protein-coding records.
///
/// The attribute is either one entry or a list of entries, one per transcript.
/// Structurally identical entries collapse into one record.
///
pub fn decompose(raw: &InfoValue, layout: &CsqLayout) -> BTreeSet<AnnotationRecord> {
    let entries: Vec<&str> = match raw {
        InfoValue::Flag => vec![],
        InfoValue::Single(entry) => vec![entry.as_str()],
        InfoValue::List(entries) => entries.iter().map(|e| e.as_str()).collect(),
    };

    entries
        .into_iter()
        .map(|entry| layout.parse(entry))
        .filter(|record| !filter_out(record))
        .collect()
}
