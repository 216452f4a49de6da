//! Pipe-delimited transcript annotations, one entry per transcript.

use std::collections::{BTreeMap, BTreeSet};

use vargraph_vcf::VcfHeader;

use super::record::AnnotationRecord;

/// Field order written by VEP release 82 when the header does not say otherwise.
pub const VEP_V82_FIELDS: &[&str] = &[
    "Allele",
    "Consequence",
    "IMPACT",
    "SYMBOL",
    "Gene",
    "Feature_type",
    "Feature",
    "BIOTYPE",
    "EXON",
    "INTRON",
    "HGVSc",
    "HGVSp",
    "cDNA_position",
    "CDS_position",
    "Protein_position",
    "Amino_acids",
    "Codons",
    "Existing_variation",
    "DISTANCE",
    "STRAND",
    "SYMBOL_SOURCE",
    "HGNC_ID",
    "CANONICAL",
    "CCDS",
    "SIFT",
    "PolyPhen",
    "DOMAINS",
];

const FORMAT_MARKER: &str = "Format:";

/// Domain sources that number the same PROSITE entries.
const PROSITE_SOURCES: &[&str] = &["PROSITE_profiles", "PROSITE_patterns"];
pub const PROSITE: &str = "prosite";

///
/// Positions of the captured fields within an annotation entry.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsqLayout {
    fields: Vec<String>,
}

impl CsqLayout {
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        CsqLayout {
            fields: fields.iter().map(|f| f.as_ref().trim().to_string()).collect(),
        }
    }

    pub fn vep_v82() -> Self {
        Self::from_fields(VEP_V82_FIELDS)
    }

    ///
    /// Read the layout from the `Format: A|B|...` part of the `##INFO` description
    /// declaring `field`. `None` when the header does not declare one.
    ///
    pub fn from_header(header: &VcfHeader, field: &str) -> Option<Self> {
        let description = header.info_description(field)?;
        let (_, format) = description.split_once(FORMAT_MARKER)?;
        let fields: Vec<&str> = format.trim().split('|').collect();
        if fields.len() < 2 {
            return None;
        }
        Some(Self::from_fields(&fields))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Parse one entry. Missing trailing fields read as empty.
    pub fn parse(&self, entry: &str) -> AnnotationRecord {
        let values: Vec<&str> = entry.split('|').collect();
        let value = |name: &str| -> Option<String> {
            let v = *values.get(self.position(name)?)?;
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };

        let mut consequences: Vec<String> = Vec::new();
        for term in value("Consequence").iter().flat_map(|c| c.split('&')) {
            if !term.is_empty() && !consequences.iter().any(|seen| seen == term) {
                consequences.push(term.to_string());
            }
        }

        AnnotationRecord {
            consequences,
            symbol: value("SYMBOL"),
            gene: value("Gene"),
            feature_type: value("Feature_type"),
            feature: value("Feature"),
            biotype: value("BIOTYPE"),
            exon: value("EXON"),
            intron: value("INTRON"),
            hgvs_coding: value("HGVSc"),
            hgvs_protein: value("HGVSp"),
            codons: value("Codons"),
            ccds: value("CCDS"),
            sift: value("SIFT"),
            polyphen: value("PolyPhen"),
            strand: value("STRAND").and_then(|s| s.parse().ok()),
            canonical: value("CANONICAL").as_deref() == Some("YES"),
            domains: value("DOMAINS").map(|d| parse_domains(&d)).unwrap_or_default(),
        }
    }
}

impl Default for CsqLayout {
    fn default() -> Self {
        Self::vep_v82()
    }
}

fn parse_domains(raw: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut domains: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in raw.split('&') {
        let Some((source, id)) = entry.split_once(':') else {
            continue;
        };
        let source = if PROSITE_SOURCES.contains(&source) {
            PROSITE
        } else {
            source
        };
        domains
            .entry(source.to_string())
            .or_default()
            .insert(id.to_string());
    }
    domains
}
