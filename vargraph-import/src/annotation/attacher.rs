//! Annotation import: attaches transcripts, genes and per-variant attributes
//! to variants created by an earlier genotype import.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use log::{debug, info};

use vargraph_core::canonicalize;
use vargraph_store::{GraphStore, NodeId, Properties, PropertyValue};
use vargraph_vcf::{MISSING_VALUE, VcfHeader, VcfRecord};

use super::csq::CsqLayout;
use super::decompose::decompose;
use super::record::AnnotationRecord;
use crate::attributes::{conservation_scores, population_frequencies};
use crate::consts::*;
use crate::error::{ImportError, Result};
use crate::settings::ImportSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub records: usize,
    /// Records without an alternate allele.
    pub records_skipped: usize,
    pub annotations: usize,
    pub symbols: usize,
    pub features: usize,
}

impl Display for AnnotationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} skipped), {} annotations, {} symbol links, {} feature links",
            self.records, self.records_skipped, self.annotations, self.symbols, self.features
        )
    }
}

///
/// Imports an annotated call file against variants already in the store.
///
pub struct AnnotationImporter<'a, S: GraphStore> {
    store: &'a mut S,
    layout: CsqLayout,
    settings: ImportSettings,
    summary: AnnotationSummary,
}

impl<'a, S: GraphStore> AnnotationImporter<'a, S> {
    ///
    /// The annotation layout is taken from the header declaration of the
    /// annotation field, or the VEP v82 layout when there is none.
    ///
    pub fn new(store: &'a mut S, header: &VcfHeader, settings: ImportSettings) -> Self {
        let layout = match CsqLayout::from_header(header, &settings.annotation_field) {
            Some(layout) => layout,
            None => {
                info!(
                    "No layout declared for {}, using VEP v82 fields",
                    settings.annotation_field
                );
                CsqLayout::vep_v82()
            }
        };

        AnnotationImporter {
            store,
            layout,
            settings,
            summary: AnnotationSummary::default(),
        }
    }

    pub fn layout(&self) -> &CsqLayout {
        &self.layout
    }

    pub fn summary(&self) -> &AnnotationSummary {
        &self.summary
    }

    pub fn import_records<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = vargraph_vcf::Result<VcfRecord>>,
    {
        info!("Importing annotations ...");
        for record in records {
            self.import_record(&record?)?;
        }
        info!("{}", self.summary);
        Ok(())
    }

    pub fn import_record(&mut self, record: &VcfRecord) -> Result<()> {
        self.summary.records += 1;

        let Some(alternate) = record.alternates.first() else {
            self.summary.records_skipped += 1;
            return Ok(());
        };

        let variant_id =
            canonicalize(&record.contig, record.position, &record.reference, alternate)
                .concatenated_id();
        let variant = self
            .store
            .find_node(VARIANT_LABEL, VARIANT_ID, &PropertyValue::from(variant_id.as_str()))?
            .ok_or_else(|| ImportError::MissingAnnotationTarget(variant_id.clone()))?;

        if let Some(id) = record.id.as_deref().filter(|id| !id.is_empty() && *id != MISSING_VALUE) {
            let mut properties = Properties::new();
            properties.insert("dbSNPId".to_string(), id.into());
            self.store.set_properties(variant, properties)?;
        }

        if let Some(raw) = record.info.get(&self.settings.annotation_field) {
            let annotations = decompose(raw, &self.layout);
            debug!("{}: {} annotations", variant_id, annotations.len());
            self.attach_annotations(variant, &variant_id, &annotations)?;
        }

        let mut attributes =
            population_frequencies(&record.info, self.settings.min_allele_number)?;
        attributes.extend(conservation_scores(&record.info)?);
        if !attributes.is_empty() {
            self.store.set_properties(variant, attributes)?;
        }

        Ok(())
    }

    fn attach_annotations(
        &mut self,
        variant: NodeId,
        variant_id: &str,
        annotations: &BTreeSet<AnnotationRecord>,
    ) -> Result<()> {
        let mut linked_symbols: BTreeSet<NodeId> = BTreeSet::new();

        for annotation in annotations {
            let symbol = match annotation.symbol.as_deref().filter(|s| !s.is_empty()) {
                Some(symbol_id) => {
                    let node = self.add_symbol(symbol_id, annotation.gene.as_deref())?;
                    if linked_symbols.insert(node) {
                        self.store
                            .create_relationship(variant, node, HAS_IN_SYMBOL, Properties::new())?;
                        self.summary.symbols += 1;
                    }
                    Some(node)
                }
                None => None,
            };

            let feature = match annotation.feature.as_deref().filter(|f| !f.is_empty()) {
                Some(feature_id) => Some(self.add_feature(feature_id, annotation, variant_id)?),
                None => None,
            };

            let node = self.store.create_node(
                &[ANNOTATION_LABEL],
                annotation_properties(annotation, variant_id)?,
            )?;
            self.summary.annotations += 1;

            if annotation.consequences.is_empty() {
                self.store
                    .create_relationship(variant, node, HAS_UNKNOWN_CONSEQUENCE, Properties::new())?;
            } else {
                for consequence in &annotation.consequences {
                    self.store.create_relationship(
                        variant,
                        node,
                        &consequence_rel_type(consequence),
                        Properties::new(),
                    )?;
                }
            }

            if let Some(feature) = feature {
                self.store
                    .create_relationship(node, feature, HAS_IN_FEATURE, Properties::new())?;

                if let (Some(symbol), Some(biotype)) = (symbol, annotation.biotype.as_deref()) {
                    self.store.create_relationship(
                        symbol,
                        feature,
                        &biotype_rel_type(biotype),
                        Properties::new(),
                    )?;
                }
            }
        }

        Ok(())
    }

    fn add_symbol(&mut self, symbol_id: &str, gene: Option<&str>) -> Result<NodeId> {
        let node = self
            .store
            .match_or_create_unique(SYMBOL_LABEL, SYMBOL_ID, symbol_id)?;

        if let Some(gene) = gene.filter(|g| !g.is_empty()) {
            let mut properties = Properties::new();
            properties.insert("GeneId".to_string(), gene.into());
            self.store.set_properties(node, properties)?;
        }

        Ok(node)
    }

    fn add_feature(
        &mut self,
        feature_id: &str,
        annotation: &AnnotationRecord,
        variant_id: &str,
    ) -> Result<NodeId> {
        let node = self
            .store
            .match_or_create_unique(FEATURE_LABEL, FEATURE_ID, feature_id)?;
        self.summary.features += 1;

        let mut properties = Properties::new();
        if let Some(feature_type) = &annotation.feature_type {
            properties.insert("FeatureType".to_string(), feature_type.as_str().into());
        }
        if let Some(ccds) = &annotation.ccds {
            properties.insert("CCDSId".to_string(), ccds.as_str().into());
        }
        match annotation.strand {
            Some(1) => {
                properties.insert("Strand".to_string(), true.into());
            }
            Some(-1) => {
                properties.insert("Strand".to_string(), false.into());
            }
            _ => {}
        }
        if let Some(exon) = &annotation.exon {
            let (_, total) = parse_position(exon, variant_id)?;
            properties.insert("TotalExons".to_string(), total.into());
        }
        if !properties.is_empty() {
            self.store.set_properties(node, properties)?;
        }

        if annotation.canonical {
            self.store.add_label(node, CANONICAL_LABEL)?;
        }

        Ok(node)
    }
}

/// Properties of the Annotation node for one record.
fn annotation_properties(annotation: &AnnotationRecord, variant_id: &str) -> Result<Properties> {
    let mut properties = Properties::new();

    let strings = [
        ("HGVSc", &annotation.hgvs_coding),
        ("HGVSp", &annotation.hgvs_protein),
        ("Sift", &annotation.sift),
        ("Polyphen", &annotation.polyphen),
        ("Codons", &annotation.codons),
    ];
    for (key, value) in strings {
        if let Some(value) = value {
            properties.insert(key.to_string(), value.as_str().into());
        }
    }

    if let Some(exon) = &annotation.exon {
        properties.insert("Exon".to_string(), parse_position(exon, variant_id)?.0.into());
    }
    if let Some(intron) = &annotation.intron {
        properties.insert("Intron".to_string(), parse_position(intron, variant_id)?.0.into());
    }

    for (source, ids) in &annotation.domains {
        properties.insert(source.clone(), ids.iter().cloned().collect::<Vec<_>>().into());
    }

    Ok(properties)
}

///
/// Split an exon or intron position `n/total` (or `n-m/total` for records
/// spanning several) into its first number and the total.
///
fn parse_position(raw: &str, variant_id: &str) -> Result<(i64, i64)> {
    let malformed = || ImportError::MalformedAnnotation {
        variant_id: variant_id.to_string(),
        reason: format!("cannot read position '{}'", raw),
    };

    let (position, total) = raw.split_once('/').ok_or_else(malformed)?;
    let first = position.split('-').next().unwrap_or(position);

    let first = first.trim().parse::<i64>().map_err(|_| malformed())?;
    let total = total.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok((first, total))
}
