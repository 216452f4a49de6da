//! Genotype import: three-tier variant resolution.
//!
//! Every called allele of every genotype resolves to exactly one Variant node,
//! trying in order:
//!
//! 1. the session registry (created earlier in this run)
//! 2. the store, by canonical identity string (created by a previous run)
//! 3. a new node, registered in the session
//!
//! Each tier falls through only when the variant is not found there; any store
//! error stops the run. Store hits are not copied into the registry, which only
//! ever holds nodes this run created, so the registry doubles as the list of new
//! variants written out at the end of the run.

use std::fmt::{self, Display};

use log::{debug, info, warn};

use vargraph_core::{GenomeVariant, canonicalize};
use vargraph_store::{GraphStore, NodeId, Properties, PropertyValue};
use vargraph_vcf::{Genotype, VcfHeader, VcfRecord};

use crate::classify::{FatalKind, GenotypeClass, SkipReason, classify};
use crate::consts::*;
use crate::error::{ImportError, Result};
use crate::registry::SessionRegistry;
use crate::run_info::run_infos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zygosity {
    Heterozygous,
    Homozygous,
}

impl Zygosity {
    pub fn rel_type(&self) -> &'static str {
        match self {
            Zygosity::Heterozygous => HAS_HET_VARIANT,
            Zygosity::Homozygous => HAS_HOM_VARIANT,
        }
    }
}

/// Which tier resolved a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    SessionHit,
    StoreHit,
    Created,
}

///
/// Counters for one genotype import run.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    /// Filtered or non-variant records.
    pub records_skipped: usize,
    pub genotypes: usize,
    pub skipped_no_call: usize,
    pub skipped_hom_ref: usize,
    pub skipped_mixed: usize,
    pub skipped_spanning_deletion: usize,
    pub session_hits: usize,
    pub store_hits: usize,
    pub created: usize,
}

impl ImportSummary {
    fn count_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoCall => self.skipped_no_call += 1,
            SkipReason::HomRef => self.skipped_hom_ref += 1,
            SkipReason::Mixed => self.skipped_mixed += 1,
            SkipReason::SpanningDeletion => self.skipped_spanning_deletion += 1,
        }
    }

    fn count_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::SessionHit => self.session_hits += 1,
            Resolution::StoreHit => self.store_hits += 1,
            Resolution::Created => self.created += 1,
        }
    }
}

impl Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} skipped), {} genotypes; skipped {} no-call, {} hom-ref, {} mixed, {} spanning deletion; \
             variants: {} new, {} from this run, {} already stored",
            self.records,
            self.records_skipped,
            self.genotypes,
            self.skipped_no_call,
            self.skipped_hom_ref,
            self.skipped_mixed,
            self.skipped_spanning_deletion,
            self.created,
            self.session_hits,
            self.store_hits
        )
    }
}

/// What a finished genotype import leaves behind.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Variants created by this run, sorted by contig then position.
    pub created: Vec<GenomeVariant>,
    pub summary: ImportSummary,
}

///
/// Imports one genotype call file. Owns the session registry for the run; the
/// registry is dropped by [`VariantImporter::finish`].
///
/// Not meant to be shared: resolution assumes each observation is fully
/// resolved before the next one is looked at.
///
pub struct VariantImporter<'a, S: GraphStore> {
    store: &'a mut S,
    session: SessionRegistry,
    summary: ImportSummary,
}

impl<'a, S: GraphStore> VariantImporter<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        VariantImporter {
            store,
            session: SessionRegistry::new(),
            summary: ImportSummary::default(),
        }
    }

    pub fn session(&self) -> &SessionRegistry {
        &self.session
    }

    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }

    ///
    /// Create the Sample and RunInfo nodes declared by `##SAMPLE` header lines and
    /// register each run under its sample id. A run whose analysis id is already
    /// stored is reused.
    ///
    /// Returns the number of runs registered.
    ///
    pub fn add_run_info(&mut self, header: &VcfHeader) -> Result<usize> {
        info!("Adding sample and run info nodes ...");

        for run in run_infos(header)? {
            let sample = self
                .store
                .match_or_create_unique(SAMPLE_LABEL, SAMPLE_ID, &run.sample_id)?;
            if let Some(tissue) = &run.tissue {
                let mut properties = Properties::new();
                properties.insert("Tissue".to_string(), PropertyValue::from(tissue.as_str()));
                self.store.set_properties(sample, properties)?;
            }

            let analysis_id = PropertyValue::from(run.analysis_id());
            let run_node = match self.store.find_node(RUN_INFO_LABEL, ANALYSIS_ID, &analysis_id)? {
                Some(existing) => {
                    warn!(
                        "Run {} is already in the store, adding genotypes to it",
                        run.analysis_id()
                    );
                    existing
                }
                None => {
                    let node = self.store.create_node(&[RUN_INFO_LABEL], run.properties())?;
                    self.store
                        .create_relationship(sample, node, HAS_ANALYSIS, Properties::new())?;
                    node
                }
            };

            self.session.put_run(&run.sample_id, run_node);
        }

        Ok(self.session.run_count())
    }

    /// Import every record of a call file, stopping at the first error.
    pub fn import_records<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = vargraph_vcf::Result<VcfRecord>>,
    {
        info!("Importing variants ...");
        for record in records {
            self.import_record(&record?)?;
        }
        info!("{}", self.summary);
        Ok(())
    }

    /// Import the genotypes of one record.
    pub fn import_record(&mut self, record: &VcfRecord) -> Result<()> {
        self.summary.records += 1;

        if record.is_filtered() || !record.is_variant() {
            self.summary.records_skipped += 1;
            return Ok(());
        }

        for genotype in &record.genotypes {
            self.summary.genotypes += 1;
            self.import_genotype(record, genotype)?;
        }

        Ok(())
    }

    fn import_genotype(&mut self, record: &VcfRecord, genotype: &Genotype) -> Result<()> {
        let (alternates, zygosity) = match classify(record, genotype) {
            GenotypeClass::Skip(reason) => {
                if reason == SkipReason::Mixed {
                    warn!(
                        "{}: {} has mixed genotype ( {} ) and could not be added.",
                        genotype.sample,
                        record.locus(),
                        genotype.gt_string()
                    );
                }
                self.summary.count_skip(reason);
                return Ok(());
            }
            GenotypeClass::Fatal(kind) => return Err(fatal_error(record, genotype, kind)),
            GenotypeClass::Homozygous { alternate } => (vec![alternate], Zygosity::Homozygous),
            GenotypeClass::Heterozygous { alternate } => (vec![alternate], Zygosity::Heterozygous),
            GenotypeClass::HeterozygousNonRef { first, second } => {
                (vec![first, second], Zygosity::Heterozygous)
            }
        };

        let run = self
            .session
            .get_run(&genotype.sample)
            .ok_or_else(|| ImportError::UnknownSample {
                sample: genotype.sample.clone(),
                locus: record.locus(),
            })?;

        for alternate in alternates {
            let variant = canonicalize(
                &record.contig,
                record.position,
                &record.reference,
                alternate,
            );
            self.resolve(variant, run, zygosity, genotype.quality)?;
        }

        Ok(())
    }

    ///
    /// Attach a genotype edge from `run` to the node of `variant`, resolving the
    /// node through the session registry, then the store, then by creating it.
    ///
    pub fn resolve(
        &mut self,
        variant: GenomeVariant,
        run: NodeId,
        zygosity: Zygosity,
        quality: Option<i32>,
    ) -> Result<Resolution> {
        let (node, resolution) = if let Some(node) = self.session.get_variant(&variant) {
            (node, Resolution::SessionHit)
        } else if let Some(node) = self.store.find_node(
            VARIANT_LABEL,
            VARIANT_ID,
            &PropertyValue::from(variant.concatenated_id()),
        )? {
            (node, Resolution::StoreHit)
        } else {
            let node = self.create_variant(&variant)?;
            self.session.put_variant(variant.clone(), node);
            (node, Resolution::Created)
        };

        let mut properties = Properties::new();
        properties.insert(
            QUALITY.to_string(),
            PropertyValue::Int(quality.map_or(MISSING_QUALITY, i64::from)),
        );
        self.store
            .create_relationship(run, node, zygosity.rel_type(), properties)?;

        debug!("{} -> {:?}", variant, resolution);
        self.summary.count_resolution(resolution);

        Ok(resolution)
    }

    fn create_variant(&mut self, variant: &GenomeVariant) -> Result<NodeId> {
        let mut properties = Properties::new();
        properties.insert(VARIANT_ID.to_string(), variant.concatenated_id().into());

        let node = match variant.chromosome_category() {
            Some(category) => self
                .store
                .create_node(&[VARIANT_LABEL, category.label()], properties)?,
            None => self.store.create_node(&[VARIANT_LABEL], properties)?,
        };

        Ok(node)
    }

    /// End the run, dropping the session registry.
    pub fn finish(self) -> ImportOutcome {
        ImportOutcome {
            created: self.session.into_variants(),
            summary: self.summary,
        }
    }
}

fn fatal_error(record: &VcfRecord, genotype: &Genotype, kind: FatalKind) -> ImportError {
    let sample = genotype.sample.clone();
    let locus = record.locus();
    let gt = genotype.gt_string();
    match kind {
        FatalKind::NotDiploid { ploidy } => ImportError::MalformedGenotype {
            sample,
            locus,
            genotype: gt,
            reason: format!("ploidy {} is not diploid", ploidy),
        },
        FatalKind::AlleleOutOfRange { index } => ImportError::MalformedGenotype {
            sample,
            locus,
            genotype: gt,
            reason: format!("allele index {} has no matching allele", index),
        },
        FatalKind::UnknownInheritance => ImportError::UnknownInheritance {
            sample,
            locus,
            genotype: gt,
        },
    }
}
