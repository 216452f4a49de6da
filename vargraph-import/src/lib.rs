//! # Genotype and annotation import for vargraph
//!
//! Two importers populate a [`GraphStore`](vargraph_store::GraphStore) from call files:
//!
//! - [`VariantImporter`] reads genotype calls. Each run declared in a `##SAMPLE`
//!   header line becomes a RunInfo node; each called alternate allele is
//!   canonicalized and resolved to a single Variant node (session registry,
//!   then store, then created), linked from the run by a het or hom edge.
//! - [`AnnotationImporter`] reads the same variants annotated with transcript
//!   consequences and attaches Symbol, Feature and Annotation nodes plus
//!   population frequencies and conservation scores.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use vargraph_import::VariantImporter;
//! use vargraph_store::MemoryGraph;
//! use vargraph_vcf::VcfReader;
//!
//! let vcf = "##fileformat=VCFv4.1\n\
//!     ###SAMPLE=<ID=S1,WorklistId=W1,SeqId=Q1>\n\
//!     #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
//!     1\t100\t.\tG\tA,C\t.\tPASS\t.\tGT:GQ\t1/2:60\n";
//!
//! let reader = VcfReader::new(Box::new(Cursor::new(vcf))).unwrap();
//! let mut store = MemoryGraph::new();
//!
//! let mut importer = VariantImporter::new(&mut store);
//! importer.add_run_info(reader.header()).unwrap();
//! importer.import_records(reader).unwrap();
//!
//! let outcome = importer.finish();
//! assert_eq!(outcome.created.len(), 2);
//! assert_eq!(outcome.summary.created, 2);
//! ```
pub mod annotation;
pub mod attributes;
pub mod classify;
pub mod consts;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod run_info;
pub mod settings;

pub use annotation::{AnnotationImporter, AnnotationRecord, AnnotationSummary, CsqLayout};
pub use classify::{FatalKind, GenotypeClass, SkipReason, classify};
pub use error::*;
pub use registry::SessionRegistry;
pub use resolver::{ImportOutcome, ImportSummary, Resolution, VariantImporter, Zygosity};
pub use run_info::RunInfo;
pub use settings::ImportSettings;
