//! # VCF input and output for vargraph
//!
//! A deliberately small VCF layer: enough to stream genotype and annotation call
//! files into the importers, and to write back the variants an import created.
//!
//! - [`VcfReader`]: single-pass reader over plain or gzip-compressed VCF
//! - [`VcfHeader`]: meta lines (including structured `##KEY=<...>` lines) and samples
//! - [`VcfRecord`], [`Genotype`], [`Info`]: one data line, its calls and its INFO column
//! - [`write_variants`]: minimal VCF listing of canonical variants
pub mod error;
pub mod genotype;
pub mod header;
pub mod reader;
pub mod record;
pub mod writer;

pub use error::*;
pub use genotype::Genotype;
pub use header::{MetaLine, StructuredMeta, VcfHeader};
pub use reader::VcfReader;
pub use record::{Info, InfoValue, MISSING_VALUE, VcfRecord};
pub use writer::{write_variants, write_variants_to_path};
