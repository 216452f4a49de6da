//! # Core models for vargraph
//!
//! Pure, dependency-free building blocks shared by every other vargraph crate:
//!
//! - [`GenomeVariant`]: a (contig, position, reference, alternate) call in its
//!   minimal representation, with the identity string used by the graph store
//! - [`canonicalize`]: string-level reduction of a raw call to that representation
//! - [`ChromosomeCategory`]: the single chromosome label a variant node carries
//!
//! ```rust
//! use vargraph_core::canonicalize;
//!
//! let variant = canonicalize("1", 100, "AT", "A");
//! assert_eq!(variant.position, 101);
//! assert_eq!(variant.reference, "T");
//! assert_eq!(variant.alternate, "");
//! assert_eq!(variant.concatenated_id(), "1:101T>");
//! ```
pub mod models;
pub mod normalize;

pub use models::*;
pub use normalize::canonicalize;
