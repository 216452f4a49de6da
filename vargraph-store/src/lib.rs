//! # Graph store for vargraph
//!
//! The importers only need a handful of operations from a graph database: create a
//! node, add a label, set properties, create a relationship and find nodes by an
//! indexed property. Those are captured by the [`GraphStore`] trait, so any backend
//! exposing create/find-by-unique-key semantics can sit behind the importers.
//!
//! [`MemoryGraph`] is the reference backend. It keeps the whole graph in memory,
//! enforces unique constraints on `(label, key)` pairs, keeps property indexes and
//! persists itself as a JSON snapshot (gzip-compressed when the path ends in `.gz`).
//!
//! ```rust
//! use vargraph_store::{GraphStore, MemoryGraph, PropertyValue, Properties, StoreError};
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_unique_constraint("Symbol", "SymbolId").unwrap();
//!
//! let mut properties = Properties::new();
//! properties.insert("SymbolId".to_string(), PropertyValue::from("BRCA1"));
//! graph.create_node(&["Symbol"], properties.clone()).unwrap();
//!
//! let duplicate = graph.create_node(&["Symbol"], properties);
//! assert!(matches!(duplicate, Err(StoreError::ConstraintViolation { .. })));
//! ```
pub mod error;
pub mod graph;
pub mod memory;
pub mod traits;
pub mod value;

pub use error::*;
pub use graph::*;
pub use memory::MemoryGraph;
pub use traits::GraphStore;
pub use value::*;
