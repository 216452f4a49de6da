use std::io;
use thiserror::Error;

use crate::graph::NodeId;

/// Error type for graph store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A second node with the same value for a unique `(label, key)` pair.
    #[error("Constraint violation: a {label} node with {key} = {value} already exists")]
    ConstraintViolation {
        label: String,
        key: String,
        value: String,
    },

    /// An operation referenced a node the store does not hold.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Existing data already breaks a constraint that is being added.
    #[error("Cannot add unique constraint on {label}.{key}: {count} nodes share the value {value}")]
    ConstraintNotSatisfied {
        label: String,
        key: String,
        value: String,
        count: usize,
    },

    /// The snapshot on disk was written by an unknown format version.
    #[error("Unsupported store snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Store snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
