use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vargraph_import::ImportSettings;
use vargraph_import::consts::*;
use vargraph_store::{MemoryGraph, PropertyKey, StoreError};

pub const DEFAULT_IMPORTED_VARIANTS: &str = "imported.vcf";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No graph store given: pass --store or set `store` in the config file")]
    MissingStore,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

///
/// Settings shared by every subcommand. Every key is optional; a missing
/// `[[constraints]]` or `[[indexes]]` list means the default set.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VargraphConfig {
    /// Graph snapshot, `.json` or `.json.gz`.
    pub store: Option<PathBuf>,
    /// Where `import-variants` lists the variants it created.
    pub imported_variants: PathBuf,
    /// INFO key of the transcript annotation.
    pub annotation_field: String,
    /// ExAC frequencies are derived only above this allele number.
    pub min_allele_number: i64,
    pub constraints: Vec<PropertyKey>,
    pub indexes: Vec<PropertyKey>,
}

impl Default for VargraphConfig {
    fn default() -> Self {
        VargraphConfig {
            store: None,
            imported_variants: PathBuf::from(DEFAULT_IMPORTED_VARIANTS),
            annotation_field: DEFAULT_ANNOTATION_FIELD.to_string(),
            min_allele_number: DEFAULT_MIN_ALLELE_NUMBER,
            constraints: vec![
                PropertyKey::new(SAMPLE_LABEL, SAMPLE_ID),
                PropertyKey::new(RUN_INFO_LABEL, ANALYSIS_ID),
                PropertyKey::new(VARIANT_LABEL, VARIANT_ID),
                PropertyKey::new(FEATURE_LABEL, FEATURE_ID),
                PropertyKey::new(SYMBOL_LABEL, SYMBOL_ID),
            ],
            indexes: vec![
                PropertyKey::new(RUN_INFO_LABEL, "WorklistId"),
                PropertyKey::new(RUN_INFO_LABEL, "SeqId"),
                PropertyKey::new(VARIANT_LABEL, "dbSNPId"),
            ],
        }
    }
}

impl TryFrom<&Path> for VargraphConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl VargraphConfig {
    /// The config file at `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::try_from(path),
            None => Ok(Self::default()),
        }
    }

    /// The store path, with `--store` taking precedence over the file.
    pub fn store_path(&self, flag: Option<&String>) -> ConfigResult<PathBuf> {
        flag.map(PathBuf::from)
            .or_else(|| self.store.clone())
            .ok_or(ConfigError::MissingStore)
    }

    pub fn import_settings(&self) -> ImportSettings {
        ImportSettings {
            annotation_field: self.annotation_field.clone(),
            min_allele_number: self.min_allele_number,
        }
    }

    /// Declare the configured constraints and indexes on `graph`.
    pub fn apply_schema(&self, graph: &mut MemoryGraph) -> Result<(), StoreError> {
        for pk in &self.constraints {
            graph.add_unique_constraint(&pk.label, &pk.key)?;
        }
        for pk in &self.indexes {
            graph.add_index(&pk.label, &pk.key);
        }
        Ok(())
    }
}
