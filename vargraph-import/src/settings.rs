use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ANNOTATION_FIELD, DEFAULT_MIN_ALLELE_NUMBER};

///
/// Tunables for an import session.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImportSettings {
    /// INFO key of the multi-valued transcript annotation.
    pub annotation_field: String,
    /// ExAC frequencies are derived only above this allele number.
    pub min_allele_number: i64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings {
            annotation_field: DEFAULT_ANNOTATION_FIELD.to_string(),
            min_allele_number: DEFAULT_MIN_ALLELE_NUMBER,
        }
    }
}
