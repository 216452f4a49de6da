use fxhash::FxHashMap as HashMap;

use vargraph_core::GenomeVariant;
use vargraph_store::NodeId;

///
/// Handles created during the current import run.
///
/// Owned by one importer and dropped with it: nothing here outlives the run or
/// is shared between runs. Variant handles are keyed by canonical variant, run
/// handles by the sample id used in the call file.
///
#[derive(Debug, Default)]
pub struct SessionRegistry {
    variants: HashMap<GenomeVariant, NodeId>,
    runs: HashMap<String, NodeId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_variant(&mut self, variant: GenomeVariant, node: NodeId) {
        self.variants.insert(variant, node);
    }

    pub fn get_variant(&self, variant: &GenomeVariant) -> Option<NodeId> {
        self.variants.get(variant).copied()
    }

    pub fn put_run(&mut self, sample_id: &str, node: NodeId) {
        self.runs.insert(sample_id.to_string(), node);
    }

    pub fn get_run(&self, sample_id: &str) -> Option<NodeId> {
        self.runs.get(sample_id).copied()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Variants registered this run, sorted by contig then position.
    pub fn into_variants(self) -> Vec<GenomeVariant> {
        let mut variants: Vec<GenomeVariant> = self.variants.into_keys().collect();
        variants.sort();
        variants
    }
}
