///
/// The chromosome label assigned to a variant node when it is created.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromosomeCategory {
    Autosomal,
    X,
    Y,
    Mitochondrial,
}

impl ChromosomeCategory {
    ///
    /// Derive the category from a contig name. Accepts an optional `chr` prefix.
    /// Numbered contigs outside 1-22 and unplaced contigs have no category.
    ///
    pub fn from_contig(contig: &str) -> Option<Self> {
        let name = contig.strip_prefix("chr").unwrap_or(contig);
        match name {
            "X" => Some(ChromosomeCategory::X),
            "Y" => Some(ChromosomeCategory::Y),
            "M" | "MT" => Some(ChromosomeCategory::Mitochondrial),
            _ => match name.parse::<u8>() {
                Ok(n) if (1..=22).contains(&n) => Some(ChromosomeCategory::Autosomal),
                _ => None,
            },
        }
    }

    /// Node label used for this category in the graph.
    pub fn label(&self) -> &'static str {
        match self {
            ChromosomeCategory::Autosomal => "AutoChromosome",
            ChromosomeCategory::X => "XChromosome",
            ChromosomeCategory::Y => "YChromosome",
            ChromosomeCategory::Mitochondrial => "MtChromosome",
        }
    }
}
