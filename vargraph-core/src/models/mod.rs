pub mod chromosome;
pub mod variant;

pub use chromosome::ChromosomeCategory;
pub use variant::GenomeVariant;
