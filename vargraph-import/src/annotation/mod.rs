pub mod attacher;
pub mod csq;
pub mod decompose;
pub mod record;

pub use attacher::{AnnotationImporter, AnnotationSummary};
pub use csq::CsqLayout;
pub use decompose::{decompose, filter_out};
pub use record::AnnotationRecord;
