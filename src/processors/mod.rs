pub mod enricher;
pub mod matcher;

pub use enricher::Enricher;
pub use matcher::StationIndex;
