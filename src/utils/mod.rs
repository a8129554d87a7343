pub mod constants;
pub mod coordinates;
pub mod progress;
pub mod text;

pub use constants::*;
pub use coordinates::haversine_distance;
pub use progress::ProgressReporter;
pub use text::{clean_text, split_facility_description};
