pub mod normals;
pub mod recareas;
pub mod stations;

pub use normals::{NormalsReader, ProfileMap};
pub use recareas::RecAreaReader;
pub use stations::StationReader;
