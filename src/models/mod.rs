pub mod normals;
pub mod recarea;
pub mod station;

pub use normals::{ClimateVariable, DayNormals, StationProfile};
pub use recarea::{DescriptionSections, Facility, FacilityDescription, RecArea, RecAreaFacilityLink, RecData};
pub use station::StationLocation;
