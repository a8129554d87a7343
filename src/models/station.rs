use serde::{Deserialize, Serialize};
use validator::Validate;

/// A weather station that survived the temperature-completeness filter,
/// positioned by the GHCN-D metadata file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationLocation {
    pub id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl StationLocation {
    pub fn new(id: String, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
        }
    }
}
