/// Calculate the distance between two points using the Haversine formula.
///
/// This is the matching metric for nearest-station lookup: kilometers on a
/// sphere of radius 6371.0 km. The attachment threshold is expressed in the
/// same units.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Atlanta to New York
        let distance = haversine_distance(33.75, -84.39, 40.71, -74.00);
        assert!((distance - 1200.0).abs() < 20.0);
    }

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_distance(41.995, -87.9336, 41.995, -87.9336), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let forward = haversine_distance(33.75, -84.39, 34.05, -118.24);
        let backward = haversine_distance(34.05, -118.24, 33.75, -84.39);
        assert!((forward - backward).abs() < 1e-9);
    }
}
