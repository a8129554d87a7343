use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::error::{PipelineError, Result};
use crate::models::StationLocation;
use crate::utils::coordinates::haversine_distance;

type CoordinateKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn coordinate_key(latitude: f64, longitude: f64) -> CoordinateKey {
    (OrderedFloat(latitude), OrderedFloat(longitude))
}

/// Nearest-station index: a coordinate list in file order plus a
/// coordinate-to-station-id reverse lookup. Built once after ingestion and
/// immutable afterwards.
///
/// Lookup is a linear haversine scan, O(n) per query. That is fine for the
/// one-shot batch caller (one query per recreation area over a few thousand
/// stations); repeated interactive querying would want a spatial index behind
/// the same contract.
pub struct StationIndex {
    coordinates: Vec<(f64, f64)>,
    station_by_coordinate: HashMap<CoordinateKey, String>,
}

impl StationIndex {
    pub fn new(locations: Vec<StationLocation>) -> Self {
        let mut coordinates = Vec::with_capacity(locations.len());
        let mut station_by_coordinate = HashMap::with_capacity(locations.len());

        for location in locations {
            coordinates.push((location.latitude, location.longitude));
            // Coordinates are assumed unique; a collision overwrites, so the
            // last station in file order owns the coordinate.
            station_by_coordinate.insert(
                coordinate_key(location.latitude, location.longitude),
                location.id,
            );
        }

        Self {
            coordinates,
            station_by_coordinate,
        }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Return the id of the closest station and its distance in kilometers.
    ///
    /// Fails with `NoStations` when nothing was ingested. Exact ties resolve
    /// first-found in file order.
    pub fn find_closest_station(&self, latitude: f64, longitude: f64) -> Result<(&str, f64)> {
        let mut best: Option<(usize, f64)> = None;

        for (index, &(lat, lon)) in self.coordinates.iter().enumerate() {
            let distance = haversine_distance(latitude, longitude, lat, lon);
            if best.map_or(true, |(_, shortest)| distance < shortest) {
                best = Some((index, distance));
            }
        }

        let (index, distance) = best.ok_or(PipelineError::NoStations)?;
        let (lat, lon) = self.coordinates[index];
        let station_id = self
            .station_by_coordinate
            .get(&coordinate_key(lat, lon))
            .ok_or_else(|| {
                PipelineError::InvalidCoordinate(format!(
                    "no station registered at ({}, {})",
                    lat, lon
                ))
            })?;

        Ok((station_id.as_str(), distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_city_index() -> StationIndex {
        StationIndex::new(vec![
            StationLocation::new("ATLANTA".to_string(), 33.75, -84.39),
            StationLocation::new("NEWYORK".to_string(), 40.71, -74.00),
            StationLocation::new("LOSANGELES".to_string(), 34.05, -118.24),
        ])
    }

    #[test]
    fn test_nearest_station() {
        let index = three_city_index();
        let (station_id, distance) = index.find_closest_station(33.82, -84.32).unwrap();

        assert_eq!(station_id, "ATLANTA");
        // within a few km of downtown Atlanta
        assert!(distance < 15.0, "distance was {}", distance);
    }

    #[test]
    fn test_determinism() {
        let index = three_city_index();
        let first = index.find_closest_station(39.0, -98.0).unwrap();
        let second = index.find_closest_station(39.0, -98.0).unwrap();

        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_empty_index_fails_explicitly() {
        let index = StationIndex::new(vec![]);
        let result = index.find_closest_station(33.82, -84.32);

        assert!(matches!(result, Err(PipelineError::NoStations)));
    }

    #[test]
    fn test_exact_tie_resolves_first_found() {
        let index = StationIndex::new(vec![
            StationLocation::new("EAST".to_string(), 40.0, -80.0),
            StationLocation::new("WEST".to_string(), 40.0, -90.0),
        ]);

        // equidistant by symmetry
        let (station_id, _) = index.find_closest_station(40.0, -85.0).unwrap();
        assert_eq!(station_id, "EAST");
    }

    #[test]
    fn test_coordinate_collision_overwrites() {
        let index = StationIndex::new(vec![
            StationLocation::new("FIRST".to_string(), 40.0, -80.0),
            StationLocation::new("SECOND".to_string(), 40.0, -80.0),
        ]);

        let (station_id, distance) = index.find_closest_station(40.0, -80.0).unwrap();
        assert_eq!(station_id, "SECOND");
        assert_eq!(distance, 0.0);
    }
}
