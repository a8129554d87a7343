use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;
use validator::Validate;

use crate::error::{PipelineError, Result};
use crate::models::StationLocation;
use crate::readers::normals::ProfileMap;

/// Reader for the GHCN-D station metadata file.
///
/// Each line starts `station-id latitude longitude`; trailing fields
/// (elevation, state, name) are ignored. Metadata is joined against the
/// ingested profiles: stations without usable climate data are skipped.
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_locations(&self, path: &Path, profiles: &ProfileMap) -> Result<Vec<StationLocation>> {
        let file = File::open(path).map_err(|source| PipelineError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut locations = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(location) = self.parse_metadata_line(&line, profiles)? {
                locations.push(location);
            }
        }

        debug!(count = locations.len(), "located stations with climate data");
        Ok(locations)
    }

    fn parse_metadata_line(
        &self,
        line: &str,
        profiles: &ProfileMap,
    ) -> Result<Option<StationLocation>> {
        let mut fields = line.split_whitespace();

        let station_id = match fields.next() {
            Some(id) => id,
            None => return Ok(None),
        };

        // Join filter: only stations that survived the completeness filter
        // carry coordinates into the matcher.
        if !profiles.contains_key(station_id) {
            return Ok(None);
        }

        let latitude = parse_degrees(fields.next(), station_id, "latitude")?;
        let longitude = parse_degrees(fields.next(), station_id, "longitude")?;

        let location = StationLocation::new(station_id.to_string(), latitude, longitude);
        location.validate()?;

        Ok(Some(location))
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_degrees(field: Option<&str>, station_id: &str, what: &str) -> Result<f64> {
    let field = field.ok_or_else(|| {
        PipelineError::InvalidCoordinate(format!("missing {} for station {}", what, station_id))
    })?;
    field.parse::<f64>().map_err(|_| {
        PipelineError::InvalidCoordinate(format!(
            "invalid {} '{}' for station {}",
            what, field, station_id
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::StationProfile;

    fn profiles_with(ids: &[&str]) -> ProfileMap {
        ids.iter()
            .map(|id| (id.to_string(), StationProfile::new()))
            .collect()
    }

    #[test]
    fn test_join_filter_excludes_unprofiled_stations() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "USW00094846  41.9950  -87.9336  201.8 IL CHICAGO OHARE INTL AP").unwrap();
        writeln!(temp_file, "USW00012345  33.7500  -84.3900  300.0 GA SOMEWHERE ELSE").unwrap();

        let profiles = profiles_with(&["USW00094846"]);
        let locations = StationReader::new()
            .read_locations(temp_file.path(), &profiles)
            .unwrap();

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id, "USW00094846");
        assert!((locations[0].latitude - 41.995).abs() < 1e-9);
        assert!((locations[0].longitude - -87.9336).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_coordinate_is_fatal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "USW00094846  not-a-number  -87.9336").unwrap();

        let profiles = profiles_with(&["USW00094846"]);
        let result = StationReader::new().read_locations(temp_file.path(), &profiles);

        assert!(matches!(result, Err(PipelineError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_malformed_line_for_unprofiled_station_is_skipped() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "UNKNOWN garbage").unwrap();

        let profiles = profiles_with(&["USW00094846"]);
        let locations = StationReader::new()
            .read_locations(temp_file.path(), &profiles)
            .unwrap();

        assert!(locations.is_empty());
    }

    #[test]
    fn test_out_of_range_coordinate_is_fatal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "USW00094846  95.0  -87.9336").unwrap();

        let profiles = profiles_with(&["USW00094846"]);
        let result = StationReader::new().read_locations(temp_file.path(), &profiles);

        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }
}
