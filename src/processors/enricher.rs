use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{FacilityDescription, RecArea};
use crate::processors::matcher::StationIndex;
use crate::readers::normals::ProfileMap;
use crate::utils::constants::RESERVATION_URL_PREFIX;
use crate::utils::progress::ProgressReporter;
use crate::utils::text::{clean_text, split_facility_description};

/// Attaches weather data and normalizes free-text fields, in place, on the
/// joined recreation-area map.
pub struct Enricher {
    profiles: ProfileMap,
    index: StationIndex,
    threshold_km: f64,
}

impl Enricher {
    pub fn new(profiles: ProfileMap, index: StationIndex, threshold_km: f64) -> Self {
        Self {
            profiles,
            index,
            threshold_km,
        }
    }

    pub fn enrich_all(
        &self,
        recareas: &mut BTreeMap<String, RecArea>,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        let mut attached = 0usize;

        for recarea in recareas.values_mut() {
            if self.enrich_recarea(recarea)? {
                attached += 1;
            }
            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        info!(
            total = recareas.len(),
            with_weather = attached,
            "enrichment complete"
        );
        Ok(())
    }

    /// Returns whether a weather profile was attached.
    fn enrich_recarea(&self, recarea: &mut RecArea) -> Result<bool> {
        // Coordinate-less recareas pass through entirely untouched,
        // facilities included; the importer's historical output leaves them
        // raw.
        let Some((latitude, longitude)) = recarea.coordinates() else {
            return Ok(false);
        };

        let (station_id, distance) = self.index.find_closest_station(latitude, longitude)?;

        let mut attached = false;
        if distance < self.threshold_km {
            recarea.weather = self.profiles.get(station_id).cloned();
            recarea.weather_station_id = Some(station_id.to_string());
            recarea.weather_station_dist = Some(distance);
            recarea.description = clean_text(&recarea.description);
            recarea.directions = clean_text(&recarea.directions);
            attached = true;
        }

        for facility in &mut recarea.facilities {
            if let FacilityDescription::Raw(raw) = &facility.description {
                facility.description =
                    FacilityDescription::Sections(split_facility_description(&clean_text(raw)));
            }
            facility.directions = clean_text(&facility.directions);
            facility.reservation_url = Some(reservation_url(facility.legacy_id.as_deref()));
        }

        Ok(attached)
    }
}

/// Reservation calendar URL for a facility; empty when there is no usable
/// legacy id to key the calendar on.
fn reservation_url(legacy_id: Option<&str>) -> String {
    match legacy_id {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(id) => format!("{}{}", RESERVATION_URL_PREFIX, id),
            Err(_) => {
                warn!(legacy_id = raw, "unparsable legacy facility id");
                String::new()
            }
        },
        None => String::new(),
    }
}
