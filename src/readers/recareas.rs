use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::models::{Facility, RecArea, RecAreaFacilityLink, RecData};
use crate::utils::constants::{FACILITIES_FILE, RECAREAS_FILE, RECAREA_FACILITIES_FILE};

/// Loader for the three RIDB export files. The exports are ISO-8859-1
/// encoded, so bytes are transcoded before JSON parsing.
pub struct RecAreaReader;

impl RecAreaReader {
    pub fn new() -> Self {
        Self
    }

    /// Load all three files from `dir` and join facilities onto their parent
    /// recreation areas. The result is keyed by recarea id.
    pub fn load(&self, dir: &Path) -> Result<BTreeMap<String, RecArea>> {
        let facilities: Vec<Facility> = self.read_records(&dir.join(FACILITIES_FILE))?;
        let links: Vec<RecAreaFacilityLink> =
            self.read_records(&dir.join(RECAREA_FACILITIES_FILE))?;
        let recareas: Vec<RecArea> = self.read_records(&dir.join(RECAREAS_FILE))?;

        let facilities_by_id: HashMap<String, Facility> = facilities
            .into_iter()
            .map(|facility| (facility.id.clone(), facility))
            .collect();

        // One-to-many recarea id to facility ids; set-valued so duplicate
        // lookup rows collapse.
        let mut facility_ids_by_recarea: HashMap<String, BTreeSet<String>> = HashMap::new();
        for link in links {
            facility_ids_by_recarea
                .entry(link.recarea_id)
                .or_default()
                .insert(link.facility_id);
        }

        let mut joined = BTreeMap::new();
        for mut recarea in recareas {
            if let Some(facility_ids) = facility_ids_by_recarea.get(&recarea.id) {
                for facility_id in facility_ids {
                    match facilities_by_id.get(facility_id) {
                        Some(facility) => recarea.facilities.push(facility.clone()),
                        None => {
                            warn!(
                                recarea_id = %recarea.id,
                                facility_id = %facility_id,
                                "lookup references unknown facility"
                            );
                        }
                    }
                }
            }
            joined.insert(recarea.id.clone(), recarea);
        }

        debug!(count = joined.len(), "joined recreation areas");
        Ok(joined)
    }

    /// Read one export file: transcode from ISO-8859-1, then unwrap the
    /// RECDATA envelope.
    fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        let bytes = fs::read(path).map_err(|source| PipelineError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let text = encoding_rs::mem::decode_latin1(&bytes);
        let envelope: RecData<T> = serde_json::from_str(&text)?;
        Ok(envelope.records)
    }
}

impl Default for RecAreaReader {
    fn default() -> Self {
        Self::new()
    }
}
