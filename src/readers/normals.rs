use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{ClimateVariable, StationProfile};
use crate::utils::constants::{NO_DATA_SENTINEL, REFERENCE_YEAR};

/// Station id to per-day-of-year climate profile.
pub type ProfileMap = HashMap<String, StationProfile>;

/// Reader for NOAA daily climate-normal files.
///
/// Each line is one station-month: `station-id month day-value...`, with one
/// whitespace-separated token per day. Day tokens carry a trailing flag
/// character; the numeric part is a scaled integer.
pub struct NormalsReader;

impl NormalsReader {
    pub fn new() -> Self {
        Self
    }

    /// Read all six variable files from `dir`, then purge stations with
    /// incomplete temperature coverage.
    pub fn load_profiles(&self, dir: &Path) -> Result<ProfileMap> {
        let mut profiles = ProfileMap::new();

        for variable in ClimateVariable::ALL {
            let path = dir.join(variable.file_name());
            self.read_variable_file(&mut profiles, &path, variable)?;
        }

        self.purge_incomplete_stations(&mut profiles);
        Ok(profiles)
    }

    /// Read a single daily-normal file, augmenting existing per-day records.
    pub fn read_variable_file(
        &self,
        profiles: &mut ProfileMap,
        path: &Path,
        variable: ClimateVariable,
    ) -> Result<()> {
        let file = File::open(path).map_err(|source| PipelineError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let file_label = path.display().to_string();

        for line_result in reader.lines() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            self.parse_station_month(profiles, &line, variable, &file_label)?;
        }

        debug!(file = %file_label, label = variable.label(), "read normals file");
        Ok(())
    }

    fn parse_station_month(
        &self,
        profiles: &mut ProfileMap,
        line: &str,
        variable: ClimateVariable,
        file: &str,
    ) -> Result<()> {
        // Sentinel tokens are dropped before positional indexing, so a
        // mid-month sentinel shifts the remaining days of that month backward.
        // Existing consumers of the derived output depend on this alignment.
        let mut tokens = line.split_whitespace().filter(|t| !is_sentinel(t));

        let station_id = tokens
            .next()
            .ok_or_else(|| PipelineError::InvalidFormat(format!("empty line in {}", file)))?;
        let month_token = tokens.next().ok_or_else(|| {
            PipelineError::InvalidFormat(format!("missing month in {}, line: '{}'", file, line))
        })?;
        let month: u32 = month_token
            .parse()
            .map_err(|_| PipelineError::MalformedValue {
                file: file.to_string(),
                line: line.to_string(),
                token: month_token.to_string(),
            })?;

        let profile = profiles.entry(station_id.to_string()).or_default();

        for (index, token) in tokens.enumerate() {
            let day = index as u32 + 1;
            let day_of_year = day_of_year(month, day)?;
            let value = parse_day_token(token, file, line)? / variable.divisor();
            profile.entry(day_of_year).or_default().set(variable, value);
        }

        Ok(())
    }

    /// A station is kept only if every one of its day records carries all
    /// three temperature fields. Precipitation-only stations are discarded.
    fn purge_incomplete_stations(&self, profiles: &mut ProfileMap) {
        let before = profiles.len();
        profiles.retain(|_, profile| profile.values().all(|day| day.has_complete_temperature()));
        debug!(
            kept = profiles.len(),
            purged = before - profiles.len(),
            "applied temperature-completeness filter"
        );
    }
}

impl Default for NormalsReader {
    fn default() -> Self {
        Self::new()
    }
}

/// The no-data marker appears bare in the published files, but tolerate a
/// trailing flag character on it as well.
fn is_sentinel(token: &str) -> bool {
    token == NO_DATA_SENTINEL
        || token
            .strip_suffix(|c: char| !c.is_ascii_digit())
            .is_some_and(|body| body == NO_DATA_SENTINEL)
}

/// Day-of-year against a leap reference year, so Feb 29 is well-defined.
fn day_of_year(month: u32, day: u32) -> Result<u16> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|date| date.ordinal() as u16)
        .ok_or_else(|| {
            PipelineError::InvalidFormat(format!("no day {} in month {}", day, month))
        })
}

/// Drop the trailing flag character and parse the remainder as a signed
/// integer. A token that fails here is fatal; skipping it silently would
/// corrupt day-of-year alignment further.
fn parse_day_token(token: &str, file: &str, line: &str) -> Result<f64> {
    let malformed = || PipelineError::MalformedValue {
        file: file.to_string(),
        line: line.to_string(),
        token: token.to_string(),
    };

    let body = token
        .char_indices()
        .last()
        .map(|(idx, _)| &token[..idx])
        .ok_or_else(|| malformed())?;

    let magnitude: i64 = body.parse().map_err(|_| malformed())?;
    Ok(magnitude as f64)
}
