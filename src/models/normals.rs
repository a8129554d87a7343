use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The six NOAA daily-normal variables ingested per station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateVariable {
    AverageTemp,
    MaxTemp,
    MinTemp,
    Precip25,
    Precip50,
    Precip75,
}

impl ClimateVariable {
    pub const ALL: [ClimateVariable; 6] = [
        ClimateVariable::AverageTemp,
        ClimateVariable::MaxTemp,
        ClimateVariable::MinTemp,
        ClimateVariable::Precip25,
        ClimateVariable::Precip50,
        ClimateVariable::Precip75,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClimateVariable::AverageTemp => "average_temp",
            ClimateVariable::MaxTemp => "max_temp",
            ClimateVariable::MinTemp => "min_temp",
            ClimateVariable::Precip25 => "quartile_25_precip",
            ClimateVariable::Precip50 => "quartile_50_precip",
            ClimateVariable::Precip75 => "quartile_75_precip",
        }
    }

    /// Fixed-point divisor applied after integer parsing. Temperatures are
    /// published in tenths of a degree; precipitation percentiles are already
    /// in final units.
    pub fn divisor(self) -> f64 {
        match self {
            ClimateVariable::AverageTemp | ClimateVariable::MaxTemp | ClimateVariable::MinTemp => {
                10.0
            }
            _ => 1.0,
        }
    }

    /// Standard file name within the normals data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ClimateVariable::AverageTemp => "dly-tavg-normal.txt",
            ClimateVariable::MaxTemp => "dly-tmax-normal.txt",
            ClimateVariable::MinTemp => "dly-tmin-normal.txt",
            ClimateVariable::Precip25 => "dly-prcp-25pctl.txt",
            ClimateVariable::Precip50 => "dly-prcp-50pctl.txt",
            ClimateVariable::Precip75 => "dly-prcp-75pctl.txt",
        }
    }
}

/// Partial climate record for one day of the year. Fields absent in the
/// source (or removed as sentinels) stay `None` and are omitted from output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayNormals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_temp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartile_25_precip: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartile_50_precip: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartile_75_precip: Option<f64>,
}

impl DayNormals {
    pub fn set(&mut self, variable: ClimateVariable, value: f64) {
        match variable {
            ClimateVariable::AverageTemp => self.average_temp = Some(value),
            ClimateVariable::MaxTemp => self.max_temp = Some(value),
            ClimateVariable::MinTemp => self.min_temp = Some(value),
            ClimateVariable::Precip25 => self.quartile_25_precip = Some(value),
            ClimateVariable::Precip50 => self.quartile_50_precip = Some(value),
            ClimateVariable::Precip75 => self.quartile_75_precip = Some(value),
        }
    }

    pub fn has_complete_temperature(&self) -> bool {
        self.average_temp.is_some() && self.max_temp.is_some() && self.min_temp.is_some()
    }
}

/// Day-of-year (1-366) to climate record, for one station.
pub type StationProfile = BTreeMap<u16, DayNormals>;
