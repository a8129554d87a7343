use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::normals::StationProfile;

/// Envelope wrapping every RIDB export file.
#[derive(Debug, Deserialize)]
pub struct RecData<T> {
    #[serde(rename = "RECDATA", default = "Vec::new")]
    pub records: Vec<T>,
}

/// One row of the recarea-to-facility lookup file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecAreaFacilityLink {
    #[serde(rename = "RecAreaID", deserialize_with = "id_string")]
    pub recarea_id: String,

    #[serde(rename = "FacilityID", deserialize_with = "id_string")]
    pub facility_id: String,
}

/// A top-level recreation area record. Fields the pipeline touches are typed;
/// everything else in the source record is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecArea {
    #[serde(rename = "RecAreaID", deserialize_with = "id_string")]
    pub id: String,

    #[serde(rename = "RecAreaDescription", default)]
    pub description: String,

    #[serde(rename = "RecAreaDirections", default)]
    pub directions: String,

    #[serde(
        rename = "RecAreaLatitude",
        default,
        deserialize_with = "optional_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,

    #[serde(
        rename = "RecAreaLongitude",
        default,
        deserialize_with = "optional_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,

    #[serde(rename = "facilities", default, skip_serializing_if = "Vec::is_empty")]
    pub facilities: Vec<Facility>,

    #[serde(
        rename = "RecAreaWeatherStationID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub weather_station_id: Option<String>,

    #[serde(
        rename = "RecAreaWeatherStationDist",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub weather_station_dist: Option<f64>,

    #[serde(
        rename = "RecAreaWeatherDict",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<StationProfile>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecArea {
    /// Query coordinate for station matching; both fields must be present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A bookable sub-site belonging to exactly one recreation area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "FacilityID", deserialize_with = "id_string")]
    pub id: String,

    #[serde(rename = "FacilityDescription", default)]
    pub description: FacilityDescription,

    #[serde(rename = "FacilityDirections", default)]
    pub directions: String,

    #[serde(
        rename = "LegacyFacilityID",
        default,
        deserialize_with = "optional_id_string"
    )]
    pub legacy_id: Option<String>,

    #[serde(
        rename = "ReservationUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reservation_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw on input; replaced with split sections during enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacilityDescription {
    Sections(DescriptionSections),
    Raw(String),
}

impl Default for FacilityDescription {
    fn default() -> Self {
        FacilityDescription::Raw(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionSections {
    pub overview: String,
    pub natural_features: String,
    pub recreation: String,
    pub facilities: String,
}

/// RIDB exports are inconsistent about numeric vs string ids.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Coordinates appear as numbers, numeric strings, or empty strings. Anything
/// unusable is treated as absent; such recareas are skipped by the matcher.
fn optional_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
