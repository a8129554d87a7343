use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

use ridb_enricher::processors::{Enricher, StationIndex};
use ridb_enricher::readers::{NormalsReader, RecAreaReader, StationReader};
use ridb_enricher::writers::ChunkedJsonWriter;

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

/// Three complete stations plus one missing min-temp coverage. The
/// incomplete station (STBAD) sits closer to the Atlanta recarea than STATL
/// does, so the purge is observable in the match result.
fn write_weather_fixture(dir: &Path) {
    write_file(
        dir,
        "dly-tavg-normal.txt",
        "STATL 1 00150C 00160C\nSTNYC 1 00050C 00060C\nSTLAX 1 00180C 00190C\nSTBAD 1 00100C 00110C\n",
    );
    write_file(
        dir,
        "dly-tmax-normal.txt",
        "STATL 1 00250C 00260C\nSTNYC 1 00150C 00160C\nSTLAX 1 00280C 00290C\nSTBAD 1 00200C 00210C\n",
    );
    write_file(
        dir,
        "dly-tmin-normal.txt",
        "STATL 1 00050C 00060C\nSTNYC 1 -0050C -0040C\nSTLAX 1 00080C 00090C\n",
    );
    write_file(dir, "dly-prcp-25pctl.txt", "STATL 1 00010P 00020P\n");
    write_file(dir, "dly-prcp-50pctl.txt", "STATL 1 00030P 00040P\n");
    write_file(dir, "dly-prcp-75pctl.txt", "STATL 1 00050P 00060P\n");
    write_file(
        dir,
        "ghcnd-stations.txt",
        "STATL  33.7500  -84.3900  300.0 GA ATLANTA\n\
         STNYC  40.7100  -74.0000   10.0 NY NEW YORK\n\
         STLAX  34.0500 -118.2400  100.0 CA LOS ANGELES\n\
         STBAD  33.7600  -84.4000  300.0 GA INCOMPLETE\n",
    );
}

fn write_recarea_fixture(dir: &Path) {
    write_file(
        dir,
        "RecAreas_API_v1.json",
        r#"{"RECDATA": [
            {"RecAreaID": "100", "RecAreaName": "Atlanta Forest",
             "RecAreaDescription": "<p>Close to the city &amp; the woods.</p>",
             "RecAreaDirections": "Take <b>I-75</b> north.",
             "RecAreaLatitude": 33.82, "RecAreaLongitude": -84.32},
            {"RecAreaID": "200", "RecAreaName": "Prairie Reserve",
             "RecAreaDescription": "<p>Remote.</p>",
             "RecAreaLatitude": 39.0, "RecAreaLongitude": -98.0},
            {"RecAreaID": "300", "RecAreaName": "Unmapped Area",
             "RecAreaLatitude": "", "RecAreaLongitude": ""}
        ]}"#,
    );
    write_file(
        dir,
        "Facilities_API_v1.json",
        r#"{"RECDATA": [
            {"FacilityID": "10", "FacilityName": "Creekside Campground",
             "FacilityDescription": "Overview A quiet campground. Natural Features: Hardwood forest. Recreation: Fishing. Facilities: 30 sites.",
             "FacilityDirections": "Past the <i>ranger station</i>.",
             "LegacyFacilityID": "70989"},
            {"FacilityID": "30", "FacilityName": "Prairie Shelter",
             "FacilityDescription": "Overview Rustic shelter. Natural Features: Grassland. Recreation: Walking. Facilities: None.",
             "FacilityDirections": "Follow the <i>old trail</i>.",
             "LegacyFacilityID": "555"}
        ]}"#,
    );
    write_file(
        dir,
        "RecAreaFacilities_API_v1.json",
        r#"{"RECDATA": [
            {"RecAreaID": "100", "FacilityID": "10"},
            {"RecAreaID": "300", "FacilityID": "30"}
        ]}"#,
    );
}

fn run_pipeline(weather_dir: &Path, recareas_dir: &Path, out_dir: &Path) -> Vec<std::path::PathBuf> {
    let profiles = NormalsReader::new().load_profiles(weather_dir).unwrap();
    let locations = StationReader::new()
        .read_locations(&weather_dir.join("ghcnd-stations.txt"), &profiles)
        .unwrap();
    let index = StationIndex::new(locations);

    let mut recareas = RecAreaReader::new().load(recareas_dir).unwrap();
    Enricher::new(profiles, index, 15.0)
        .enrich_all(&mut recareas, None)
        .unwrap();

    ChunkedJsonWriter::with_size_limit(600)
        .write(&recareas, out_dir)
        .unwrap()
}

fn reassemble(paths: &[std::path::PathBuf]) -> BTreeMap<String, Value> {
    let document: String = paths
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    serde_json::from_str(&document).unwrap()
}

#[test]
fn test_full_pipeline() {
    let weather_dir = TempDir::new().unwrap();
    let recareas_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_weather_fixture(weather_dir.path());
    write_recarea_fixture(recareas_dir.path());

    let paths = run_pipeline(weather_dir.path(), recareas_dir.path(), out_dir.path());
    assert!(paths.len() > 1, "fixture should span multiple chunks");
    let recareas = reassemble(&paths);

    assert_eq!(recareas.len(), 3);

    // Atlanta recarea: nearest *complete* station attached, incomplete
    // neighbor ignored, markup cleaned
    let atlanta = &recareas["100"];
    assert_eq!(atlanta["RecAreaWeatherStationID"], "STATL");
    assert!(atlanta["RecAreaWeatherStationDist"].as_f64().unwrap() < 15.0);
    assert_eq!(
        atlanta["RecAreaDescription"],
        "Close to the city & the woods."
    );
    assert_eq!(atlanta["RecAreaDirections"], "Take I-75 north.");

    let weather = &atlanta["RecAreaWeatherDict"];
    assert_eq!(weather["1"]["average_temp"], 15.0);
    assert_eq!(weather["1"]["max_temp"], 25.0);
    assert_eq!(weather["1"]["min_temp"], 5.0);
    assert_eq!(weather["1"]["quartile_50_precip"], 30.0);
    assert_eq!(weather["2"]["average_temp"], 16.0);

    // facility joined, description split, reservation URL derived
    let facility = &atlanta["facilities"][0];
    assert_eq!(facility["FacilityID"], "10");
    assert_eq!(
        facility["FacilityDescription"]["overview"],
        " A quiet campground. "
    );
    assert_eq!(
        facility["FacilityDescription"]["natural_features"],
        " Hardwood forest. "
    );
    assert_eq!(facility["FacilityDirections"], "Past the ranger station.");
    assert_eq!(
        facility["ReservationUrl"],
        "http://www.recreation.gov/campsiteCalendar.do?page=''matrix&contractCode=NRSO&parkId=70989"
    );

    // remote recarea: no station within threshold, weather fields absent,
    // markup untouched
    let prairie = &recareas["200"];
    assert!(prairie.get("RecAreaWeatherStationID").is_none());
    assert!(prairie.get("RecAreaWeatherDict").is_none());
    assert_eq!(prairie["RecAreaDescription"], "<p>Remote.</p>");

    // recarea without coordinates is carried through unenriched, its
    // facility left raw
    let unmapped = &recareas["300"];
    assert!(unmapped.get("RecAreaWeatherStationID").is_none());
    assert_eq!(unmapped["RecAreaName"], "Unmapped Area");
    let shelter = &unmapped["facilities"][0];
    assert!(shelter["FacilityDescription"].is_string());
    assert_eq!(shelter["FacilityDirections"], "Follow the <i>old trail</i>.");
    assert!(shelter.get("ReservationUrl").is_none());
}

#[test]
fn test_incomplete_station_is_absent_from_profiles_and_index() {
    let weather_dir = TempDir::new().unwrap();
    write_weather_fixture(weather_dir.path());

    let profiles = NormalsReader::new()
        .load_profiles(weather_dir.path())
        .unwrap();
    assert!(!profiles.contains_key("STBAD"));
    assert_eq!(profiles.len(), 3);

    let locations = StationReader::new()
        .read_locations(&weather_dir.path().join("ghcnd-stations.txt"), &profiles)
        .unwrap();
    assert_eq!(locations.len(), 3);
    assert!(locations.iter().all(|l| l.id != "STBAD"));
}

#[test]
fn test_pipeline_is_deterministic() {
    let weather_dir = TempDir::new().unwrap();
    let recareas_dir = TempDir::new().unwrap();
    write_weather_fixture(weather_dir.path());
    write_recarea_fixture(recareas_dir.path());

    let out_a = TempDir::new().unwrap();
    let out_b = TempDir::new().unwrap();
    let paths_a = run_pipeline(weather_dir.path(), recareas_dir.path(), out_a.path());
    let paths_b = run_pipeline(weather_dir.path(), recareas_dir.path(), out_b.path());

    let document_a: String = paths_a.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
    let document_b: String = paths_b.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
    assert_eq!(document_a, document_b);
}
