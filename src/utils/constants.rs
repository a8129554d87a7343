/// Token marking an unrecorded climate value; removed before parsing.
pub const NO_DATA_SENTINEL: &str = "-8888";

/// Leap reference year so day-of-year is defined for Feb 29.
pub const REFERENCE_YEAR: i32 = 2000;

/// Station metadata file name (GHCN-D)
pub const STATIONS_METADATA_FILE: &str = "ghcnd-stations.txt";

/// RIDB export file names
pub const RECAREAS_FILE: &str = "RecAreas_API_v1.json";
pub const FACILITIES_FILE: &str = "Facilities_API_v1.json";
pub const RECAREA_FACILITIES_FILE: &str = "RecAreaFacilities_API_v1.json";

/// Maximum great-circle distance (km) at which a station's climate profile
/// is attached to a recreation area.
pub const DEFAULT_THRESHOLD_KM: f64 = 15.0;

/// Output chunking
pub const DEFAULT_FILE_SIZE_LIMIT: usize = 30_000_000;

/// Reservation calendar URL, parameterized by legacy facility id.
pub const RESERVATION_URL_PREFIX: &str =
    "http://www.recreation.gov/campsiteCalendar.do?page=''matrix&contractCode=NRSO&parkId=";
