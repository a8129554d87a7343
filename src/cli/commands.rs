use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::error::{PipelineError, Result};
use crate::processors::{Enricher, StationIndex};
use crate::readers::{NormalsReader, ProfileMap, RecAreaReader, StationReader};
use crate::utils::constants::STATIONS_METADATA_FILE;
use crate::utils::progress::ProgressReporter;
use crate::writers::ChunkedJsonWriter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            recareas_dir,
            weather_dir,
            output_dir,
            threshold_km,
            file_size_limit,
            dry_run,
        } => {
            if file_size_limit == 0 {
                return Err(PipelineError::Config(
                    "file size limit must be positive".to_string(),
                ));
            }

            let (profiles, index) = ingest_weather(&weather_dir, cli.quiet)?;

            let spinner = ProgressReporter::new_spinner("Loading recreation areas...", cli.quiet);
            let mut recareas = RecAreaReader::new().load(&recareas_dir)?;
            spinner.finish_with_message(&format!("Loaded {} recreation areas", recareas.len()));

            let progress = ProgressReporter::new(
                recareas.len() as u64,
                "Enriching recreation areas...",
                cli.quiet,
            );
            let enricher = Enricher::new(profiles, index, threshold_km);
            enricher.enrich_all(&mut recareas, Some(&progress))?;
            progress.finish_with_message("Enrichment complete");

            if dry_run {
                println!("Dry run - no output files written");
                return Ok(());
            }

            let writer = ChunkedJsonWriter::with_size_limit(file_size_limit);
            let paths = writer.write(&recareas, &output_dir)?;
            for path in &paths {
                println!("Wrote {}", path.display());
            }
        }

        Commands::Nearest {
            weather_dir,
            latitude,
            longitude,
        } => {
            let (_profiles, index) = ingest_weather(&weather_dir, cli.quiet)?;
            let (station_id, distance) = index.find_closest_station(latitude, longitude)?;
            println!(
                "Nearest station to ({}, {}): {} at {:.2} km",
                latitude, longitude, station_id, distance
            );
        }
    }

    Ok(())
}

/// Ingest the six daily-normal files plus station metadata and build the
/// matcher index. Fails before any query can run if nothing was ingested.
fn ingest_weather(weather_dir: &Path, quiet: bool) -> Result<(ProfileMap, StationIndex)> {
    let spinner = ProgressReporter::new_spinner("Ingesting climate normals...", quiet);

    let profiles = NormalsReader::new().load_profiles(weather_dir)?;
    let locations = StationReader::new()
        .read_locations(&weather_dir.join(STATIONS_METADATA_FILE), &profiles)?;

    spinner.finish_with_message(&format!(
        "Ingested {} stations with complete temperature data",
        locations.len()
    ));

    if locations.is_empty() {
        return Err(PipelineError::NoStations);
    }

    Ok((profiles, StationIndex::new(locations)))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
