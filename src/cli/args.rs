use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::constants::{DEFAULT_FILE_SIZE_LIMIT, DEFAULT_THRESHOLD_KM};

#[derive(Parser)]
#[command(name = "ridb-enricher")]
#[command(about = "Enriches RIDB recreation data with NOAA daily climate normals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join, enrich, and write the chunked recarea database files
    Build {
        #[arg(long, help = "Directory containing the RIDB JSON exports")]
        recareas_dir: PathBuf,

        #[arg(long, help = "Directory containing the daily-normal and station metadata files")]
        weather_dir: PathBuf,

        #[arg(short, long, default_value = "files", help = "Output directory for JSON chunks")]
        output_dir: PathBuf,

        #[arg(
            long,
            default_value_t = DEFAULT_THRESHOLD_KM,
            help = "Maximum station distance (km) for attaching weather data"
        )]
        threshold_km: f64,

        #[arg(
            long,
            default_value_t = DEFAULT_FILE_SIZE_LIMIT,
            help = "Output chunk size limit in bytes"
        )]
        file_size_limit: usize,

        #[arg(long, default_value = "false", help = "Run the pipeline without writing output")]
        dry_run: bool,
    },

    /// Ingest weather data and report the station nearest to a coordinate
    Nearest {
        #[arg(long, help = "Directory containing the daily-normal and station metadata files")]
        weather_dir: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },
}
