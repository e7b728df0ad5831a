use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::OutputFormat;

#[derive(Parser)]
#[command(name = "landscape-metrics")]
#[command(about = "Patch, area, edge and diversity metrics for classified land-cover rasters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Worker threads (default: number of CPUs)
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute class and landscape metrics of a classified raster
    Metrics {
        /// Classified raster (band 1 is used)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Nodata class value, overrides the raster's own nodata
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        nodata: Option<i64>,

        /// Dataset id used to name classes (e.g. ESA/WorldCover/v100)
        #[arg(short = 'd', long)]
        dataset: Option<String>,

        /// Also write a GeoTIFF of patch ids
        #[arg(short = 'p', long)]
        patches: Option<PathBuf>,
    },

    /// Run the operations listed in a JSON batch file
    Batch {
        /// Batch configuration
        #[arg(short = 'c', long)]
        config: PathBuf,
    },

    /// List the class names of a land-cover dataset
    Classes {
        /// Dataset id (e.g. MODIS/061/MCD12Q1)
        #[arg(short = 'd', long)]
        dataset: String,
    },
}
