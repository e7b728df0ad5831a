// src/lib.rs
pub mod batch;
pub mod cli;
pub mod error;
pub mod io;
pub mod legend;
pub mod processing;
pub mod raster;
pub mod report;
pub mod utils;

pub use error::{Error, Result};
pub use processing::{calculate_local_metrics, ClassMetricRow, LandscapeMetrics, LandscapeSummary};
pub use raster::{ClassifiedRaster, ValidMask};

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
