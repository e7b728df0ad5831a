// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{read_classified_raster, GeoInfo};
pub use writer::{write_csv, write_json, write_patch_raster, write_report, OutputFormat};
