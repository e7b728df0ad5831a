// src/io/writer.rs
use clap::ValueEnum;
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{DriverManager, Metadata};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::reader::GeoInfo;
use crate::error::{Error, Result};
use crate::processing::labeling::PatchLabels;
use crate::report::Report;

/// Serialization of the metrics table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Column names of the CSV report, in [`crate::report::ReportRow`] field order
pub const CSV_HEADER: [&str; 8] = ["class", "name", "ca", "pland", "np", "area_mn", "te", "ed"];

/// Header line, then one line per class. An empty report is just the header.
pub fn write_csv<W: Write>(writer: W, report: &Report) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for row in &report.classes {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the report to `output`, or to stdout when no path is given.
pub fn write_report(output: Option<&Path>, format: OutputFormat, report: &Report) -> Result<()> {
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_formatted(writer, format, report)
        }
        None => write_formatted(io::stdout().lock(), format, report),
    }
}

fn write_formatted<W: Write>(writer: W, format: OutputFormat, report: &Report) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(writer, report),
        OutputFormat::Json => write_json(writer, report),
    }
}

/// Write patch ids as a single-band Int32 GeoTIFF with nodata 0.
pub fn write_patch_raster(output_path: &Path, patches: &PatchLabels, geo_info: &GeoInfo) -> Result<()> {
    if patches.rows != geo_info.height || patches.cols != geo_info.width {
        return Err(Error::ShapeMismatch {
            raster: (geo_info.height, geo_info.width),
            mask: (patches.rows, patches.cols),
        });
    }

    let patch_ids = patches
        .labels
        .iter()
        .map(|&label| i32::try_from(label))
        .collect::<std::result::Result<Vec<i32>, _>>()
        .map_err(|_| Error::InvalidInput(format!("{} patches do not fit an Int32 raster", patches.count)))?;

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let creation_options = RasterCreationOptions::from_iter(["COMPRESS=DEFLATE", "TILED=YES"]);

    let mut out_ds = driver.create_with_band_type_with_options::<i32, _>(
        output_path,
        geo_info.width,
        geo_info.height,
        1,
        &creation_options,
    )?;

    if !geo_info.projection.is_empty() {
        out_ds.set_projection(&geo_info.projection)?;
    }
    out_ds.set_geo_transform(&geo_info.geo_transform)?;

    let mut band = out_ds.rasterband(1)?;
    band.set_no_data_value(Some(0.0))?;
    band.set_description("patch id")?;

    let mut buffer = Buffer::new((geo_info.width, geo_info.height), patch_ids);
    band.write((0, 0), (geo_info.width, geo_info.height), &mut buffer)?;

    out_ds.flush_cache()?;

    Ok(())
}
