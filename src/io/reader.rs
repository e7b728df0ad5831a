// src/io/reader.rs
use gdal::Dataset;
use log::{debug, warn};
use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::ClassifiedRaster;

/// Georeferencing of a raster read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct GeoInfo {
    pub projection: String,
    pub geo_transform: [f64; 6],
    pub width: usize,
    pub height: usize,
}

/// Read band 1 of a classified raster.
///
/// The pixel resolution is taken from the geotransform. `nodata_override`
/// replaces the band's own nodata value when given.
pub fn read_classified_raster(
    path: &Path,
    nodata_override: Option<i64>,
) -> Result<(ClassifiedRaster, GeoInfo)> {
    let dataset = Dataset::open(path)?;
    let (width, height) = dataset.raster_size();
    let projection = dataset.projection();
    let geo_transform = dataset.geo_transform()?;

    if dataset.raster_count() > 1 {
        warn!(
            "{} has {} bands, only band 1 is used",
            path.display(),
            dataset.raster_count()
        );
    }

    let res_x = geo_transform[1].abs();
    let res_y = geo_transform[5].abs();
    if (res_x - res_y).abs() > f64::EPSILON * res_x.max(1.0) {
        warn!(
            "{} has non-square pixels ({} x {}), using {} as resolution",
            path.display(),
            res_x,
            res_y,
            res_x
        );
    }

    let band = dataset.rasterband(1)?;
    let nodata = match nodata_override {
        Some(value) => Some(value),
        None => band.no_data_value().and_then(|value| {
            let class = nodata_as_class(value);
            if class.is_none() {
                warn!(
                    "Ignoring nodata value {} of {}: not an integer class value",
                    value,
                    path.display()
                );
            }
            class
        }),
    };

    let buffer = band.read_as::<i32>((0, 0), (width, height), (width, height), None)?;
    let data: Vec<i64> = buffer.data().iter().map(|&v| i64::from(v)).collect();

    debug!(
        "Read {} ({}x{}, resolution {}, nodata {:?})",
        path.display(),
        width,
        height,
        res_x,
        nodata
    );

    let raster = ClassifiedRaster::new(height, width, data, res_x, nodata).map_err(|e| match e {
        Error::InvalidInput(msg) => Error::InvalidInput(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    let geo_info = GeoInfo {
        projection,
        geo_transform,
        width,
        height,
    };

    Ok((raster, geo_info))
}

/// A band nodata value usable as a class sentinel: finite and integral.
pub fn nodata_as_class(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_nodata_becomes_class_sentinel() {
        assert_eq!(nodata_as_class(0.0), Some(0));
        assert_eq!(nodata_as_class(-9999.0), Some(-9999));
        assert_eq!(nodata_as_class(255.0), Some(255));
    }

    #[test]
    fn fractional_or_nan_nodata_is_ignored() {
        assert_eq!(nodata_as_class(-3.4e38), None);
        assert_eq!(nodata_as_class(f64::NAN), None);
        assert_eq!(nodata_as_class(0.5), None);
        assert_eq!(nodata_as_class(f64::NEG_INFINITY), None);
    }
}
