// tests/raster_io.rs
use approx::assert_abs_diff_eq;
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use landscape_metrics::io::read_classified_raster;
use landscape_metrics::processing::{calculate_local_metrics, FileOptions, MetricsProcessor};
use std::path::Path;
use tempfile::tempdir;

const GEO_TRANSFORM: [f64; 6] = [500000.0, 30.0, 0.0, 4000000.0, 0.0, -30.0];

/// Helper to write a single-band GeoTIFF with a 30 m north-up geotransform
fn write_tiff<T: GdalType + Copy>(
    path: &Path,
    cols: usize,
    rows: usize,
    data: Vec<T>,
    nodata: Option<f64>,
) {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<T, _>(path, cols, rows, 1)
        .unwrap();
    dataset.set_geo_transform(&GEO_TRANSFORM).unwrap();

    let mut band = dataset.rasterband(1).unwrap();
    band.set_no_data_value(nodata).unwrap();
    let mut buffer = Buffer::new((cols, rows), data);
    band.write((0, 0), (cols, rows), &mut buffer).unwrap();
}

/// 4x3 land-cover tile with nodata 255
fn write_landcover(path: &Path) {
    #[rustfmt::skip]
    let data: Vec<i32> = vec![
        1, 1, 2, 255,
        1, 2, 2, 255,
        3, 3, 255, 1,
    ];
    write_tiff(path, 4, 3, data, Some(255.0));
}

#[test]
fn test_reader_uses_band_nodata_and_geotransform() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("landcover.tif");
    write_landcover(&path);

    let (raster, geo_info) = read_classified_raster(&path, None).unwrap();

    assert_eq!(raster.shape(), (3, 4));
    assert_eq!(raster.nodata(), Some(255));
    assert_eq!(raster.resolution(), 30.0);
    assert_eq!(raster.data()[3], 255);
    assert_eq!(geo_info.geo_transform, GEO_TRANSFORM);
    assert_eq!((geo_info.width, geo_info.height), (4, 3));

    let metrics = calculate_local_metrics(&raster);
    let classes: Vec<i64> = metrics.classes.iter().map(|r| r.class).collect();
    assert_eq!(classes, vec![1, 2, 3]);
    assert_eq!(metrics.summary.valid_pixels, 9);
}

#[test]
fn test_reader_nodata_override_replaces_band_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("landcover.tif");
    write_landcover(&path);

    let (raster, _) = read_classified_raster(&path, Some(1)).unwrap();
    assert_eq!(raster.nodata(), Some(1));

    let metrics = calculate_local_metrics(&raster);
    let classes: Vec<i64> = metrics.classes.iter().map(|r| r.class).collect();
    assert_eq!(classes, vec![2, 3, 255]);
}

#[test]
fn test_reader_ignores_fractional_nodata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fractional.tif");
    write_tiff(&path, 2, 2, vec![1.0f32, 2.0, 2.0, 1.0], Some(0.5));

    let (raster, _) = read_classified_raster(&path, None).unwrap();

    assert_eq!(raster.nodata(), None);
    assert_eq!(raster.data(), &[1, 2, 2, 1]);
    assert_eq!(calculate_local_metrics(&raster).summary.valid_pixels, 4);
}

#[test]
fn test_process_file_writes_report_and_patches() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("landcover.tif");
    let patches = dir.path().join("patches.tif");
    write_landcover(&input);

    let processor = MetricsProcessor::new(Some(2)).unwrap();
    let options = FileOptions {
        patches: Some(patches.clone()),
        ..FileOptions::default()
    };
    let report = processor.process_file(&input, &options).unwrap();

    // Class, CA (0.09 ha pixels), NP
    let expected = [(1, 0.36, 2), (2, 0.27, 1), (3, 0.18, 1)];
    assert_eq!(report.classes.len(), expected.len());
    for (row, (class, ca, np)) in report.classes.iter().zip(expected) {
        assert_eq!(row.class, class);
        assert_abs_diff_eq!(row.ca, ca, epsilon = 1e-9);
        assert_eq!(row.np, np);
        assert!(row.name.is_empty());
    }
    assert_abs_diff_eq!(report.landscape.total_area_ha, 0.9, epsilon = 1e-9);

    let dataset = Dataset::open(&patches).unwrap();
    assert_eq!(dataset.raster_size(), (4, 3));
    assert_eq!(dataset.geo_transform().unwrap(), GEO_TRANSFORM);

    let band = dataset.rasterband(1).unwrap();
    assert_eq!(band.no_data_value(), Some(0.0));

    let ids = band.read_as::<i32>((0, 0), (4, 3), (4, 3), None).unwrap();
    // class 1 takes ids 1-2, class 2 id 3, class 3 id 4
    #[rustfmt::skip]
    let expected_ids = vec![
        1, 1, 3, 0,
        1, 3, 3, 0,
        4, 4, 0, 2,
    ];
    assert_eq!(ids.data(), expected_ids.as_slice());
}

#[test]
fn test_process_file_reports_missing_input() {
    let dir = tempdir().unwrap();
    let processor = MetricsProcessor::new(Some(1)).unwrap();

    let result = processor.process_file(&dir.path().join("missing.tif"), &FileOptions::default());
    assert!(result.is_err());
}
