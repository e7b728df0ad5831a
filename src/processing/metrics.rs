// src/processing/metrics.rs
//! Class- and landscape-level metrics for a classified raster.
//!
//! For every class present in the valid pixels the engine reports class
//! area, percentage of landscape, number of 8-connected patches, mean patch
//! area and an edge estimate. The landscape summary carries Shannon's
//! diversity index and the class richness.
//!
//! Edge length is an approximation, not a true patch perimeter: the class
//! mask is dilated by one pixel with a 4-neighbour cross and every valid,
//! newly covered pixel contributes one pixel width of edge. Raster borders
//! and nodata pixels therefore contribute no edge.

use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::labeling::{component_sizes, label_cells, Connectivity};
use super::morphology::dilate;
use crate::error::Result;
use crate::raster::{ClassifiedRaster, ValidMask};
use crate::utils::round_metric;

/// Metrics of one class, floats rounded to four decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetricRow {
    pub class: i64,
    /// Class area (ha)
    pub ca: f64,
    /// Percentage of landscape
    pub pland: f64,
    /// Number of patches
    pub np: usize,
    /// Mean patch area (ha)
    pub area_mn: f64,
    /// Total edge (m), approximate
    pub te: f64,
    /// Edge density (m/ha)
    pub ed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandscapeSummary {
    /// Shannon's diversity index
    pub shdi: f64,
    /// Number of classes present
    pub richness: usize,
    /// Area of all valid pixels (ha), unrounded
    pub total_area_ha: f64,
    pub valid_pixels: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandscapeMetrics {
    /// One row per class, ascending by class id
    pub classes: Vec<ClassMetricRow>,
    pub summary: LandscapeSummary,
}

impl LandscapeMetrics {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class(&self, class: i64) -> Option<&ClassMetricRow> {
        self.classes
            .binary_search_by_key(&class, |row| row.class)
            .ok()
            .map(|i| &self.classes[i])
    }
}

/// Compute class and landscape metrics over the valid pixels of `raster`.
///
/// A raster without valid pixels yields an empty table and a zeroed summary.
pub fn calculate_local_metrics(raster: &ClassifiedRaster) -> LandscapeMetrics {
    compute(raster, &raster.valid_mask())
}

/// Like [`calculate_local_metrics`], additionally restricted to the pixels
/// set in `mask` (e.g. a region of interest).
pub fn calculate_local_metrics_masked(
    raster: &ClassifiedRaster,
    mask: &ValidMask,
) -> Result<LandscapeMetrics> {
    let mask = raster.valid_mask().intersect(mask)?;
    Ok(compute(raster, &mask))
}

/// Build a raster from nested rows and compute its metrics.
pub fn calculate_local_metrics_from_rows(
    grid: &[Vec<i64>],
    resolution: f64,
    nodata: Option<i64>,
) -> Result<LandscapeMetrics> {
    let raster = ClassifiedRaster::from_rows(grid, resolution, nodata)?;
    Ok(calculate_local_metrics(&raster))
}

/// `-sum(p * ln p)` over the non-zero proportions.
pub fn shannon_diversity(proportions: impl IntoIterator<Item = f64>) -> f64 {
    let mut h = 0.0;
    for p in proportions.into_iter().filter(|&p| p > 0.0) {
        h -= p * p.ln();
    }
    h
}

struct ClassStats {
    class: i64,
    pixels: usize,
    patch_sizes: Vec<usize>,
    boundary_pixels: usize,
}

fn compute(raster: &ClassifiedRaster, mask: &ValidMask) -> LandscapeMetrics {
    let valid_pixels = mask.count();
    if valid_pixels == 0 {
        info!("Raster has no valid pixels, returning empty metrics");
        return LandscapeMetrics::default();
    }

    let (rows, cols) = raster.shape();
    let valid = mask.cells();
    let data = raster.data();

    let pixel_area_ha = raster.pixel_area_ha();
    let total_area_ha = valid_pixels as f64 * pixel_area_ha;

    // nodata is dropped explicitly, even if the mask would let it through
    let classes: Vec<i64> = data
        .iter()
        .zip(valid)
        .filter(|&(&v, &ok)| ok && raster.is_valid_value(v))
        .map(|(&v, _)| v)
        .sorted_unstable()
        .dedup()
        .collect();

    debug!(
        "Computing metrics for {} classes over {} valid pixels ({}x{})",
        classes.len(),
        valid_pixels,
        rows,
        cols
    );

    let stats: Vec<ClassStats> = classes
        .par_iter()
        .map(|&class| class_stats(class, data, valid, rows, cols))
        .collect();

    let summary = LandscapeSummary {
        shdi: round_metric(shannon_diversity(
            stats.iter().map(|s| s.pixels as f64 / valid_pixels as f64),
        )),
        richness: stats.len(),
        total_area_ha,
        valid_pixels,
    };

    let classes = stats
        .iter()
        .map(|s| class_row(s, raster.resolution(), pixel_area_ha, total_area_ha))
        .collect();

    info!(
        "Landscape: {} classes, SHDI {:.4}, total area {:.4} ha",
        summary.richness, summary.shdi, summary.total_area_ha
    );

    LandscapeMetrics { classes, summary }
}

fn class_stats(class: i64, data: &[i64], valid: &[bool], rows: usize, cols: usize) -> ClassStats {
    let class_mask: Vec<bool> = data
        .iter()
        .zip(valid)
        .map(|(&v, &ok)| ok && v == class)
        .collect();
    let pixels = class_mask.iter().filter(|&&c| c).count();

    let (labels, count) = label_cells(&class_mask, rows, cols, Connectivity::Eight);
    let patch_sizes = component_sizes(&labels, count);

    let dilated = dilate(&class_mask, rows, cols, Connectivity::Four);
    let boundary_pixels = dilated
        .iter()
        .zip(&class_mask)
        .zip(valid)
        .filter(|&((&d, &c), &ok)| d && !c && ok)
        .count();

    ClassStats {
        class,
        pixels,
        patch_sizes,
        boundary_pixels,
    }
}

fn class_row(
    stats: &ClassStats,
    resolution: f64,
    pixel_area_ha: f64,
    total_area_ha: f64,
) -> ClassMetricRow {
    let ca = stats.pixels as f64 * pixel_area_ha;
    let np = stats.patch_sizes.len();
    let area_mn = if np == 0 {
        0.0
    } else {
        stats
            .patch_sizes
            .iter()
            .map(|&size| size as f64 * pixel_area_ha)
            .sum::<f64>()
            / np as f64
    };
    let te = stats.boundary_pixels as f64 * resolution;

    ClassMetricRow {
        class: stats.class,
        ca: round_metric(ca),
        pland: round_metric(100.0 * ca / total_area_ha),
        np,
        area_mn: round_metric(area_mn),
        te: round_metric(te),
        ed: round_metric(te / total_area_ha),
    }
}
