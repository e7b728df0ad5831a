// src/raster.rs
//! Classified raster grid and its validity mask.

use crate::error::{Error, Result};

/// Largest grid the engine accepts. Patch ids are stored as `u32` and every
/// patch holds at least one pixel, so the cell count bounds the id range.
pub const MAX_CELLS: usize = u32::MAX as usize;

/// `rows * cols`, or [`Error::InvalidInput`] when the product overflows.
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidInput(format!("grid shape {rows}x{cols} overflows the cell count"))
    })
}

/// Single-band grid of integer class labels (row-major, origin top-left).
///
/// Pixels are assumed square; `resolution` is the linear pixel size in
/// metres. A pixel holding the `nodata` value is excluded from every metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRaster {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
    resolution: f64,
    nodata: Option<i64>,
}

impl ClassifiedRaster {
    /// Build a raster from row-major cell values.
    ///
    /// Fails with [`Error::InvalidInput`] when `data` does not hold exactly
    /// `rows * cols` cells, when the grid is larger than [`MAX_CELLS`] or when
    /// `resolution` is not a positive finite number.
    pub fn new(
        rows: usize,
        cols: usize,
        data: Vec<i64>,
        resolution: f64,
        nodata: Option<i64>,
    ) -> Result<Self> {
        let expected = cell_count(rows, cols)?;
        if expected > MAX_CELLS {
            return Err(Error::InvalidInput(format!(
                "grid of {rows}x{cols} cells exceeds the limit of {MAX_CELLS} cells"
            )));
        }

        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "grid holds {} cells, expected {rows}x{cols} = {expected}",
                data.len()
            )));
        }

        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "pixel resolution must be a positive number, got {resolution}"
            )));
        }

        Ok(Self {
            rows,
            cols,
            data,
            resolution,
            nodata,
        })
    }

    /// Build a raster from nested rows. Every row must have the same length.
    pub fn from_rows(grid: &[Vec<i64>], resolution: f64, nodata: Option<i64>) -> Result<Self> {
        let cols = grid.first().map_or(0, Vec::len);

        if let Some((index, row)) = grid.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(Error::InvalidInput(format!(
                "grid is not rectangular: row {index} has {} columns, expected {cols}",
                row.len()
            )));
        }

        Self::new(grid.len(), cols, grid.concat(), resolution, nodata)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn nodata(&self) -> Option<i64> {
        self.nodata
    }

    /// Area of one pixel in hectares.
    pub fn pixel_area_ha(&self) -> f64 {
        self.resolution * self.resolution / 10_000.0
    }

    pub fn is_valid_value(&self, value: i64) -> bool {
        self.nodata != Some(value)
    }

    /// Mask of pixels that do not hold the nodata value.
    pub fn valid_mask(&self) -> ValidMask {
        ValidMask {
            rows: self.rows,
            cols: self.cols,
            cells: self.data.iter().map(|&v| self.is_valid_value(v)).collect(),
        }
    }
}

/// Boolean grid marking the pixels that take part in the landscape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl ValidMask {
    pub fn new(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self> {
        let expected = cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(Error::InvalidInput(format!(
                "mask holds {} cells, expected {rows}x{cols} = {expected}",
                cells.len()
            )));
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn all_valid(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![true; rows * cols],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&valid| valid).count()
    }

    /// Cell-wise AND of two masks of the same shape.
    pub fn intersect(&self, other: &ValidMask) -> Result<ValidMask> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                raster: self.shape(),
                mask: other.shape(),
            });
        }

        Ok(ValidMask {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| a && b)
                .collect(),
        })
    }
}
