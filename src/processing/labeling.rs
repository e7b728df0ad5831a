// src/processing/labeling.rs
//! Connected-component labelling of binary grids.

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::raster::{ClassifiedRaster, MAX_CELLS};

/// Neighbourhood used to decide whether two pixels touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Rook neighbours (N, S, E, W)
    Four,
    /// Queen neighbours, diagonals included
    #[default]
    Eight,
}

const FOUR_NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const EIGHT_NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Connectivity {
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR_NEIGHBOURS,
            Connectivity::Eight => &EIGHT_NEIGHBOURS,
        }
    }
}

/// Calls `f` with the linear index of every in-bounds neighbour of `idx`.
#[inline]
pub(crate) fn for_each_neighbour(
    idx: usize,
    rows: usize,
    cols: usize,
    connectivity: Connectivity,
    mut f: impl FnMut(usize),
) {
    let row = (idx / cols) as isize;
    let col = (idx % cols) as isize;

    for &(dr, dc) in connectivity.offsets() {
        let nr = row + dr;
        let nc = col + dc;
        if nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols {
            f(nr as usize * cols + nc as usize);
        }
    }
}

/// Label the connected regions of `true` cells.
///
/// Returns one label per cell (`0` for background, `1..=count` for
/// components, numbered in raster scan order) and the component count.
///
/// Fails with [`Error::InvalidInput`] when `mask` does not hold `rows * cols`
/// cells or holds more than [`MAX_CELLS`] cells.
pub fn label_components(
    mask: &[bool],
    rows: usize,
    cols: usize,
    connectivity: Connectivity,
) -> Result<(Vec<u32>, usize)> {
    if rows.checked_mul(cols) != Some(mask.len()) {
        return Err(Error::InvalidInput(format!(
            "mask holds {} cells, expected {rows}x{cols}",
            mask.len()
        )));
    }
    if mask.len() > MAX_CELLS {
        return Err(Error::InvalidInput(format!(
            "mask of {} cells exceeds the limit of {MAX_CELLS} cells",
            mask.len()
        )));
    }

    Ok(label_cells(mask, rows, cols, connectivity))
}

/// Flood-fill labelling behind [`label_components`].
///
/// `mask` must hold `rows * cols <= MAX_CELLS` cells, which every
/// [`ClassifiedRaster`] guarantees. Each component takes at least one cell,
/// so the `u32` counter cannot wrap.
pub(crate) fn label_cells(
    mask: &[bool],
    rows: usize,
    cols: usize,
    connectivity: Connectivity,
) -> (Vec<u32>, usize) {
    debug_assert_eq!(mask.len(), rows * cols);
    debug_assert!(mask.len() <= MAX_CELLS);

    let mut labels = vec![0u32; mask.len()];
    let mut count = 0u32;
    let mut stack = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] || labels[start] != 0 {
            continue;
        }

        count += 1;
        labels[start] = count;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            for_each_neighbour(idx, rows, cols, connectivity, |n| {
                if mask[n] && labels[n] == 0 {
                    labels[n] = count;
                    stack.push(n);
                }
            });
        }
    }

    (labels, count as usize)
}

/// First patch id after `offset` once `count` more patches are numbered.
fn advance_patch_offset(offset: u32, count: usize) -> Result<u32> {
    u32::try_from(count)
        .ok()
        .and_then(|count| offset.checked_add(count))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "{count} patches after id {offset} overflow the u32 patch id range"
            ))
        })
}

/// Pixel count per component; index `i` holds the size of label `i + 1`.
pub fn component_sizes(labels: &[u32], count: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; count];
    for &label in labels.iter().filter(|&&l| l != 0) {
        sizes[label as usize - 1] += 1;
    }
    sizes
}

/// Patch ids for every class of a raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLabels {
    pub rows: usize,
    pub cols: usize,
    /// `0` marks nodata; patches are numbered from 1
    pub labels: Vec<u32>,
    pub count: usize,
}

/// Label the 8-connected patches of every class with raster-wide unique ids.
///
/// Classes are numbered in ascending class order, patches of one class in
/// scan order. Fails with [`Error::InvalidInput`] if the ids would leave the
/// `u32` range.
pub fn label_patches(raster: &ClassifiedRaster) -> Result<PatchLabels> {
    let (rows, cols) = raster.shape();
    let data = raster.data();
    let mut labels = vec![0u32; data.len()];
    let mut offset = 0u32;

    let classes = data
        .iter()
        .copied()
        .filter(|&v| raster.is_valid_value(v))
        .sorted_unstable()
        .dedup();

    for class in classes {
        let class_mask: Vec<bool> = data.iter().map(|&v| v == class).collect();
        let (class_labels, count) = label_components(&class_mask, rows, cols, Connectivity::Eight)?;

        for (out, &label) in labels.iter_mut().zip(&class_labels) {
            if label != 0 {
                *out = offset + label;
            }
        }
        offset = advance_patch_offset(offset, count)?;
    }

    Ok(PatchLabels {
        rows,
        cols,
        labels,
        count: offset as usize,
    })
}
