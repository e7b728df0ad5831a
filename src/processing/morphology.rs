// src/processing/morphology.rs
use super::labeling::{for_each_neighbour, Connectivity};

/// Binary dilation by one pixel.
///
/// A cell is set in the output when it, or any neighbour in the structuring
/// element given by `connectivity`, is set in `mask`. Cells beyond the grid
/// border count as unset.
pub fn dilate(mask: &[bool], rows: usize, cols: usize, connectivity: Connectivity) -> Vec<bool> {
    debug_assert_eq!(mask.len(), rows * cols);

    let mut dilated = mask.to_vec();
    for idx in (0..mask.len()).filter(|&i| mask[i]) {
        for_each_neighbour(idx, rows, cols, connectivity, |n| dilated[n] = true);
    }
    dilated
}
