//! Area-averaging resampling of intensity arrays
//!
//! Each output cell covers a rectangle of the source grid and takes the
//! overlap-weighted mean of the source cells under it. Downsampling therefore
//! averages whole blocks, and a non-integer scale splits edge cells by their
//! covered fraction, so no source row or column is favoured over another.
//!
//! Enlarging uses the same overlap weights, so each source cell spreads over
//! the output cells it covers and the result is piecewise constant. OpenCV's
//! `INTER_AREA` switches to bilinear interpolation when enlarging; this module
//! does not. Matching only enlarges when a reference tile is smaller than the
//! scrambled tile.

use crate::io::error::{ReassemblyError, Result};
use ndarray::Array2;
use num_traits::Float;

/// Source cells and overlap weights covered by one output cell
type Footprint = Vec<(usize, f64)>;

// Overlap of [start, end) with each unit source cell along one axis
fn axis_footprints(source_len: usize, target_len: usize) -> Vec<Footprint> {
    let scale = source_len as f64 / target_len as f64;
    (0..target_len)
        .map(|cell| {
            let start = cell as f64 * scale;
            let end = start + scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(source_len);
            (first..last)
                .filter_map(|source| {
                    let overlap = end.min(source as f64 + 1.0) - start.max(source as f64);
                    (overlap > 1e-12).then_some((source, overlap))
                })
                .collect()
        })
        .collect()
}

/// Resize an array indexed `(row, col)` to `(height, width)` by area averaging
///
/// Returns a copy when the shape already matches.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the source or target has a zero dimension
pub fn resize_area<T: Float>(source: &Array2<T>, target: (usize, usize)) -> Result<Array2<T>> {
    let (source_height, source_width) = source.dim();
    let (height, width) = target;

    if source_height == 0 || source_width == 0 || height == 0 || width == 0 {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "area resize",
            tile: None,
            expected: target,
            found: source.dim(),
        });
    }

    if source.dim() == target {
        return Ok(source.clone());
    }

    let rows = axis_footprints(source_height, height);
    let cols = axis_footprints(source_width, width);

    let mut resized = Array2::from_elem(target, T::zero());
    for ((row, col), cell) in resized.indexed_iter_mut() {
        let (Some(row_weights), Some(col_weights)) = (rows.get(row), cols.get(col)) else {
            continue;
        };

        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for &(source_row, row_weight) in row_weights {
            for &(source_col, col_weight) in col_weights {
                let value = source
                    .get((source_row, source_col))
                    .and_then(|v| v.to_f64())
                    .unwrap_or(0.0);
                let weight = row_weight * col_weight;
                total += value * weight;
                weight_sum += weight;
            }
        }

        if weight_sum > 0.0 {
            *cell = T::from(total / weight_sum).unwrap_or_else(T::zero);
        }
    }

    Ok(resized)
}
