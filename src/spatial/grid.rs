//! Grid layout arithmetic and slicing of a full image into tiles
//!
//! Positions are 1-based and run in raster order, so position `p` on a grid
//! with `cols` columns sits at row `(p - 1) / cols`, column `(p - 1) % cols`.

use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_EDGE_FRACTION};
use crate::io::error::{ReassemblyError, Result, invalid_parameter};
use crate::spatial::tiles::TileSet;
use image::RgbaImage;

/// Tile grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Create a grid shape
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or above
    /// `MAX_GRID_DIMENSION`
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        for (parameter, value) in [("grid_rows", rows), ("grid_cols", cols)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self { rows, cols })
    }

    /// Number of tile rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of grid positions
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a validated shape
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 1-based raster position of a zero-based `(row, col)` cell
    pub const fn position(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col + 1)
        } else {
            None
        }
    }

    /// Zero-based `(row, col)` cell of a 1-based raster position
    pub const fn coordinates(&self, position: usize) -> Option<(usize, usize)> {
        if position == 0 || position > self.len() {
            None
        } else {
            Some(((position - 1) / self.cols, (position - 1) % self.cols))
        }
    }
}

/// Cut an image into a raster-ordered tile set
///
/// Tiles measure `height / rows` by `width / cols` pixels. Remainder strips at
/// the right and bottom edges are kept only when they reach at least half a
/// tile in both directions; a kept remainder tile is smaller than the rest.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the image is smaller than one pixel per tile
pub fn slice_image(image: &RgbaImage, shape: GridShape) -> Result<TileSet> {
    let (width, height) = image.dimensions();
    let tile_height = height as usize / shape.rows();
    let tile_width = width as usize / shape.cols();

    if tile_height == 0 || tile_width == 0 {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "slicing",
            tile: None,
            expected: (shape.rows(), shape.cols()),
            found: (height as usize, width as usize),
        });
    }

    let min_height = tile_height as f64 * MIN_EDGE_FRACTION;
    let min_width = tile_width as f64 * MIN_EDGE_FRACTION;

    let mut pieces = Vec::new();
    for top in (0..height as usize).step_by(tile_height) {
        for left in (0..width as usize).step_by(tile_width) {
            let piece_height = tile_height.min(height as usize - top);
            let piece_width = tile_width.min(width as usize - left);

            if (piece_height as f64) < min_height || (piece_width as f64) < min_width {
                continue;
            }

            let piece = image::imageops::crop_imm(
                image,
                left as u32,
                top as u32,
                piece_width as u32,
                piece_height as u32,
            )
            .to_image();
            pieces.push(piece);
        }
    }

    log::debug!(
        "Sliced {width}x{height} image into {} tiles of {tile_width}x{tile_height}",
        pieces.len()
    );

    Ok(TileSet::from_images(pieces))
}
