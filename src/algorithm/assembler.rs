//! Reassembly of scrambled tiles into the final image
//!
//! Tiles are taken in assignment order, laid side by side within each row and
//! the rows stacked top to bottom.

use crate::algorithm::assignment::Assignment;
use crate::io::error::{ReassemblyError, Result, incomplete_assignment};
use crate::spatial::grid::GridShape;
use crate::spatial::tiles::{Tile, TileSet};
use image::RgbaImage;

/// Join tiles left to right; every tile must share the first tile's height
///
/// # Errors
///
/// Returns `ShapeMismatch` naming the first tile whose height differs, or if
/// there are no tiles
pub fn concat_horizontal(tiles: &[&Tile]) -> Result<RgbaImage> {
    let Some(first) = tiles.first() else {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "horizontal concatenation",
            tile: None,
            expected: (1, 1),
            found: (0, 0),
        });
    };
    let height = first.height();

    let mut width = 0;
    for tile in tiles {
        if tile.height() != height {
            return Err(ReassemblyError::ShapeMismatch {
                operation: "horizontal concatenation",
                tile: Some(tile.index()),
                expected: (height, tile.width()),
                found: tile.shape(),
            });
        }
        width += tile.width();
    }

    let mut row = RgbaImage::new(width as u32, height as u32);
    let mut left = 0_i64;
    for tile in tiles {
        image::imageops::replace(&mut row, tile.pixels(), left, 0);
        left += tile.width() as i64;
    }
    Ok(row)
}

/// Stack row images top to bottom; every row must share the first row's width
///
/// # Errors
///
/// Returns `ShapeMismatch` if a row's width differs, or if there are no rows
pub fn concat_vertical(rows: &[RgbaImage]) -> Result<RgbaImage> {
    let Some(first) = rows.first() else {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "vertical concatenation",
            tile: None,
            expected: (1, 1),
            found: (0, 0),
        });
    };
    let width = first.width();

    let mut height = 0;
    for row in rows {
        if row.width() != width {
            return Err(ReassemblyError::ShapeMismatch {
                operation: "vertical concatenation",
                tile: None,
                expected: (row.height() as usize, width as usize),
                found: (row.height() as usize, row.width() as usize),
            });
        }
        height += row.height();
    }

    let mut combined = RgbaImage::new(width, height);
    let mut top = 0_i64;
    for row in rows {
        image::imageops::replace(&mut combined, row, 0, top);
        top += i64::from(row.height());
    }
    Ok(combined)
}

/// Rebuild the full image from an assignment over a `shape` grid
///
/// # Errors
///
/// Returns:
/// - `IncompleteAssignment` if the assignment does not hold exactly
///   `rows * cols` entries
/// - `InvalidTileIndex` if an assigned tile is missing from `tiles`
/// - `ShapeMismatch` if tiles in a row differ in height or rows differ in width
pub fn assemble(assignment: &Assignment, tiles: &TileSet, shape: GridShape) -> Result<RgbaImage> {
    if assignment.len() != shape.len() {
        return Err(incomplete_assignment(
            shape.len(),
            &format!(
                "{} entries for a {}x{} grid",
                assignment.len(),
                shape.rows(),
                shape.cols()
            ),
        ));
    }

    let order = assignment.tiles_in_order();
    let mut rows = Vec::with_capacity(shape.rows());
    for chunk in order.chunks(shape.cols()) {
        let row_tiles = chunk
            .iter()
            .map(|&index| tiles.get(index))
            .collect::<Result<Vec<_>>>()?;
        rows.push(concat_horizontal(&row_tiles)?);
    }

    let combined = concat_vertical(&rows)?;
    log::info!(
        "Assembled {}x{} image from {} tiles",
        combined.width(),
        combined.height(),
        order.len()
    );
    Ok(combined)
}
