//! Spatial data structures for tile grids
//!
//! This module contains spatial-related functionality including:
//! - Grid shape arithmetic and image slicing
//! - Tile storage and tile sets

/// Grid layout and slicing of a source image into tiles
pub mod grid;
/// Tile storage and grayscale intensity extraction
pub mod tiles;

pub use grid::GridShape;
pub use tiles::{Tile, TileSet};
