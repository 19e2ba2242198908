//! Tile storage and grayscale intensity extraction
//!
//! A tile keeps its colour pixels for reassembly and a grayscale intensity
//! array for matching. Tiles are addressed by 1-based raster-order indices
//! within their own set, so index `k` is the `k`-th tile read left-to-right,
//! top-to-bottom.

use crate::io::error::{ReassemblyError, Result};
use image::{ImageBuffer, Luma, RgbaImage};
use ndarray::Array2;

/// One rectangular piece of a larger image
#[derive(Debug, Clone)]
pub struct Tile {
    index: usize,
    pixels: RgbaImage,
    intensity: Array2<f64>,
}

impl Tile {
    /// Wrap colour pixels as the tile with the given 1-based index
    pub fn new(index: usize, pixels: RgbaImage) -> Self {
        let intensity = grayscale_intensity(&pixels);
        Self {
            index,
            pixels,
            intensity,
        }
    }

    /// Build a gray tile from 8-bit intensities indexed `(row, col)`
    pub fn from_intensity(index: usize, values: &Array2<u8>) -> Self {
        let (height, width) = values.dim();
        let gray: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
                Luma([values.get((y as usize, x as usize)).copied().unwrap_or(0)])
            });
        let pixels = image::DynamicImage::ImageLuma8(gray).to_rgba8();
        Self::new(index, pixels)
    }

    /// 1-based raster-order index within the owning set
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Colour pixels used for reassembly
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Grayscale intensities indexed `(row, col)`, in `0.0..=255.0`
    pub const fn intensity(&self) -> &Array2<f64> {
        &self.intensity
    }

    /// Tile height in pixels
    pub fn height(&self) -> usize {
        self.intensity.dim().0
    }

    /// Tile width in pixels
    pub fn width(&self) -> usize {
        self.intensity.dim().1
    }

    /// Tile shape as `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        self.intensity.dim()
    }
}

fn grayscale_intensity(pixels: &RgbaImage) -> Array2<f64> {
    let gray = image::imageops::grayscale(pixels);
    let (width, height) = gray.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        gray.get_pixel_checked(col as u32, row as u32)
            .map_or(0.0, |p| f64::from(p.0[0]))
    })
}

/// Ordered tile collection addressed by 1-based index
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Number each image 1, 2, ... in the order given
    pub fn from_images(images: impl IntoIterator<Item = RgbaImage>) -> Self {
        let tiles = images
            .into_iter()
            .enumerate()
            .map(|(offset, pixels)| Tile::new(offset + 1, pixels))
            .collect();
        Self { tiles }
    }

    /// Number each intensity array 1, 2, ... in the order given
    pub fn from_intensities<'a>(arrays: impl IntoIterator<Item = &'a Array2<u8>>) -> Self {
        let tiles = arrays
            .into_iter()
            .enumerate()
            .map(|(offset, values)| Tile::from_intensity(offset + 1, values))
            .collect();
        Self { tiles }
    }

    /// Look up a tile by 1-based index
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if the index is 0 or beyond the set
    pub fn get(&self, index: usize) -> Result<&Tile> {
        index
            .checked_sub(1)
            .and_then(|offset| self.tiles.get(offset))
            .ok_or(ReassemblyError::InvalidTileIndex {
                index,
                max_tiles: self.tiles.len(),
            })
    }

    /// Iterate tiles in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test if the set holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
