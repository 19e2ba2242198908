//! Reading tile sets and writing tiles and reconstructed images

use crate::io::configuration::TILE_EXTENSION;
use crate::io::error::{ReassemblyError, Result};
use crate::spatial::grid::{GridShape, slice_image};
use crate::spatial::tiles::TileSet;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Decode any supported image file to RGBA
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be read or decoded
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| ReassemblyError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Path of the tile with a 1-based index inside a tile directory
pub fn tile_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index}.{TILE_EXTENSION}"))
}

/// Read tiles `1.png ..= count.png` from a directory
///
/// # Errors
///
/// Returns `ImageLoad` naming the first tile that is missing or unreadable
pub fn load_tile_directory(dir: &Path, count: usize) -> Result<TileSet> {
    let images = (1..=count)
        .map(|index| load_image(&tile_path(dir, index)))
        .collect::<Result<Vec<_>>>()?;
    Ok(TileSet::from_images(images))
}

/// Read a tile set from a directory of numbered tiles or a single image
///
/// A directory must hold one file per grid position. A single image is sliced
/// into the grid.
///
/// # Errors
///
/// Returns:
/// - `FileSystem` if the path is neither a file nor a directory
/// - `ImageLoad` if an image cannot be decoded
/// - `ShapeMismatch` if the image is too small to slice
pub fn load_tile_set(path: &Path, shape: GridShape) -> Result<TileSet> {
    if path.is_dir() {
        log::debug!("Reading {} tiles from {}", shape.len(), path.display());
        load_tile_directory(path, shape.len())
    } else if path.is_file() {
        log::debug!("Slicing {} into {}x{}", path.display(), shape.rows(), shape.cols());
        slice_image(&load_image(path)?, shape)
    } else {
        Err(ReassemblyError::FileSystem {
            path: path.to_path_buf(),
            operation: "open tile set",
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "expected an image file or a directory of numbered tiles",
            ),
        })
    }
}

fn ensure_directory(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| ReassemblyError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })
}

/// Write an image, creating parent directories as needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns `FileSystem` if a parent directory cannot be created, or
/// `ImageExport` if encoding or writing fails
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    image.save(path).map_err(|e| ReassemblyError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write every tile as `<dir>/<index>.png`
///
/// # Errors
///
/// Returns `FileSystem` or `ImageExport` for the first tile that cannot be
/// written
pub fn save_tiles(tiles: &TileSet, dir: &Path) -> Result<()> {
    ensure_directory(dir)?;
    for tile in tiles {
        save_image(tile.pixels(), &tile_path(dir, tile.index()))?;
    }
    log::debug!("Wrote {} tiles to {}", tiles.len(), dir.display());
    Ok(())
}
