//! Tests for tile set loading and image export

#[cfg(test)]
mod tests {
    use crate::{noise_set, tile_set};
    use image::{Rgba, RgbaImage};
    use retile::ReassemblyError;
    use retile::io::image::{
        load_image, load_tile_directory, load_tile_set, save_image, save_tiles, tile_path,
    };
    use retile::spatial::GridShape;
    use std::path::Path;
    use tempfile::TempDir;

    // Tests tile files are named by 1-based index
    // Verified by using zero-based names
    #[test]
    fn test_tile_path_naming() {
        assert_eq!(
            tile_path(Path::new("split_ordered"), 7),
            Path::new("split_ordered").join("7.png")
        );
    }

    // Tests saved tiles read back in index order
    // Verified by sorting directory entries lexically
    #[test]
    fn test_tiles_round_trip_through_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tiles = tile_set(&noise_set(12));

        save_tiles(&tiles, temp_dir.path()).expect("writes tiles");
        let shape = GridShape::new(3, 4).expect("valid shape");
        let loaded = load_tile_set(temp_dir.path(), shape).expect("reads tiles");

        assert_eq!(loaded.len(), 12);
        for (original, reread) in tiles.iter().zip(loaded.iter()) {
            assert_eq!(original.index(), reread.index());
            assert_eq!(original.pixels(), reread.pixels());
        }
    }

    // Tests a missing numbered tile is reported with its path
    // Verified by skipping missing files
    #[test]
    fn test_missing_tile_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        save_tiles(&tile_set(&noise_set(2)), temp_dir.path()).expect("writes tiles");

        let err = load_tile_directory(temp_dir.path(), 3).unwrap_err();

        match err {
            ReassemblyError::ImageLoad { path, .. } => assert!(path.ends_with("3.png")),
            other => unreachable!("Expected ImageLoad, got {other}"),
        }
    }

    // Tests a single image path is sliced into the grid
    // Verified by loading the image as one tile
    #[test]
    fn test_image_file_is_sliced() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("ordered.png");
        let source = RgbaImage::from_fn(40, 40, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        save_image(&source, &path).expect("writes image");

        let tiles = load_tile_set(&path, GridShape::new(4, 4).expect("valid shape"))
            .expect("slices image");

        assert_eq!(tiles.len(), 16);
        let last = tiles.get(16).expect("16 tiles");
        assert_eq!(last.shape(), (10, 10));
        assert_eq!(last.pixels().get_pixel(0, 0).0, [30, 30, 0, 255]);
    }

    // Tests output directories are created on save
    // Verified by removing directory creation
    #[test]
    fn test_save_image_creates_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("deeper").join("combined.png");
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));

        save_image(&image, &path).expect("writes image");

        assert_eq!(load_image(&path).expect("reads image"), image);
    }

    // Tests neither file nor directory is a file system error
    // Verified by treating missing paths as empty directories
    #[test]
    fn test_missing_tile_set_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("absent");

        let err = load_tile_set(&missing, GridShape::new(2, 2).expect("valid shape")).unwrap_err();

        assert!(matches!(err, ReassemblyError::FileSystem { .. }));
    }

    // Tests unsupported output extensions surface as export errors
    // Verified by ignoring encoder failures
    #[test]
    fn test_save_image_unknown_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("combined.not-an-image");
        let image = RgbaImage::new(2, 2);

        let err = save_image(&image, &path).unwrap_err();

        assert!(matches!(err, ReassemblyError::ImageExport { .. }));
    }
}
