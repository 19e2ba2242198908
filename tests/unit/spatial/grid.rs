//! Tests for grid arithmetic and image slicing

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use retile::ReassemblyError;
    use retile::spatial::grid::{GridShape, slice_image};

    fn coordinate_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    // Tests raster positions and coordinates are inverse
    // Verified by swapping row and column in coordinates
    #[test]
    fn test_position_coordinates_round_trip() {
        let shape = GridShape::new(3, 5).expect("valid shape");
        assert_eq!(shape.len(), 15);
        assert_eq!(shape.position(0, 0), Some(1));
        assert_eq!(shape.position(1, 0), Some(6));
        assert_eq!(shape.position(2, 4), Some(15));
        assert_eq!(shape.position(3, 0), None);
        assert_eq!(shape.coordinates(7), Some((1, 1)));
        assert_eq!(shape.coordinates(0), None);
        assert_eq!(shape.coordinates(16), None);

        for position in 1..=shape.len() {
            let (row, col) = shape.coordinates(position).expect("in range");
            assert_eq!(shape.position(row, col), Some(position));
        }
    }

    // Tests zero and oversized dimensions are rejected
    // Verified by removing the bounds checks
    #[test]
    fn test_shape_validation() {
        assert!(GridShape::new(0, 4).is_err());
        assert!(GridShape::new(4, 0).is_err());
        assert!(GridShape::new(1_000, 4).is_err());
        let shape = GridShape::new(4, 4).expect("valid shape");
        assert!(!shape.is_empty());
        assert_eq!((shape.rows(), shape.cols()), (4, 4));
    }

    // Tests exact-divide slicing yields raster-ordered tiles
    // Verified by iterating columns before rows
    #[test]
    fn test_slice_raster_order() {
        let image = coordinate_image(40, 20);
        let tiles = slice_image(&image, GridShape::new(2, 4).expect("valid shape"))
            .expect("slices");

        assert_eq!(tiles.len(), 8);
        for tile in &tiles {
            assert_eq!(tile.shape(), (10, 10));
            let row = (tile.index() - 1) / 4;
            let col = (tile.index() - 1) % 4;
            let origin = tile.pixels().get_pixel(0, 0).0;
            assert_eq!(origin, [(col * 10) as u8, (row * 10) as u8, 7, 255]);
        }
    }

    // Tests remainder strips under half a tile are dropped
    // Verified by keeping every remainder strip
    #[test]
    fn test_small_remainder_dropped() {
        // 43 / 4 = 10 leaves a 3 pixel strip; 3 < 5 so it is skipped
        let image = coordinate_image(43, 43);
        let tiles = slice_image(&image, GridShape::new(4, 4).expect("valid shape"))
            .expect("slices");

        assert_eq!(tiles.len(), 16);
        assert!(tiles.iter().all(|tile| tile.shape() == (10, 10)));
    }

    // Tests a remainder strip of at least half a tile is kept as extra tiles
    // Verified by comparing with a full tile instead of half
    #[test]
    fn test_large_remainder_kept() {
        // 5 / 2 = 2 leaves a 1 pixel strip, exactly half a tile
        let image = coordinate_image(4, 5);
        let tiles = slice_image(&image, GridShape::new(2, 2).expect("valid shape"))
            .expect("slices");

        assert_eq!(tiles.len(), 6);
        let last = tiles.get(6).expect("six tiles");
        assert_eq!(last.shape(), (1, 2));
    }

    // Tests images smaller than the grid are rejected
    // Verified by removing the zero tile size check
    #[test]
    fn test_too_small_image() {
        let image = coordinate_image(3, 3);
        let err = slice_image(&image, GridShape::new(4, 4).expect("valid shape")).unwrap_err();
        assert!(matches!(err, ReassemblyError::ShapeMismatch { .. }));
    }
}
