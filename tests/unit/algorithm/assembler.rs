//! Tests for tile concatenation and full-image assembly

#[cfg(test)]
mod tests {
    use crate::{flat, tile_set};
    use image::{Rgba, RgbaImage};
    use retile::ReassemblyError;
    use retile::algorithm::assembler::{assemble, concat_horizontal, concat_vertical};
    use retile::algorithm::assignment::Assignment;
    use retile::spatial::grid::{GridShape, slice_image};
    use retile::spatial::{Tile, TileSet};

    fn solid(color: [u8; 4], width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 3) as u8, (y * 5) as u8, ((x + y) % 256) as u8, 255])
        })
    }

    // Tests slicing then assembling with the identity reproduces the source
    // Verified by swapping row and column order in assembly
    #[test]
    fn test_identity_round_trip() {
        let source = gradient(64, 48);
        let shape = GridShape::new(4, 4).expect("valid shape");
        let tiles = slice_image(&source, shape).expect("exact divide");

        let rebuilt = assemble(&Assignment::identity(16), &tiles, shape).expect("assembles");

        assert_eq!(rebuilt.dimensions(), source.dimensions());
        assert_eq!(rebuilt, source);
    }

    // Tests tiles are placed in position order, not tile order
    // Verified by concatenating tiles in index order
    #[test]
    fn test_permuted_assignment_places_tiles() {
        let red = [255, 0, 0, 255];
        let green = [0, 255, 0, 255];
        let blue = [0, 0, 255, 255];
        let white = [255, 255, 255, 255];
        let tiles = TileSet::from_images([
            solid(red, 2, 2),
            solid(green, 2, 2),
            solid(blue, 2, 2),
            solid(white, 2, 2),
        ]);
        let assignment =
            Assignment::from_pairs(4, [(1, 3), (2, 1), (3, 4), (4, 2)]).expect("valid pairs");
        let shape = GridShape::new(2, 2).expect("valid shape");

        let image = assemble(&assignment, &tiles, shape).expect("assembles");

        assert_eq!(image.dimensions(), (4, 4));
        assert_eq!(image.get_pixel(0, 0).0, blue);
        assert_eq!(image.get_pixel(3, 0).0, red);
        assert_eq!(image.get_pixel(0, 3).0, white);
        assert_eq!(image.get_pixel(3, 3).0, green);
    }

    // Tests a short tile in a row is reported by index
    // Verified by skipping the height check
    #[test]
    fn test_row_height_mismatch() {
        let tall = Tile::from_intensity(1, &flat(9, 4, 3));
        let short = Tile::from_intensity(2, &flat(9, 3, 3));

        let err = concat_horizontal(&[&tall, &short]).unwrap_err();

        match err {
            ReassemblyError::ShapeMismatch { tile, found, .. } => {
                assert_eq!(tile, Some(2));
                assert_eq!(found, (3, 3));
            }
            other => unreachable!("Expected ShapeMismatch, got {other}"),
        }
    }

    // Tests rows of different widths cannot be stacked
    // Verified by padding narrow rows instead of failing
    #[test]
    fn test_row_width_mismatch() {
        let rows = [solid([0, 0, 0, 255], 6, 2), solid([0, 0, 0, 255], 5, 2)];
        let err = concat_vertical(&rows).unwrap_err();
        assert!(err.to_string().contains("vertical concatenation"));
        assert!(concat_vertical(&[]).is_err());
    }

    // Tests wide tiles assemble into a non-square layout
    // Verified by using rows for the chunk size
    #[test]
    fn test_rectangular_grid() {
        let tiles = tile_set(&[flat(10, 2, 3), flat(20, 2, 3), flat(30, 2, 3)]);
        let shape = GridShape::new(1, 3).expect("valid shape");

        let image = assemble(&Assignment::identity(3), &tiles, shape).expect("assembles");

        assert_eq!(image.dimensions(), (9, 2));
        assert_eq!(image.get_pixel(4, 1).0[0], 20);
    }

    // Tests the entry count must match the grid
    // Verified by assembling whatever entries are present
    #[test]
    fn test_entry_count_must_match_grid() {
        let tiles = tile_set(&[flat(1, 2, 2), flat(2, 2, 2), flat(3, 2, 2), flat(4, 2, 2)]);
        let partial = Assignment::from_pairs(4, [(1, 1), (2, 2), (3, 3)]).expect("valid pairs");
        let shape = GridShape::new(2, 2).expect("valid shape");

        let err = assemble(&partial, &tiles, shape).unwrap_err();

        assert!(matches!(err, ReassemblyError::IncompleteAssignment { .. }));
    }

    // Tests a referenced tile missing from the set is reported
    // Verified by skipping missing tiles
    #[test]
    fn test_missing_tile_reported() {
        let tiles = tile_set(&[flat(1, 2, 2), flat(2, 2, 2), flat(3, 2, 2)]);
        let shape = GridShape::new(2, 2).expect("valid shape");

        let err = assemble(&Assignment::identity(4), &tiles, shape).unwrap_err();

        assert!(matches!(
            err,
            ReassemblyError::InvalidTileIndex {
                index: 4,
                max_tiles: 3
            }
        ));
    }
}
