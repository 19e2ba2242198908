//! Tests for tile construction and 1-based tile set access

#[cfg(test)]
mod tests {
    use crate::{flat, noise};
    use image::{Rgba, RgbaImage};
    use retile::ReassemblyError;
    use retile::spatial::{Tile, TileSet};

    // Tests gray tiles keep their exact intensities
    // Verified by scaling intensities into 0..1
    #[test]
    fn test_intensity_round_trip() {
        let values = noise(21, 6, 9);
        let tile = Tile::from_intensity(3, &values);

        assert_eq!(tile.index(), 3);
        assert_eq!(tile.shape(), (6, 9));
        assert_eq!((tile.height(), tile.width()), (6, 9));
        assert_eq!(tile.pixels().dimensions(), (9, 6));
        assert_eq!(tile.intensity(), &values.mapv(f64::from));
    }

    // Tests colour pixels convert to a single grayscale channel
    // Verified by reading the red channel only
    #[test]
    fn test_colour_to_grayscale() {
        let white = Tile::new(1, RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        let green = Tile::new(2, RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255])));

        assert!(white.intensity().iter().all(|&v| (v - 255.0).abs() < f64::EPSILON));
        let level = green.intensity().iter().next().copied().unwrap_or(0.0);
        assert!(level > 100.0 && level < 255.0, "got {level}");
    }

    // Tests tiles are numbered from 1 in input order
    // Verified by numbering from 0
    #[test]
    fn test_set_numbering() {
        let arrays = [flat(1, 2, 2), flat(2, 2, 2), flat(3, 2, 2)];
        let set = TileSet::from_intensities(&arrays);

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.iter().map(Tile::index).collect::<Vec<_>>(), vec![1, 2, 3]);
        let second = set.get(2).expect("present");
        assert!(second.intensity().iter().all(|&v| (v - 2.0).abs() < f64::EPSILON));
    }

    // Tests index 0 and past-the-end lookups fail
    // Verified by treating index 0 as the first tile
    #[test]
    fn test_out_of_range_lookup() {
        let set = TileSet::from_images([RgbaImage::new(1, 1)]);

        assert!(matches!(
            set.get(0),
            Err(ReassemblyError::InvalidTileIndex { index: 0, max_tiles: 1 })
        ));
        assert!(set.get(2).is_err());
        assert!(TileSet::default().is_empty());
    }
}
