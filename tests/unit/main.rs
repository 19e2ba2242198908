//! Unit tests mirroring the `src` tree, with shared tile fixtures


use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retile::spatial::TileSet;

/// Uniform random intensities; independent draws correlate near zero
pub fn noise(seed: u64, height: usize, width: usize) -> Array2<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((height, width), |_| rng.random::<u8>())
}

/// A single flat intensity with no structure to correlate
pub fn flat(value: u8, height: usize, width: usize) -> Array2<u8> {
    Array2::from_elem((height, width), value)
}

/// `count` distinct noise tiles of 24x24
pub fn noise_set(count: usize) -> Vec<Array2<u8>> {
    (0..count).map(|i| noise(1000 + i as u64, 24, 24)).collect()
}

/// Tile set built from arrays in the given order
pub fn tile_set(arrays: &[Array2<u8>]) -> TileSet {
    TileSet::from_intensities(arrays)
}

// Tests fixtures give distinct tiles of the requested shape
// Verified by seeding every tile identically
#[test]
fn test_noise_fixtures_are_distinct() {
    let arrays = noise_set(3);
    assert_eq!(arrays.len(), 3);
    assert_eq!(arrays.first().map(Array2::dim), Some((24, 24)));
    assert_ne!(arrays.first(), arrays.get(1));
    assert_eq!(noise(7, 4, 4), noise(7, 4, 4));
}
