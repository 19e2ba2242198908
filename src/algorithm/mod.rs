/// Row-major concatenation of matched tiles into the final image
pub mod assembler;
/// Ordered reference-position to scrambled-tile mapping
pub mod assignment;
/// Fixed-size position set for tracking claimed grid positions
pub mod bitset;
/// End-to-end reconstruction pipeline
pub mod executor;
/// Correlation scoring and greedy thresholded tile matching
pub mod matcher;
/// Best-first sliding-puzzle search over the reconstructed board
pub mod solver;
