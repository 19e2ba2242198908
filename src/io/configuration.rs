//! Reassembly constants and runtime configuration defaults

// Grid layout of the puzzle
/// Default number of tile rows
pub const DEFAULT_GRID_ROWS: usize = 4;
/// Default number of tile columns
pub const DEFAULT_GRID_COLS: usize = 4;

// Scores at or below this never count as a match
/// Default similarity threshold for a confident match
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.25;

/// Lower bound of the normalized cross-correlation range
pub const MIN_SCORE: f64 = -1.0;
/// Upper bound of the normalized cross-correlation range
pub const MAX_SCORE: f64 = 1.0;

// Remainder strips narrower than this fraction of a tile are dropped when slicing
/// Minimum edge tile size as a fraction of a full tile
pub const MIN_EDGE_FRACTION: f64 = 0.5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 64;

// Sliding-puzzle search
/// Default number of boards the solver may expand before giving up
pub const DEFAULT_MAX_EXPANSIONS: usize = 200_000;

// Output settings
/// Extension used when reading and writing individual tiles
pub const TILE_EXTENSION: &str = "png";
/// Default path of the reconstructed image
pub const DEFAULT_OUTPUT_PATH: &str = "combined.png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
