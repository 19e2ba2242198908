//! Error types for tile matching, reassembly, puzzle solving and file handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reassembly operations
#[derive(Debug)]
pub enum ReassemblyError {
    /// Failed to decode a tile or source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration value validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index outside of the tile set
    InvalidTileIndex {
        /// The invalid 1-based tile index
        index: usize,
        /// Number of tiles in the set
        max_tiles: usize,
    },

    /// Tiles have dimensions that cannot be compared or concatenated
    ShapeMismatch {
        /// Operation that required compatible shapes
        operation: &'static str,
        /// Tile involved, when a single tile is at fault
        tile: Option<usize>,
        /// Expected (height, width)
        expected: (usize, usize),
        /// Actual (height, width)
        found: (usize, usize),
    },

    /// Not exactly one scrambled tile failed to clear the confidence threshold
    ///
    /// A well-formed puzzle has one blank tile. Zero candidates means every
    /// tile matched something; several means the threshold is too strict or
    /// the inputs do not belong together.
    AmbiguousBlank {
        /// Indices of every scrambled tile without a confident match
        candidates: Vec<usize>,
        /// Threshold in effect
        min_confidence: f64,
    },

    /// The reconstructed board cannot reach its goal by sliding the blank
    Unsolvable {
        /// Inversions among the non-blank tiles of the start board
        inversions: usize,
        /// Zero-based row of the blank on the start board
        blank_row: usize,
    },

    /// The solver expanded its whole budget without reaching the goal
    SearchLimit {
        /// Boards expanded before stopping
        expanded: usize,
        /// Configured expansion budget
        limit: usize,
    },

    /// Assignment does not map {1..N} bijectively onto {1..N}
    IncompleteAssignment {
        /// Number of grid positions expected
        expected: usize,
        /// Description of the violated condition
        reason: String,
    },
}

impl fmt::Display for ReassemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (1..={max_tiles})")
            }
            Self::ShapeMismatch {
                operation,
                tile,
                expected,
                found,
            } => {
                write!(f, "Shape mismatch during {operation}")?;
                if let Some(index) = tile {
                    write!(f, " at tile {index}")?;
                }
                write!(
                    f,
                    ": expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::AmbiguousBlank {
                candidates,
                min_confidence,
            } => {
                if candidates.is_empty() {
                    write!(
                        f,
                        "No blank tile found: every scrambled tile scored above {min_confidence}"
                    )
                } else {
                    write!(
                        f,
                        "Expected exactly one blank tile below {min_confidence}, found {}: {candidates:?}",
                        candidates.len()
                    )
                }
            }
            Self::Unsolvable {
                inversions,
                blank_row,
            } => {
                write!(
                    f,
                    "Puzzle has no solution: {inversions} inversions with the blank on row {blank_row} have the wrong parity for the goal"
                )
            }
            Self::SearchLimit { expanded, limit } => {
                write!(
                    f,
                    "Search stopped after expanding {expanded} boards (limit {limit}) without reaching the goal"
                )
            }
            Self::IncompleteAssignment { expected, reason } => {
                write!(
                    f,
                    "Assignment does not cover all {expected} positions: {reason}"
                )
            }
        }
    }
}

impl std::error::Error for ReassemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reassembly results
pub type Result<T> = std::result::Result<T, ReassemblyError>;

impl From<image::ImageError> for ReassemblyError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ReassemblyError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ReassemblyError {
    ReassemblyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an incomplete assignment error
pub fn incomplete_assignment(expected: usize, reason: &impl ToString) -> ReassemblyError {
    ReassemblyError::IncompleteAssignment {
        expected,
        reason: reason.to_string(),
    }
}
