//! Reassembly of a scrambled square image from its tiles
//!
//! Each scrambled tile is matched against a grid of reference tiles by
//! normalized cross-correlation. The one tile with no confident match is the
//! blank tile and takes the single position left over. The tiles are then
//! stitched back together in reference order.

#![forbid(unsafe_code)]

/// Tile matching, assignment and reassembly
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Correlation and resampling primitives
pub mod math;
/// Grid layout and tile storage
pub mod spatial;

pub use io::error::{ReassemblyError, Result};
