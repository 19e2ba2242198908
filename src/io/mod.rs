//! Input/output operations and error handling

/// Command-line parsing and session orchestration
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// Error taxonomy for every fallible operation
pub mod error;
/// Tile set loading and image export
pub mod image;
/// Terminal progress display
pub mod progress;
