//! Command-line interface for reassembling a scrambled tile image

use crate::algorithm::executor::{Reassembler, Reconstruction};
use crate::algorithm::matcher::MatchConfig;
use crate::algorithm::solver::{Solution, SolverConfig};
use crate::io::configuration::{
    DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_MAX_EXPANSIONS, DEFAULT_MIN_CONFIDENCE,
    DEFAULT_OUTPUT_PATH,
};
use crate::io::error::Result;
use crate::io::image::{load_tile_set, save_image, save_tiles};
use crate::io::progress::ProgressManager;
use crate::spatial::grid::GridShape;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "retile")]
#[command(
    author,
    version,
    about = "Reassemble a scrambled tile image against a reference grid"
)]
/// Command-line arguments for the reassembly tool
pub struct Cli {
    /// Scrambled tiles: a directory of numbered tiles (1.png, 2.png, ...) or a single image
    #[arg(value_name = "SCRAMBLED")]
    pub scrambled: PathBuf,

    /// Reference tiles in their correct order: a directory or a single image
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Path of the reconstructed image
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Number of tile rows
    #[arg(short, long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: usize,

    /// Number of tile columns
    #[arg(short, long, default_value_t = DEFAULT_GRID_COLS)]
    pub cols: usize,

    /// Correlation a match must exceed; tiles below it everywhere are blank
    #[arg(short, long, default_value_t = DEFAULT_MIN_CONFIDENCE, allow_negative_numbers = true)]
    pub min_confidence: f64,

    /// Write both tile sets to <DIR>/scrambled and <DIR>/reference
    #[arg(long, value_name = "DIR")]
    pub dump_tiles: Option<PathBuf>,

    /// Also solve the scrambled board as a sliding puzzle and log the moves
    #[arg(short, long)]
    pub solve: bool,

    /// Boards the solver may expand before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    pub max_expansions: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for this invocation
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Grid shape from the row and column options
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is out of range
    pub fn grid_shape(&self) -> Result<GridShape> {
        GridShape::new(self.rows, self.cols)
    }

    /// Matching configuration from the threshold option
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is out of range
    pub fn match_config(&self) -> Result<MatchConfig> {
        MatchConfig::new(self.min_confidence)
    }

    /// Solver configuration from the expansion budget
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_expansions: self.max_expansions,
        }
    }
}

/// Everything a session produced
#[derive(Debug, Clone)]
pub struct Report {
    /// Assignment and reassembled image
    pub reconstruction: Reconstruction,
    /// Blank moves, when solving was requested
    pub solution: Option<Solution>,
}

/// Loads both tile sets, reconstructs and writes the result
pub struct Session {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Session {
    /// Create a session for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the reconstruction, write the output image and optionally solve
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid, a tile set cannot be
    /// read, matching or assembly fails, an output cannot be written, or the
    /// requested solve fails
    pub fn run(&mut self) -> Result<Report> {
        let start_time = Instant::now();
        let shape = self.cli.grid_shape()?;
        let reassembler = Reassembler::new(shape, self.cli.match_config()?);

        let scrambled = load_tile_set(&self.cli.scrambled, shape)?;
        let reference = load_tile_set(&self.cli.reference, shape)?;
        log::info!(
            "Loaded {} scrambled and {} reference tiles",
            scrambled.len(),
            reference.len()
        );

        if let Some(dir) = &self.cli.dump_tiles {
            save_tiles(&scrambled, &dir.join("scrambled"))?;
            save_tiles(&reference, &dir.join("reference"))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start("Scoring", scrambled.len());
        }

        let progress = self.progress_manager.as_ref();
        let result = reassembler.reconstruct_with_progress(&scrambled, &reference, |index| {
            if let Some(pm) = progress {
                pm.tile_scored(index);
            }
        });

        if let Some(ref pm) = self.progress_manager {
            log::debug!("Scored {} scrambled tiles", pm.position());
            pm.finish();
        }

        let reconstruction = result?;
        save_image(&reconstruction.image, &self.cli.output)?;
        log::info!(
            "Wrote {} in {:.2?}",
            self.cli.output.display(),
            start_time.elapsed()
        );

        let solution = self
            .cli
            .solve
            .then(|| reassembler.solve(&reconstruction, &self.cli.solver_config()))
            .transpose()?;

        Ok(Report {
            reconstruction,
            solution,
        })
    }
}
