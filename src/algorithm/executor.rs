use crate::algorithm::assembler::assemble;
use crate::algorithm::assignment::Assignment;
use crate::algorithm::matcher::{MatchConfig, match_tiles_with_progress};
use crate::algorithm::solver::{Puzzle, Solution, SolverConfig, solve};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::GridShape;
use crate::spatial::tiles::TileSet;
use image::RgbaImage;

/// Output of a full match-then-assemble run
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Reference position to scrambled tile mapping
    pub assignment: Assignment,
    /// Reassembled image
    pub image: RgbaImage,
}

/// Runs matching and assembly for one grid layout and threshold
#[derive(Debug, Clone, Copy)]
pub struct Reassembler {
    shape: GridShape,
    config: MatchConfig,
}

impl Reassembler {
    /// Create a reassembler for a grid layout and matching configuration
    pub const fn new(shape: GridShape, config: MatchConfig) -> Self {
        Self { shape, config }
    }

    /// Grid layout in use
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Match the scrambled tiles and assemble them in reference order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either set does not hold one tile per
    /// grid position, and otherwise any matching or assembly error
    pub fn reconstruct(&self, scrambled: &TileSet, reference: &TileSet) -> Result<Reconstruction> {
        self.reconstruct_with_progress(scrambled, reference, |_| {})
    }

    /// Same as [`Self::reconstruct`], reporting each scored scrambled tile
    ///
    /// # Errors
    ///
    /// Same as [`Self::reconstruct`]
    pub fn reconstruct_with_progress(
        &self,
        scrambled: &TileSet,
        reference: &TileSet,
        on_tile: impl FnMut(usize),
    ) -> Result<Reconstruction> {
        for (parameter, set) in [("scrambled tiles", scrambled), ("reference tiles", reference)] {
            if set.len() != self.shape.len() {
                return Err(invalid_parameter(
                    parameter,
                    &set.len(),
                    &format!(
                        "a {}x{} grid needs {} tiles",
                        self.shape.rows(),
                        self.shape.cols(),
                        self.shape.len()
                    ),
                ));
            }
        }

        let assignment = match_tiles_with_progress(scrambled, reference, &self.config, on_tile)?;
        log::info!("Assignment: {assignment}");

        let image = assemble(&assignment, scrambled, self.shape)?;
        Ok(Reconstruction { assignment, image })
    }

    /// Find the blank moves that turn the scrambled board into the reference
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` if the reconstruction has no blank tile,
    /// `Unsolvable` if the board has the wrong parity, or `SearchLimit` if the
    /// search runs out of expansions
    pub fn solve(&self, reconstruction: &Reconstruction, config: &SolverConfig) -> Result<Solution> {
        let puzzle = Puzzle::from_assignment(&reconstruction.assignment, self.shape)?;
        log::debug!("Start board:\n{}", puzzle.start);
        log::debug!("Goal board:\n{}", puzzle.goal);

        let solution = solve(&puzzle.start, &puzzle.goal, config)?;
        log::info!(
            "Solved in {} moves ({} boards expanded): {}",
            solution.len(),
            solution.expanded,
            solution.path()
        );
        for (step, board) in solution.states.iter().enumerate() {
            log::debug!("Step {step}:\n{board}");
        }
        Ok(solution)
    }
}
