//! Scrambled-to-reference tile matching
//!
//! Every scrambled tile is scored against every reference tile, giving a dense
//! score matrix. Each scrambled tile then takes its best reference position
//! among scores strictly above the confidence threshold, earliest position on
//! ties. The greedy per-row choice is the whole search; there is no
//! backtracking. Exactly one scrambled tile must fail the threshold: that is
//! the blank tile, and it fills the one reference position left unclaimed.

use crate::algorithm::assignment::Assignment;
use crate::io::configuration::{DEFAULT_MIN_CONFIDENCE, MAX_SCORE, MIN_SCORE};
use crate::io::error::{ReassemblyError, Result, invalid_parameter};
use crate::math::correlation::match_template_max;
use crate::math::resample::resize_area;
use crate::spatial::tiles::{Tile, TileSet};
use ndarray::Array2;

/// Matching parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Scores must be strictly greater than this to count as a match
    pub min_confidence: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl MatchConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is not a finite value in
    /// the correlation range
    pub fn new(min_confidence: f64) -> Result<Self> {
        if !min_confidence.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&min_confidence) {
            return Err(invalid_parameter(
                "min_confidence",
                &min_confidence,
                &format!("must be a finite value in [{MIN_SCORE}, {MAX_SCORE}]"),
            ));
        }
        Ok(Self { min_confidence })
    }
}

/// Score one scrambled tile against one reference tile
///
/// The reference is resized to the scrambled tile's shape first when the two
/// differ.
///
/// # Errors
///
/// Returns `ShapeMismatch` naming the reference tile if either tile is empty
pub fn score_pair(scrambled: &Tile, reference: &Tile) -> Result<f64> {
    let tag = |err: ReassemblyError| match err {
        ReassemblyError::ShapeMismatch {
            operation,
            expected,
            found,
            ..
        } => ReassemblyError::ShapeMismatch {
            operation,
            tile: Some(reference.index()),
            expected,
            found,
        },
        other => other,
    };

    if scrambled.shape() == reference.shape() {
        return match_template_max(reference.intensity(), scrambled.intensity()).map_err(tag);
    }

    let resized = resize_area(reference.intensity(), scrambled.shape()).map_err(tag)?;
    match_template_max(&resized, scrambled.intensity()).map_err(tag)
}

/// Dense scores with one row per scrambled tile and one column per reference tile
#[derive(Clone, Debug)]
pub struct ScoreMatrix {
    scores: Array2<f64>,
}

impl ScoreMatrix {
    /// Score every scrambled/reference pair
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any pair cannot be scored
    pub fn compute(scrambled: &TileSet, reference: &TileSet) -> Result<Self> {
        Self::compute_with_progress(scrambled, reference, |_| {})
    }

    /// Score every pair, reporting each finished scrambled tile index
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any pair cannot be scored
    pub fn compute_with_progress(
        scrambled: &TileSet,
        reference: &TileSet,
        mut on_tile: impl FnMut(usize),
    ) -> Result<Self> {
        let mut scores = Array2::zeros((scrambled.len(), reference.len()));

        for (row, scrambled_tile) in scrambled.iter().enumerate() {
            for (col, reference_tile) in reference.iter().enumerate() {
                let score = score_pair(scrambled_tile, reference_tile)?;
                if let Some(cell) = scores.get_mut((row, col)) {
                    *cell = score;
                }
            }
            on_tile(scrambled_tile.index());
        }

        Ok(Self { scores })
    }

    /// Wrap a precomputed matrix indexed `(scrambled - 1, reference - 1)`
    pub const fn from_scores(scores: Array2<f64>) -> Self {
        Self { scores }
    }

    /// Score of a 1-based (scrambled, reference) pair
    pub fn score(&self, scrambled: usize, reference: usize) -> Option<f64> {
        self.scores
            .get((scrambled.checked_sub(1)?, reference.checked_sub(1)?))
            .copied()
    }

    /// Matrix shape as `(scrambled count, reference count)`
    pub fn dim(&self) -> (usize, usize) {
        self.scores.dim()
    }

    /// Best reference position for a scrambled tile above the threshold
    ///
    /// Only scores strictly greater than `min_confidence` qualify, and a later
    /// position must score strictly higher to replace an earlier one.
    pub fn best_match(&self, scrambled: usize, min_confidence: f64) -> Option<(usize, f64)> {
        if scrambled == 0 || scrambled > self.scores.nrows() {
            return None;
        }
        let row = self.scores.row(scrambled - 1);
        let mut best: Option<(usize, f64)> = None;
        for (offset, &score) in row.iter().enumerate() {
            let score = if score.is_finite() { score } else { 0.0 };
            if score > min_confidence && best.is_none_or(|(_, top)| score > top) {
                best = Some((offset + 1, score));
            }
        }
        best
    }
}

/// Matching outcome for one scrambled tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileMatch {
    /// Best reference position and its score
    Confident {
        /// 1-based reference position
        position: usize,
        /// Winning correlation score
        score: f64,
    },
    /// No reference tile scored above the threshold
    Blank,
}

/// Reduce a score matrix to one outcome per scrambled tile, in index order
pub fn classify(matrix: &ScoreMatrix, config: &MatchConfig) -> Vec<TileMatch> {
    (1..=matrix.dim().0)
        .map(|scrambled| {
            matrix
                .best_match(scrambled, config.min_confidence)
                .map_or(TileMatch::Blank, |(position, score)| TileMatch::Confident {
                    position,
                    score,
                })
        })
        .collect()
}

/// Build a complete assignment from per-tile outcomes
///
/// # Errors
///
/// Returns:
/// - `AmbiguousBlank` unless exactly one tile is blank
/// - `IncompleteAssignment` if two tiles claim one position or a claim is
///   out of range
pub fn resolve(outcomes: &[TileMatch], config: &MatchConfig) -> Result<Assignment> {
    let size = outcomes.len();

    let blanks: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, outcome)| matches!(outcome, TileMatch::Blank))
        .map(|(offset, _)| offset + 1)
        .collect();

    let &[blank] = blanks.as_slice() else {
        return Err(ReassemblyError::AmbiguousBlank {
            candidates: blanks,
            min_confidence: config.min_confidence,
        });
    };

    let mut assignment = Assignment::new(size);
    for (offset, outcome) in outcomes.iter().enumerate() {
        if let TileMatch::Confident { position, score } = *outcome {
            log::debug!(
                "Scrambled tile {} -> reference position {position} (score {score:.4})",
                offset + 1
            );
            assignment.insert(position, offset + 1)?;
        }
    }

    let hole = assignment.place_blank(blank)?;
    log::info!("Blank tile {blank} fills unclaimed position {hole}");
    assignment.validate()?;

    Ok(assignment)
}

/// Match scrambled tiles onto reference positions
///
/// # Errors
///
/// Returns:
/// - `InvalidParameter` if the sets are empty or differ in size
/// - `ShapeMismatch` if a pair of tiles cannot be scored
/// - `AmbiguousBlank` or `IncompleteAssignment` if the result is not a
///   single-blank bijection
pub fn match_tiles(
    scrambled: &TileSet,
    reference: &TileSet,
    config: &MatchConfig,
) -> Result<Assignment> {
    match_tiles_with_progress(scrambled, reference, config, |_| {})
}

/// Match scrambled tiles, reporting each scored scrambled tile index
///
/// # Errors
///
/// Same as [`match_tiles`]
pub fn match_tiles_with_progress(
    scrambled: &TileSet,
    reference: &TileSet,
    config: &MatchConfig,
    on_tile: impl FnMut(usize),
) -> Result<Assignment> {
    if scrambled.is_empty() || scrambled.len() != reference.len() {
        return Err(invalid_parameter(
            "tile count",
            &format!("{} scrambled / {} reference", scrambled.len(), reference.len()),
            &"both sets must hold the same, non-zero number of tiles",
        ));
    }

    let matrix = ScoreMatrix::compute_with_progress(scrambled, reference, on_tile)?;
    let outcomes = classify(&matrix, config);
    resolve(&outcomes, config)
}
