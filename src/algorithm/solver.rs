//! Sliding-puzzle solver for the reconstructed board
//!
//! The scrambled image is read as a sliding puzzle. Each cell holds the
//! reference position of the tile shown there and the blank cell holds 0. On
//! the goal board every tile sits on its own reference position and the blank
//! sits on the position it was matched to.
//!
//! Search is best first on depth plus the number of misplaced tiles. The
//! cheapest live board is expanded until the goal comes off the queue, and
//! equal costs are taken in the order the boards were generated.

use crate::algorithm::assignment::Assignment;
use crate::io::configuration::DEFAULT_MAX_EXPANSIONS;
use crate::io::error::{ReassemblyError, Result, incomplete_assignment, invalid_parameter};
use crate::spatial::grid::GridShape;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

/// Direction the blank slides in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Blank moves one row down
    Down,
    /// Blank moves one column left
    Left,
    /// Blank moves one row up
    Up,
    /// Blank moves one column right
    Right,
}

impl Move {
    /// Moves in the order children are generated
    pub const ALL: [Self; 4] = [Self::Down, Self::Left, Self::Up, Self::Right];

    /// Single-letter form used in move strings
    pub const fn symbol(self) -> char {
        match self {
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Up => 'U',
            Self::Right => 'R',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Puzzle board in raster order, 0 marking the blank
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<usize>,
    shape: GridShape,
    blank: usize,
}

impl Board {
    /// Create a board from raster-ordered cell values
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless there is one cell per grid position,
    /// exactly one 0, and the other values are distinct within `1..=rows*cols`
    pub fn new(shape: GridShape, cells: Vec<usize>) -> Result<Self> {
        if cells.len() != shape.len() {
            return Err(invalid_parameter(
                "board cells",
                &cells.len(),
                &format!("a {}x{} board needs {} cells", shape.rows(), shape.cols(), shape.len()),
            ));
        }

        let mut seen = HashSet::with_capacity(cells.len());
        for &value in &cells {
            if value > shape.len() || !seen.insert(value) {
                return Err(invalid_parameter(
                    "board cells",
                    &format!("{cells:?}"),
                    &format!("value {value} is repeated or outside 0..={}", shape.len()),
                ));
            }
        }

        let Some(blank) = cells.iter().position(|&value| value == 0) else {
            return Err(invalid_parameter(
                "board cells",
                &format!("{cells:?}"),
                &"exactly one cell must be the blank (0)",
            ));
        };

        Ok(Self {
            cells,
            shape,
            blank,
        })
    }

    /// Solved board: position `p` holds `p`, except the blank's home holds 0
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `blank_home` is not a grid position
    pub fn goal(shape: GridShape, blank_home: usize) -> Result<Self> {
        if shape.coordinates(blank_home).is_none() {
            return Err(invalid_parameter(
                "blank home",
                &blank_home,
                &format!("must be within 1..={}", shape.len()),
            ));
        }
        let cells = (1..=shape.len())
            .map(|position| if position == blank_home { 0 } else { position })
            .collect();
        Self::new(shape, cells)
    }

    /// Cell values in raster order
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Grid the board is laid out on
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Zero-based `(row, col)` of the blank
    pub const fn blank_coordinates(&self) -> (usize, usize) {
        (self.blank / self.shape.cols(), self.blank % self.shape.cols())
    }

    /// Pairs of non-blank tiles that appear in decreasing order
    pub fn inversions(&self) -> usize {
        let tiles: Vec<usize> = self.cells.iter().copied().filter(|&v| v != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(offset, &a)| {
                tiles
                    .iter()
                    .skip(offset + 1)
                    .filter(|&&b| a > b)
                    .count()
            })
            .sum()
    }

    /// Non-blank tiles not on their cell in `goal`
    pub fn misplaced(&self, goal: &Self) -> usize {
        self.cells
            .iter()
            .zip(&goal.cells)
            .filter(|&(&value, &target)| value != 0 && value != target)
            .count()
    }

    /// Board after sliding the blank one step, if the step stays on the grid
    pub fn slide(&self, step: Move) -> Option<Self> {
        let (row, col) = self.blank_coordinates();
        let (row, col) = match step {
            Move::Down => (row + 1, col),
            Move::Left => (row, col.checked_sub(1)?),
            Move::Up => (row.checked_sub(1)?, col),
            Move::Right => (row, col + 1),
        };
        let target = self.shape.position(row, col)? - 1;

        let mut cells = self.cells.clone();
        cells.swap(self.blank, target);
        Some(Self {
            cells,
            shape: self.shape,
            blank: target,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.cells.chunks(self.shape.cols()).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = values.iter().map(ToString::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Start and goal boards read from a reconstruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    /// Board as the scrambled image shows it
    pub start: Board,
    /// Board with every tile on its reference position
    pub goal: Board,
}

impl Puzzle {
    /// Build the puzzle for a complete assignment with a recorded blank tile
    ///
    /// Scrambled tile `t` sits on cell `t`, and its value is the reference
    /// position it was assigned to.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` if the assignment has no blank tile or
    /// does not cover the grid
    pub fn from_assignment(assignment: &Assignment, shape: GridShape) -> Result<Self> {
        if assignment.len() != shape.len() {
            return Err(incomplete_assignment(
                shape.len(),
                &format!("{} entries for a {}-cell board", assignment.len(), shape.len()),
            ));
        }
        let Some(blank_home) = assignment.blank().and_then(|tile| assignment.position_of(tile))
        else {
            return Err(incomplete_assignment(
                shape.len(),
                &"no blank tile was placed",
            ));
        };

        let mut cells = vec![0; shape.len()];
        for (position, tile) in assignment.iter() {
            if let Some(cell) = tile.checked_sub(1).and_then(|offset| cells.get_mut(offset)) {
                *cell = if position == blank_home { 0 } else { position };
            }
        }

        Ok(Self {
            start: Board::new(shape, cells)?,
            goal: Board::goal(shape, blank_home)?,
        })
    }
}

/// Search parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Boards that may be expanded before the search gives up
    pub max_expansions: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Moves from start to goal and every board along the way
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Blank moves in order
    pub moves: Vec<Move>,
    /// Boards from start to goal inclusive, one more than `moves`
    pub states: Vec<Board>,
    /// Boards expanded by the search
    pub expanded: usize,
}

impl Solution {
    /// Number of moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Test if the start board was already solved
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves as a string of `D`, `L`, `U`, `R`
    pub fn path(&self) -> String {
        self.moves.iter().map(|step| step.symbol()).collect()
    }
}

/// Check the start board can reach the goal board
///
/// Horizontal slides never change the inversion count. A vertical slide moves
/// one tile past `cols - 1` others, so with an odd column count the inversion
/// parity is fixed, and with an even column count the parity of inversions
/// plus blank row is fixed. A single row or column only shifts the blank, so
/// the tile order itself must already match.
///
/// # Errors
///
/// Returns `Unsolvable` if the parity differs from the goal's, or
/// `ShapeMismatch` if the boards have different shapes
pub fn check_solvable(start: &Board, goal: &Board) -> Result<()> {
    let shape = start.shape();
    if shape != goal.shape() {
        return Err(ReassemblyError::ShapeMismatch {
            operation: "puzzle solving",
            tile: None,
            expected: (goal.shape().rows(), goal.shape().cols()),
            found: (shape.rows(), shape.cols()),
        });
    }

    let inversions = start.inversions();
    let (blank_row, _) = start.blank_coordinates();
    let (goal_row, _) = goal.blank_coordinates();

    let solvable = if shape.rows() == 1 || shape.cols() == 1 {
        let order = |board: &Board| -> Vec<usize> {
            board.cells().iter().copied().filter(|&v| v != 0).collect()
        };
        order(start) == order(goal)
    } else if shape.cols() % 2 == 1 {
        inversions % 2 == goal.inversions() % 2
    } else {
        (inversions + blank_row) % 2 == (goal.inversions() + goal_row) % 2
    };

    if solvable {
        Ok(())
    } else {
        Err(ReassemblyError::Unsolvable {
            inversions,
            blank_row,
        })
    }
}

struct SearchNode {
    board: Board,
    parent: Option<usize>,
    step: Option<Move>,
    depth: usize,
}

/// Find a move sequence from `start` to `goal`
///
/// # Errors
///
/// Returns:
/// - `ShapeMismatch` if the boards have different shapes
/// - `Unsolvable` if no sequence exists
/// - `SearchLimit` if `max_expansions` boards are expanded first
pub fn solve(start: &Board, goal: &Board, config: &SolverConfig) -> Result<Solution> {
    check_solvable(start, goal)?;

    let mut nodes = vec![SearchNode {
        board: start.clone(),
        parent: None,
        step: None,
        depth: 0,
    }];
    let mut live = BinaryHeap::new();
    live.push(Reverse((start.misplaced(goal), 0_usize)));
    let mut closed: HashSet<Board> = HashSet::new();
    let mut expanded = 0;

    while let Some(Reverse((_, index))) = live.pop() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        if closed.contains(&node.board) {
            continue;
        }
        if node.board == *goal {
            log::debug!("Goal reached at depth {} after {expanded} expansions", node.depth);
            return Ok(trace(&nodes, index, expanded));
        }
        if expanded >= config.max_expansions {
            break;
        }
        expanded += 1;

        let depth = node.depth + 1;
        let children: Vec<(Move, Board)> = Move::ALL
            .iter()
            .filter_map(|&step| node.board.slide(step).map(|board| (step, board)))
            .filter(|(_, board)| !closed.contains(board))
            .collect();
        closed.insert(node.board.clone());

        for (step, board) in children {
            let cost = board.misplaced(goal) + depth;
            nodes.push(SearchNode {
                board,
                parent: Some(index),
                step: Some(step),
                depth,
            });
            live.push(Reverse((cost, nodes.len() - 1)));
        }
    }

    Err(ReassemblyError::SearchLimit {
        expanded,
        limit: config.max_expansions,
    })
}

// Walk parent links back to the root
fn trace(nodes: &[SearchNode], goal_index: usize, expanded: usize) -> Solution {
    let mut moves = Vec::new();
    let mut states = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(node) = cursor.and_then(|index| nodes.get(index)) {
        states.push(node.board.clone());
        if let Some(step) = node.step {
            moves.push(step);
        }
        cursor = node.parent;
    }
    moves.reverse();
    states.reverse();
    Solution {
        moves,
        states,
        expanded,
    }
}
