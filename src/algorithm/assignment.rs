//! Mapping from reference grid position to scrambled tile index
//!
//! Entries are kept ordered by position, which is the order the assembler
//! consumes them in. A finished assignment is a bijection on `1..=N`, and
//! records which scrambled tile was placed as the blank.

use crate::algorithm::bitset::PositionSet;
use crate::io::error::{Result, incomplete_assignment};
use std::collections::BTreeMap;
use std::fmt;

/// Reference position to scrambled tile mapping over `1..=size`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    slots: BTreeMap<usize, usize>,
    size: usize,
    blank: Option<usize>,
}

impl Assignment {
    /// Create an empty assignment for `size` positions
    pub const fn new(size: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            size,
            blank: None,
        }
    }

    /// Map every position to the tile with the same index
    pub fn identity(size: usize) -> Self {
        Self {
            slots: (1..=size).map(|index| (index, index)).collect(),
            size,
            blank: None,
        }
    }

    /// Build an assignment from `(position, tile)` pairs
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` if a pair is out of range or a position
    /// is given twice
    pub fn from_pairs(
        size: usize,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let mut assignment = Self::new(size);
        for (position, tile) in pairs {
            assignment.insert(position, tile)?;
        }
        Ok(assignment)
    }

    /// Place a scrambled tile at a reference position
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` if either index is outside `1..=size`
    /// or the position already holds a tile
    pub fn insert(&mut self, position: usize, tile: usize) -> Result<()> {
        if !(1..=self.size).contains(&position) {
            return Err(incomplete_assignment(
                self.size,
                &format!("position {position} is outside 1..={}", self.size),
            ));
        }
        if !(1..=self.size).contains(&tile) {
            return Err(incomplete_assignment(
                self.size,
                &format!("tile {tile} is outside 1..={}", self.size),
            ));
        }
        if let Some(&existing) = self.slots.get(&position) {
            return Err(incomplete_assignment(
                self.size,
                &format!("position {position} claimed by both tile {existing} and tile {tile}"),
            ));
        }
        self.slots.insert(position, tile);
        Ok(())
    }

    /// Place the blank tile at the single position still open
    ///
    /// Returns the position it was placed at.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` unless exactly one position is open, or
    /// if the tile index is out of range
    pub fn place_blank(&mut self, tile: usize) -> Result<usize> {
        let open = self.unclaimed_positions();
        let &[hole] = open.as_slice() else {
            return Err(incomplete_assignment(
                self.size,
                &format!("blank tile {tile} needs one open position, found {open:?}"),
            ));
        };
        self.insert(hole, tile)?;
        self.blank = Some(tile);
        Ok(hole)
    }

    /// Scrambled tile placed as the blank, once [`Self::place_blank`] has run
    pub const fn blank(&self) -> Option<usize> {
        self.blank
    }

    /// Reference position holding a scrambled tile
    pub fn position_of(&self, tile: usize) -> Option<usize> {
        self.iter()
            .find(|&(_, placed)| placed == tile)
            .map(|(position, _)| position)
    }

    /// Tile placed at a position
    pub fn get(&self, position: usize) -> Option<usize> {
        self.slots.get(&position).copied()
    }

    /// Number of positions the assignment ranges over
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of filled positions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Test if no position is filled
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(position, tile)` pairs in ascending position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots.iter().map(|(&position, &tile)| (position, tile))
    }

    /// Scrambled tile indices in final raster order
    pub fn tiles_in_order(&self) -> Vec<usize> {
        self.slots.values().copied().collect()
    }

    /// Positions with no tile yet, ascending
    pub fn unclaimed_positions(&self) -> Vec<usize> {
        let mut claimed = PositionSet::new(self.size);
        for &position in self.slots.keys() {
            claimed.insert(position);
        }
        claimed.missing()
    }

    /// Check the assignment is a bijection on `1..=size`
    ///
    /// # Errors
    ///
    /// Returns `IncompleteAssignment` naming the unfilled positions or the
    /// tiles that are unused
    pub fn validate(&self) -> Result<()> {
        let open = self.unclaimed_positions();
        if !open.is_empty() {
            return Err(incomplete_assignment(
                self.size,
                &format!("positions {open:?} have no tile"),
            ));
        }

        let mut used = PositionSet::new(self.size);
        for &tile in self.slots.values() {
            if !used.insert(tile) {
                return Err(incomplete_assignment(
                    self.size,
                    &format!("tile {tile} is placed more than once"),
                ));
            }
        }
        if !used.is_full() {
            return Err(incomplete_assignment(
                self.size,
                &format!("tiles {:?} are never placed", used.missing()),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (offset, (position, tile)) in self.iter().enumerate() {
            if offset > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}: {tile}")?;
        }
        write!(f, "}}")
    }
}
