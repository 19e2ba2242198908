use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over 1-based grid positions or tile indices
///
/// Tracks which reference positions have been claimed during matching so the
/// unclaimed complement can be read back directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSet {
    bits: BitVec,
    capacity: usize,
}

impl PositionSet {
    /// Create a set with no positions present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Insert a 1-based position
    ///
    /// Returns false if the position was already present or out of range
    pub fn insert(&mut self, position: usize) -> bool {
        if position == 0 || position > self.capacity || self.contains(position) {
            return false;
        }
        self.bits.set(position - 1, true);
        true
    }

    /// Test position membership
    pub fn contains(&self, position: usize) -> bool {
        if position > 0 {
            self.bits.get(position - 1).as_deref() == Some(&true)
        } else {
            false
        }
    }

    /// Test if every position is present
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Count positions in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Present positions in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().map(|index| index + 1).collect()
    }

    /// Absent positions in ascending order
    pub fn missing(&self) -> Vec<usize> {
        self.bits.iter_zeros().map(|index| index + 1).collect()
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PositionSet({}/{} positions: {:?})",
            self.count(),
            self.capacity,
            self.to_vec()
        )
    }
}
