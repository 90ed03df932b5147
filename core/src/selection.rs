use smallvec::SmallVec;

use crate::Position;

/// Cards flipped by the player that the engine has not resolved yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingSelection {
    positions: SmallVec<[Position; 2]>,
}

impl PendingSelection {
    pub const CAPACITY: usize = 2;

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= Self::CAPACITY
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Both positions, in flip order, once the selection is full.
    pub fn pair(&self) -> Option<(Position, Position)> {
        match self.positions[..] {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    pub(crate) fn push(&mut self, position: Position) -> bool {
        if self.is_full() {
            return false;
        }
        self.positions.push(position);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear();
    }
}
