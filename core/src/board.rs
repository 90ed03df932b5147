use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::*;

/// Ordered cells of one game, all face down when created.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: u16) -> Self {
        Self {
            cells: alloc::vec![Cell::default(); size.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the rendered grid: the smallest square that fits every cell.
    pub fn columns(&self) -> usize {
        let len = self.len();
        let mut columns = 1;
        while columns * columns < len {
            columns += 1;
        }
        columns
    }

    /// Positions grouped by rendered row; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = core::ops::Range<Position>> + '_ {
        let columns = self.columns();
        let len = self.len();
        (0..len)
            .step_by(columns)
            .map(move |start| start as Position..(start + columns).min(len) as Position)
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition(position))
        }
    }

    pub fn cell_at(&self, position: Position) -> Result<&Cell> {
        let position = self.validate_position(position)?;
        Ok(&self.cells[usize::from(position)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(position, cell)| (position as Position, cell))
    }

    pub fn count_in(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state() == state).count()
    }

    pub(crate) fn cell_mut(&mut self, position: Position) -> Result<&mut Cell> {
        let position = self.validate_position(position)?;
        Ok(&mut self.cells[usize::from(position)])
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[usize::from(position)]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self.cells[usize::from(position)]
    }
}
