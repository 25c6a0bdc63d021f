use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Cell;
use crate::error::ModelError;
use crate::side::Side;
use crate::tile::TileId;

/// Fixed rectangle of cells, stored as `(height, width)` and indexed `[(y, x)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid(Array2<Cell>);

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, ModelError> {
        if width == 0 || height == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        Ok(Self(Array2::from_shape_fn((height, width), |(y, x)| {
            Cell::new(x, y)
        })))
    }
    pub fn width(&self) -> usize {
        self.0.shape()[1]
    }
    pub fn height(&self) -> usize {
        self.0.shape()[0]
    }
    pub fn size(&self) -> usize {
        self.width() * self.height()
    }
    fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }
    fn out_of_range(&self, x: usize, y: usize) -> ModelError {
        ModelError::OutOfRange {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, ModelError> {
        self.0.get((y, x)).ok_or_else(|| self.out_of_range(x, y))
    }
    pub fn occupant(&self, (x, y): (usize, usize)) -> Option<TileId> {
        self.0.get((y, x)).and_then(Cell::occupant)
    }
    pub(crate) fn set_occupant(
        &mut self,
        (x, y): (usize, usize),
        occupant: Option<TileId>,
    ) -> Result<(), ModelError> {
        if !self.contains(x, y) {
            return Err(self.out_of_range(x, y));
        }
        self.0[(y, x)].set_occupant(occupant);
        Ok(())
    }

    /// Neighbour one step towards `side`, or `None` at the edge.
    pub fn adjacent_cell(&self, (x, y): (usize, usize), side: Side) -> Option<(usize, usize)> {
        let (dx, dy) = side.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if self.contains(nx, ny) {
            Some((nx, ny))
        } else {
            None
        }
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.0
            .iter()
            .filter(|cell| cell.is_empty())
            .map(Cell::coordinates)
            .collect()
    }

    /// Uniformly picks an unoccupied cell; `None` when the grid is full.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        self.empty_cells().choose(rng).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        for cell in self.0.iter_mut() {
            cell.set_occupant(None);
        }
    }
}
