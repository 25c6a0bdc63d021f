use crate::tile::TileId;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    coordinates: (usize, usize),
    occupant: Option<TileId>,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            coordinates: (x, y),
            occupant: None,
        }
    }
    pub fn coordinates(&self) -> (usize, usize) {
        self.coordinates
    }
    pub fn occupant(&self) -> Option<TileId> {
        self.occupant
    }
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
    pub(crate) fn set_occupant(&mut self, occupant: Option<TileId>) {
        self.occupant = occupant;
    }
}
