use std::fmt;

use crate::error::ModelError;
use crate::grid::Grid;

/// Stable handle of a live tile inside [`Tiles`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TileId(pub(crate) usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tile {
    value: u64,
    tier: usize,
    locked: bool,
    cell: Option<(usize, usize)>,
}

impl Tile {
    pub fn new(tier: usize, value: u64) -> Self {
        Self {
            value,
            tier,
            locked: false,
            cell: None,
        }
    }
    pub fn value(&self) -> u64 {
        self.value
    }
    pub fn tier(&self) -> usize {
        self.tier
    }
    pub fn is_locked(&self) -> bool {
        self.locked
    }
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.cell
    }
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
    pub(crate) fn set_state(&mut self, tier: usize, value: u64) {
        self.tier = tier;
        self.value = value;
    }

    /// Places the tile on `cell`, leaving whatever cell it was on before.
    pub fn spawn(
        &mut self,
        id: TileId,
        grid: &mut Grid,
        cell: (usize, usize),
    ) -> Result<(), ModelError> {
        self.attach(id, grid, cell)?;
        self.locked = false;
        Ok(())
    }

    pub fn move_to(
        &mut self,
        id: TileId,
        grid: &mut Grid,
        cell: (usize, usize),
    ) -> Result<(), ModelError> {
        self.attach(id, grid, cell)
    }

    /// Leaves the grid and locks `into` for the rest of the pass. The caller
    /// owns the consumed tile and must drop it from the live set.
    pub fn merge(&mut self, grid: &mut Grid, into: &mut Tile) -> Result<(), ModelError> {
        self.clear_cell(grid)?;
        into.locked = true;
        Ok(())
    }

    fn attach(
        &mut self,
        id: TileId,
        grid: &mut Grid,
        cell: (usize, usize),
    ) -> Result<(), ModelError> {
        grid.cell_at(cell.0, cell.1)?;
        self.clear_cell(grid)?;
        grid.set_occupant(cell, Some(id))?;
        self.cell = Some(cell);
        Ok(())
    }

    fn clear_cell(&mut self, grid: &mut Grid) -> Result<(), ModelError> {
        if let Some(cell) = self.cell.take() {
            grid.set_occupant(cell, None)?;
        }
        Ok(())
    }
}

/// Arena of live tiles. Ids of removed tiles are handed out again.
#[derive(Clone, Debug, Default)]
pub struct Tiles {
    slots: Vec<Option<Tile>>,
    free: Vec<usize>,
    live: usize,
}

impl Tiles {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }
    pub fn insert(&mut self, tile: Tile) -> TileId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(tile);
            TileId(index)
        } else {
            self.slots.push(Some(tile));
            TileId(self.slots.len() - 1)
        }
    }
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.live -= 1;
        Some(tile)
    }
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots.get(id.0)?.as_ref()
    }
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots.get_mut(id.0)?.as_mut()
    }
    pub fn len(&self) -> usize {
        self.live
    }
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|tile| (TileId(index), tile)))
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TileId, &mut Tile)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|tile| (TileId(index), tile)))
    }
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
