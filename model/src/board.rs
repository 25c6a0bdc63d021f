use ndarray::Array2;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::BoardConfig;
use crate::error::ModelError;
use crate::grid::Grid;
use crate::side::Side;
use crate::tier::TileTiers;
use crate::tile::{Tile, TileId, Tiles};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoardEvent {
    TileSpawned {
        tile: TileId,
        cell: (usize, usize),
        value: u64,
    },
    TileMoved {
        tile: TileId,
        from: (usize, usize),
        to: (usize, usize),
    },
    /// `source` was consumed; `dest` now holds `value`.
    TileMerged {
        source: TileId,
        dest: TileId,
        from: (usize, usize),
        into: (usize, usize),
        value: u64,
    },
}

/// Largest value whose double still fits in a tile.
const MAX_MERGEABLE: u64 = u64::MAX / 2;

/// What a single pass did to the board.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveOutcome {
    pub changed: bool,
    /// Sum of the values produced by merges in this pass.
    pub score_delta: u64,
    pub merges: usize,
    pub spawned: Option<TileId>,
    pub game_over: bool,
    pub events: Vec<BoardEvent>,
}

/// Owns the grid and the live tiles; every mutation of either goes through here.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    tiles: Tiles,
    tiers: TileTiers,
}

impl Board {
    pub fn new(config: &BoardConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let tiles = Tiles::with_capacity(grid.size());
        Ok(Self {
            grid,
            tiles,
            tiers: config.tiers.clone(),
        })
    }

    /// Builds a board from tile values, `0` meaning an empty cell.
    /// The array is indexed `[(y, x)]`.
    pub fn from_array(array: &Array2<u64>, tiers: TileTiers) -> Result<Self, ModelError> {
        let (h, w) = (array.shape()[0], array.shape()[1]);
        let config = BoardConfig {
            width: w,
            height: h,
            initial_tiles: 0,
            tiers,
        };
        let mut board = Self::new(&config)?;
        for ((y, x), &value) in array.indexed_iter() {
            if value != 0 {
                board.place_tile(x, y, value)?;
            }
        }
        Ok(board)
    }

    pub fn to_array(&self) -> Array2<u64> {
        Array2::from_shape_fn((self.height(), self.width()), |(y, x)| {
            self.grid
                .occupant((x, y))
                .and_then(|id| self.tiles.get(id))
                .map_or(0, Tile::value)
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn size(&self) -> usize {
        self.grid.size()
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn tiers(&self) -> &TileTiers {
        &self.tiers
    }
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }
    pub fn tile_at(&self, x: usize, y: usize) -> Result<Option<&Tile>, ModelError> {
        let cell = self.grid.cell_at(x, y)?;
        Ok(cell.occupant().and_then(|id| self.tiles.get(id)))
    }
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter()
    }
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_full(&self) -> bool {
        self.tiles.len() == self.grid.size()
    }
    pub fn max_value(&self) -> u64 {
        self.tiles.iter().map(|(_, tile)| tile.value()).max().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.tiles.clear();
    }

    /// Spawns a base tile on a random empty cell. `None` when the board is full.
    pub fn create_tile<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<TileId>, ModelError> {
        match self.grid.random_empty_cell(rng) {
            Some(cell) => self.spawn_at(cell, 0, TileTiers::value_of(0)).map(Some),
            None => Ok(None),
        }
    }

    /// Puts a tile of the given value on an empty cell.
    pub fn place_tile(&mut self, x: usize, y: usize, value: u64) -> Result<TileId, ModelError> {
        if value < 2 || !value.is_power_of_two() || value > MAX_MERGEABLE {
            return Err(ModelError::InvalidTileValue(value));
        }
        if self.grid.cell_at(x, y)?.is_occupied() {
            return Err(ModelError::Occupied { x, y });
        }
        let tier = self.tiers.index_of(value);
        self.spawn_at((x, y), tier, value)
    }

    fn spawn_at(
        &mut self,
        cell: (usize, usize),
        tier: usize,
        value: u64,
    ) -> Result<TileId, ModelError> {
        let id = self.tiles.insert(Tile::new(tier, value));
        if let Some(tile) = self.tiles.get_mut(id) {
            if let Err(e) = tile.spawn(id, &mut self.grid, cell) {
                self.tiles.remove(id);
                return Err(e);
            }
        }
        Ok(id)
    }

    pub fn can_merge(&self, moving: TileId, standing: TileId) -> bool {
        match (self.tiles.get(moving), self.tiles.get(standing)) {
            (Some(a), Some(b)) => {
                a.value() == b.value() && a.value() <= MAX_MERGEABLE && !b.is_locked()
            }
            _ => false,
        }
    }

    /// Full move: [`slide`](Self::slide) then [`settle`](Self::settle).
    pub fn swipe<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<MoveOutcome, ModelError> {
        let mut outcome = self.slide(side)?;
        self.settle(&mut outcome, rng)?;
        debug!(
            ?side,
            changed = outcome.changed,
            merges = outcome.merges,
            score_delta = outcome.score_delta,
            game_over = outcome.game_over,
            "swipe"
        );
        Ok(outcome)
    }

    /// Moves and merges every tile towards `side`. Merged tiles stay locked
    /// until [`settle`](Self::settle).
    pub fn slide(&mut self, side: Side) -> Result<MoveOutcome, ModelError> {
        let mut outcome = MoveOutcome::default();
        for cell in side.scan_order(self.width(), self.height()).cells() {
            if let Some(id) = self.grid.occupant(cell) {
                let moved = self.move_tile(id, side, &mut outcome)?;
                outcome.changed |= moved;
            }
        }
        Ok(outcome)
    }

    /// Unlocks, spawns one tile and checks for game over. Does nothing
    /// when the pass changed nothing.
    pub fn settle<R: Rng + ?Sized>(
        &mut self,
        outcome: &mut MoveOutcome,
        rng: &mut R,
    ) -> Result<(), ModelError> {
        if !outcome.changed {
            return Ok(());
        }
        for (_, tile) in self.tiles.iter_mut() {
            tile.set_locked(false);
        }
        if !self.is_full() {
            if let Some(id) = self.create_tile(rng)? {
                if let Some((cell, value)) = self
                    .tiles
                    .get(id)
                    .and_then(|tile| tile.cell().map(|cell| (cell, tile.value())))
                {
                    outcome.events.push(BoardEvent::TileSpawned {
                        tile: id,
                        cell,
                        value,
                    });
                }
                outcome.spawned = Some(id);
            }
        }
        outcome.game_over = self.is_game_over();
        Ok(())
    }

    fn move_tile(
        &mut self,
        id: TileId,
        side: Side,
        outcome: &mut MoveOutcome,
    ) -> Result<bool, ModelError> {
        let from = match self.tiles.get(id).and_then(Tile::cell) {
            Some(cell) => cell,
            None => return Ok(false),
        };
        let mut target = None;
        let mut next = self.grid.adjacent_cell(from, side);
        while let Some(cell) = next {
            if let Some(other) = self.grid.occupant(cell) {
                if self.can_merge(id, other) {
                    self.merge(id, other, outcome)?;
                    return Ok(true);
                }
                break;
            }
            target = Some(cell);
            next = self.grid.adjacent_cell(cell, side);
        }
        let to = match target {
            Some(cell) => cell,
            None => return Ok(false),
        };
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.move_to(id, &mut self.grid, to)?;
        }
        trace!(tile = %id, ?from, ?to, "tile moved");
        outcome
            .events
            .push(BoardEvent::TileMoved { tile: id, from, to });
        Ok(true)
    }

    fn merge(
        &mut self,
        source_id: TileId,
        dest_id: TileId,
        outcome: &mut MoveOutcome,
    ) -> Result<(), ModelError> {
        if self.tiles.get(dest_id).is_none() {
            return Ok(());
        }
        let mut source = match self.tiles.remove(source_id) {
            Some(tile) => tile,
            None => return Ok(()),
        };
        let from = source.cell();
        let dest = match self.tiles.get_mut(dest_id) {
            Some(tile) => tile,
            None => return Ok(()),
        };
        source.merge(&mut self.grid, dest)?;
        let value = dest
            .value()
            .checked_mul(2)
            .ok_or(ModelError::InvalidTileValue(dest.value()))?;
        let tier = self.tiers.next(dest.tier());
        dest.set_state(tier, value);
        let into = dest.cell();

        outcome.score_delta = outcome.score_delta.saturating_add(value);
        outcome.merges += 1;
        if let (Some(from), Some(into)) = (from, into) {
            trace!(source = %source_id, dest = %dest_id, ?into, value, "tiles merged");
            outcome.events.push(BoardEvent::TileMerged {
                source: source_id,
                dest: dest_id,
                from,
                into,
                value,
            });
        }
        Ok(())
    }

    /// True when the board is full and no neighbouring pair can merge.
    pub fn is_game_over(&self) -> bool {
        if !self.is_full() {
            return false;
        }
        !self.tiles.iter().any(|(id, tile)| {
            tile.cell().map_or(false, |cell| {
                Side::all().into_iter().any(|side| {
                    self.grid
                        .adjacent_cell(cell, side)
                        .and_then(|neighbour| self.grid.occupant(neighbour))
                        .map_or(false, |other| self.can_merge(id, other))
                })
            })
        })
    }

    /// Whether a pass towards `side` would move or merge anything.
    pub fn can_swipe(&self, side: Side) -> bool {
        side.scan_order(self.width(), self.height())
            .cells()
            .into_iter()
            .filter_map(|cell| self.grid.occupant(cell).map(|id| (cell, id)))
            .any(|(cell, id)| match self.grid.adjacent_cell(cell, side) {
                Some(next) => match self.grid.occupant(next) {
                    Some(other) => self.can_merge(id, other),
                    None => true,
                },
                None => false,
            })
    }

    pub fn has_moves(&self) -> bool {
        Side::all().into_iter().any(|side| self.can_swipe(side))
    }

    /// Checks that cells and tiles reference each other consistently.
    pub fn is_consistent(&self) -> bool {
        let cells_ok = self.grid.cells().all(|cell| match cell.occupant() {
            Some(id) => self
                .tiles
                .get(id)
                .map_or(false, |tile| tile.cell() == Some(cell.coordinates())),
            None => true,
        });
        let tiles_ok = self.tiles.iter().all(|(id, tile)| {
            tile.cell()
                .map_or(false, |cell| self.grid.occupant(cell) == Some(id))
        });
        let occupied = self.grid.cells().filter(|cell| cell.is_occupied()).count();
        cells_ok && tiles_ok && occupied == self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use Side::{Down, Left, Right, Up};

    fn board(array: Array2<u64>) -> Board {
        Board::from_array(&array, TileTiers::default()).unwrap()
    }

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[rustfmt::skip]
    fn sample() -> Array2<u64> {
        Array2::from_shape_vec((4, 4), vec![
            0, 2, 4, 4,
            0, 2, 2, 4,
            0, 0, 2, 2,
            0, 0, 0, 2
        ]).unwrap()
    }

    #[test]
    fn board_from_array_and_back() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((4, 3), vec![
            8, 4, 2,
            4, 2, 0,
            2, 0, 0,
            0, 0, 16
        ]).unwrap();
        let board = board(array.clone());
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 4);
        assert_eq!(board.tile_count(), 7);
        assert_eq!(board.tile_at(0, 0).unwrap().map(Tile::value), Some(8));
        assert_eq!(board.tile_at(0, 0).unwrap().map(Tile::tier), Some(2));
        assert_eq!(board.tile_at(2, 3).unwrap().map(Tile::value), Some(16));
        assert_eq!(board.tile_at(1, 3).unwrap(), None);
        assert_eq!(board.to_array(), array);
        assert!(board.is_consistent());
    }

    #[test]
    fn board_from_array_rejects_non_powers() {
        let array = Array2::from_shape_vec((1, 3), vec![2, 3, 0]).unwrap();
        assert_eq!(
            Board::from_array(&array, TileTiers::default()).err(),
            Some(ModelError::InvalidTileValue(3))
        );
        let array = Array2::from_shape_vec((1, 2), vec![1, 0]).unwrap();
        assert_eq!(
            Board::from_array(&array, TileTiers::default()).err(),
            Some(ModelError::InvalidTileValue(1))
        );
    }

    #[test]
    fn values_that_cannot_double_are_rejected() {
        let top = 1u64 << 63;
        let array = Array2::from_shape_vec((1, 2), vec![top, top]).unwrap();
        assert_eq!(
            Board::from_array(&array, TileTiers::default()).err(),
            Some(ModelError::InvalidTileValue(top))
        );
    }

    #[test]
    fn largest_tiles_stop_merging() {
        let big = 1u64 << 62;
        let mut board = board(Array2::from_shape_vec((1, 4), vec![big; 4]).unwrap());
        let mut outcome = board.slide(Left).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![big * 2, big * 2, 0, 0]);
        assert_eq!(outcome.score_delta, u64::MAX);
        board.settle(&mut outcome, &mut rng()).unwrap();

        let outcome = board.slide(Left).unwrap();
        assert_eq!(outcome.merges, 0);
        assert_eq!(board.to_array()[[0, 0]], big * 2);
        assert_eq!(board.to_array()[[0, 1]], big * 2);
        assert!(board.is_consistent());
    }

    #[test]
    fn place_tile_on_occupied_cell_fails() {
        let mut board = board(Array2::zeros((2, 2)));
        board.place_tile(1, 1, 2).unwrap();
        assert_eq!(
            board.place_tile(1, 1, 4),
            Err(ModelError::Occupied { x: 1, y: 1 })
        );
        assert!(matches!(
            board.place_tile(2, 1, 4),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn swipe_up() {
        let mut board = board(sample());
        let outcome = board.slide(Up).unwrap();
        #[rustfmt::skip]
        let expected = Array2::from_shape_vec((4, 4), vec![
            0, 4, 4, 8,
            0, 0, 4, 4,
            0, 0, 0, 0,
            0, 0, 0, 0
        ]).unwrap();
        assert_eq!(board.to_array(), expected);
        assert!(outcome.changed);
        assert_eq!(outcome.merges, 4);
        assert_eq!(outcome.score_delta, 4 + 4 + 8 + 4);
    }

    #[test]
    fn swipe_down() {
        let mut board = board(sample());
        board.slide(Down).unwrap();
        #[rustfmt::skip]
        let expected = Array2::from_shape_vec((4, 4), vec![
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 4, 8,
            0, 4, 4, 4,
        ]).unwrap();
        assert_eq!(board.to_array(), expected);
    }

    #[test]
    fn swipe_left() {
        let mut board = board(sample());
        board.slide(Left).unwrap();
        #[rustfmt::skip]
        let expected = Array2::from_shape_vec((4, 4), vec![
            2, 8, 0, 0,
            4, 4, 0, 0,
            4, 0, 0, 0,
            2, 0, 0, 0,
        ]).unwrap();
        assert_eq!(board.to_array(), expected);
    }

    #[test]
    fn swipe_right() {
        let mut board = board(sample());
        board.slide(Right).unwrap();
        #[rustfmt::skip]
        let expected = Array2::from_shape_vec((4, 4), vec![
            0, 0, 2, 8,
            0, 0, 4, 4,
            0, 0, 0, 4,
            0, 0, 0, 2
        ]).unwrap();
        assert_eq!(board.to_array(), expected);
    }

    #[test]
    fn three_in_a_row_merge_once() {
        let mut board = board(Array2::from_shape_vec((1, 4), vec![2, 2, 2, 0]).unwrap());
        let outcome = board.slide(Left).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![4, 2, 0, 0]);
        assert_eq!(outcome.merges, 1);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn four_in_a_row_merge_pairwise() {
        let mut board = board(Array2::from_shape_vec((1, 4), vec![2, 2, 2, 2]).unwrap());
        let outcome = board.slide(Right).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![0, 0, 4, 4]);
        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn merged_tile_is_locked_until_settle() {
        let mut board = board(Array2::from_shape_vec((1, 4), vec![4, 2, 2, 0]).unwrap());
        let outcome = board.slide(Left).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![4, 4, 0, 0]);
        assert_eq!(outcome.merges, 1);
        assert!(board.tile_at(1, 0).unwrap().unwrap().is_locked());
        assert!(!board.tile_at(0, 0).unwrap().unwrap().is_locked());
    }

    #[test]
    fn merge_advances_tier_and_clamps() {
        let short = TileTiers::new(vec![
            *TileTiers::default().get(0).unwrap(),
            *TileTiers::default().get(1).unwrap(),
        ])
        .unwrap();
        let array = Array2::from_shape_vec((1, 4), vec![4, 4, 2, 2]).unwrap();
        let mut board = Board::from_array(&array, short).unwrap();
        board.slide(Left).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![8, 4, 0, 0]);
        let eight = board.tile_at(0, 0).unwrap().unwrap();
        assert_eq!(eight.tier(), 1);
        let four = board.tile_at(1, 0).unwrap().unwrap();
        assert_eq!(four.tier(), 1);
    }

    #[test]
    fn noop_swipe_changes_nothing() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((4, 4), vec![
            2, 4, 0, 0,
            4, 2, 0, 0,
            8, 0, 0, 0,
            0, 0, 0, 0
        ]).unwrap();
        let mut board = board(array.clone());
        let mut rng = rng();
        assert!(!board.can_swipe(Left));
        assert!(!board.can_swipe(Up));
        let outcome = board.swipe(Left, &mut rng).unwrap();
        assert_eq!(outcome, MoveOutcome::default());
        let outcome = board.swipe(Up, &mut rng).unwrap();
        assert!(!outcome.changed);
        assert_eq!(board.to_array(), array);
        assert_eq!(board.tile_count(), 5);
        assert!(board.tiles().all(|(_, tile)| !tile.is_locked()));
    }

    #[test]
    fn pair_merges_left_and_spawns() {
        let mut array = Array2::zeros((4, 4));
        array[(0, 0)] = 2;
        array[(0, 1)] = 2;
        let mut board = board(array);
        let mut rng = rng();

        let mut outcome = board.slide(Left).unwrap();
        let merged = board.tile_at(0, 0).unwrap().copied().unwrap();
        assert_eq!(merged.value(), 4);
        assert!(merged.is_locked());
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(board.tile_count(), 1);

        board.settle(&mut outcome, &mut rng).unwrap();
        assert!(!board.tile_at(0, 0).unwrap().unwrap().is_locked());
        assert_eq!(board.tile_count(), 2);
        let spawned = board.tile(outcome.spawned.unwrap()).unwrap();
        assert_eq!(spawned.value(), 2);
        assert_ne!(spawned.cell(), Some((0, 0)));
        assert!(!outcome.game_over);
        assert!(board.is_consistent());
        assert!(matches!(
            outcome.events.last(),
            Some(BoardEvent::TileSpawned { value: 2, .. })
        ));
    }

    #[test]
    fn events_describe_moves_and_merges() {
        let array = Array2::from_shape_vec((1, 4), vec![0, 2, 0, 2]).unwrap();
        let mut board = board(array);
        let first = board.grid().occupant((1, 0)).unwrap();
        let second = board.grid().occupant((3, 0)).unwrap();
        let outcome = board.slide(Left).unwrap();
        assert_eq!(
            outcome.events,
            vec![
                BoardEvent::TileMoved {
                    tile: first,
                    from: (1, 0),
                    to: (0, 0)
                },
                BoardEvent::TileMerged {
                    source: second,
                    dest: first,
                    from: (3, 0),
                    into: (0, 0),
                    value: 4
                },
            ]
        );
        assert!(board.tile(second).is_none());
    }

    #[test]
    fn full_board_without_pairs_is_game_over() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((4, 4), vec![
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 2, 4,
            4, 2, 4, 2
        ]).unwrap();
        let board = board(array);
        assert!(board.is_game_over());
        assert!(!board.has_moves());
    }

    #[test]
    fn full_board_with_pair_is_not_game_over() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((4, 4), vec![
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 8, 8,
            4, 2, 4, 2
        ]).unwrap();
        let board = board(array);
        assert!(!board.is_game_over());
        assert!(board.can_swipe(Left));
        assert!(!board.can_swipe(Up));
    }

    #[test]
    fn locked_pair_counts_as_stuck_until_settle() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((2, 2), vec![
            8, 8,
            2, 4
        ]).unwrap();
        let mut board = board(array);
        assert!(!board.is_game_over());
        // both eights were just produced by merges in this pass
        for cell in [(0, 0), (1, 0)] {
            let id = board.grid.occupant(cell).unwrap();
            board.tiles.get_mut(id).unwrap().set_locked(true);
        }
        assert!(board.is_full());
        assert!(board.is_game_over());

        let mut outcome = MoveOutcome {
            changed: true,
            ..MoveOutcome::default()
        };
        board.settle(&mut outcome, &mut rng()).unwrap();
        assert_eq!(outcome.spawned, None);
        assert!(board.tiles().all(|(_, tile)| !tile.is_locked()));
        assert!(!outcome.game_over);
        assert!(!board.is_game_over());
    }

    #[test]
    fn board_with_gap_is_not_game_over() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((2, 2), vec![
            2, 4,
            4, 0
        ]).unwrap();
        assert!(!board(array).is_game_over());
    }

    #[test]
    fn last_spawn_can_end_game() {
        #[rustfmt::skip]
        let array = Array2::from_shape_vec((2, 2), vec![
            0, 8,
            8, 4
        ]).unwrap();
        let mut board = board(array);
        let outcome = board.swipe(Up, &mut rng()).unwrap();
        // 8 moves up into the corner, the spawn fills (0, 1) with a 2
        #[rustfmt::skip]
        let expected = Array2::from_shape_vec((2, 2), vec![
            8, 8,
            2, 4
        ]).unwrap();
        assert_eq!(board.to_array(), expected);
        assert!(board.is_full());
        assert!(!outcome.game_over);

        #[rustfmt::skip]
        let array = Array2::from_shape_vec((2, 2), vec![
            0, 4,
            8, 16
        ]).unwrap();
        let mut board = self::board(array);
        let outcome = board.swipe(Up, &mut rng()).unwrap();
        assert_eq!(board.to_array().into_raw_vec(), vec![8, 4, 2, 16]);
        assert!(outcome.game_over);
    }

    #[test]
    fn clear_then_create_two_tiles() {
        let mut board = board(sample());
        let mut rng = rng();
        board.clear();
        assert_eq!(board.tile_count(), 0);
        assert!(board.grid().cells().all(|cell| cell.is_empty()));
        let a = board.create_tile(&mut rng).unwrap().unwrap();
        let b = board.create_tile(&mut rng).unwrap().unwrap();
        assert_ne!(board.tile(a).unwrap().cell(), board.tile(b).unwrap().cell());
        assert_eq!(board.tile_count(), 2);
        assert!(board.tiles().all(|(_, tile)| tile.value() == 2 && tile.tier() == 0));
        assert!(board.is_consistent());
    }

    #[test]
    fn create_tile_on_full_board_is_none() {
        let mut board = board(Array2::from_elem((2, 2), 2));
        assert_eq!(board.create_tile(&mut rng()), Ok(None));
        assert_eq!(board.max_value(), 2);
    }

    #[test]
    fn single_cell_board() {
        let mut board = board(Array2::from_elem((1, 1), 2));
        let mut rng = rng();
        for side in Side::all() {
            assert!(!board.swipe(side, &mut rng).unwrap().changed);
        }
        assert!(board.is_game_over());
    }
}
