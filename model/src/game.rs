use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, BoardEvent, MoveOutcome};
use crate::config::BoardConfig;
use crate::error::{ModelError, StoreError};
use crate::side::Side;
use crate::tile::TileId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    NotStarted,
    Playing,
    GameOver,
}

/// Persistent storage for the best score.
pub trait HighScoreStore {
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&mut self, high_score: u64) -> Result<(), StoreError>;
}

/// Keeps the high score for the lifetime of the process only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(u64);

impl MemoryStore {
    pub fn new(high_score: u64) -> Self {
        Self(high_score)
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.0)
    }
    fn save(&mut self, high_score: u64) -> Result<(), StoreError> {
        self.0 = high_score;
        Ok(())
    }
}

/// Receives state changes, e.g. to render or animate them.
pub trait GameObserver {
    fn on_score_increased(&mut self, _delta: u64, _score: u64) {}
    fn on_tile_spawned(&mut self, _tile: TileId, _cell: (usize, usize), _value: u64) {}
    fn on_tile_moved(&mut self, _tile: TileId, _from: (usize, usize), _to: (usize, usize)) {}
    fn on_tile_merged(&mut self, _source: TileId, _dest: TileId, _value: u64) {}
    fn on_game_over(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

pub struct Game {
    board: Board,
    initial_tiles: usize,
    score: u64,
    high_score: u64,
    state: GameState,
    rng: ChaCha20Rng,
    store: Box<dyn HighScoreStore>,
    observer: Box<dyn GameObserver>,
}

impl Game {
    pub fn new(
        config: &BoardConfig,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        observer: Box<dyn GameObserver>,
    ) -> Result<Self, ModelError> {
        let board = Board::new(config)?;
        let mut game = Self {
            board,
            initial_tiles: config.initial_tiles,
            score: 0,
            high_score: 0,
            state: GameState::NotStarted,
            rng: ChaCha20Rng::seed_from_u64(seed),
            store,
            observer,
        };
        game.high_score = game.load_high_score();
        Ok(game)
    }

    /// Game with an in-memory high score and no observer.
    pub fn with_seed(config: &BoardConfig, seed: u64) -> Result<Self, ModelError> {
        Self::new(
            config,
            seed,
            Box::new(MemoryStore::default()),
            Box::new(NoopObserver),
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn score(&self) -> u64 {
        self.score
    }
    pub fn high_score(&self) -> u64 {
        self.high_score
    }
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn new_game(&mut self) -> Result<(), ModelError> {
        self.score = 0;
        self.high_score = self.load_high_score();
        self.board.clear();
        for _ in 0..self.initial_tiles {
            if let Some(id) = self.board.create_tile(&mut self.rng)? {
                if let Some((cell, value)) = self
                    .board
                    .tile(id)
                    .and_then(|tile| tile.cell().map(|cell| (cell, tile.value())))
                {
                    self.observer.on_tile_spawned(id, cell, value);
                }
            }
        }
        self.state = GameState::Playing;
        info!(
            width = self.board.width(),
            height = self.board.height(),
            high_score = self.high_score,
            "new game"
        );
        Ok(())
    }

    /// Plays one move. Input is ignored (`None`) unless a game is running.
    pub fn swipe(&mut self, side: Side) -> Result<Option<MoveOutcome>, ModelError> {
        if self.state != GameState::Playing {
            debug!(?side, state = ?self.state, "swipe ignored");
            return Ok(None);
        }
        let outcome = self.board.swipe(side, &mut self.rng)?;
        for event in &outcome.events {
            match *event {
                BoardEvent::TileMoved { tile, from, to } => {
                    self.observer.on_tile_moved(tile, from, to)
                }
                BoardEvent::TileMerged {
                    source,
                    dest,
                    value,
                    ..
                } => {
                    self.observer.on_tile_merged(source, dest, value);
                    self.increase_score(value);
                }
                BoardEvent::TileSpawned { tile, cell, value } => {
                    self.observer.on_tile_spawned(tile, cell, value)
                }
            }
        }
        if outcome.game_over {
            self.game_over();
        }
        Ok(Some(outcome))
    }

    pub fn increase_score(&mut self, delta: u64) {
        self.score = self.score.saturating_add(delta);
        self.observer.on_score_increased(delta, self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(e) = self.store.save(self.high_score) {
                warn!("failed to save high score {}: {}", self.high_score, e);
            }
        }
    }

    pub fn game_over(&mut self) {
        self.state = GameState::GameOver;
        info!(score = self.score, max_tile = self.board.max_value(), "game over");
        self.observer.on_game_over();
    }

    fn load_high_score(&self) -> u64 {
        self.store.load().unwrap_or_else(|e| {
            warn!("failed to load high score: {}", e);
            0
        })
    }
}
