//! Game logic of a 2048-style sliding tile puzzle.
//!
//! [`Board`] runs single moves over a [`Grid`] of cells and an arena of
//! [`Tile`]s; [`Game`] wraps it with score keeping and the game lifecycle.
//! Rendering, input and persistence are left to the caller through
//! [`GameObserver`] and [`HighScoreStore`].

pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod side;
pub mod tier;
pub mod tile;

pub use board::{Board, BoardEvent, MoveOutcome};
pub use cell::Cell;
pub use config::BoardConfig;
pub use error::{ModelError, StoreError};
pub use game::{Game, GameObserver, GameState, HighScoreStore, MemoryStore, NoopObserver};
pub use grid::Grid;
pub use side::Side;
pub use tier::{TileTier, TileTiers};
pub use tile::{Tile, TileId, Tiles};
