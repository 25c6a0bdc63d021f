use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("cell ({x}, {y}) is outside of {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("expected values 0, 2, 4, 8, 16..., got {0}")]
    InvalidTileValue(u64),
}

/// Failures of the high score collaborator. These never stop a game.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score store i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score store format: {0}")]
    Format(String),
}
