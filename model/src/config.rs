use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tier::TileTiers;

fn d_width() -> usize {
    4
}
fn d_height() -> usize {
    4
}
fn d_initial_tiles() -> usize {
    2
}

/// Shape of the board and the tier palette, usually read from the `[board]`
/// section of `config.toml`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "d_width")]
    pub width: usize,
    #[serde(default = "d_height")]
    pub height: usize,
    /// Base tiles placed by a new game.
    #[serde(default = "d_initial_tiles")]
    pub initial_tiles: usize,
    #[serde(default)]
    pub tiers: TileTiers,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: d_width(),
            height: d_height(),
            initial_tiles: d_initial_tiles(),
            tiers: TileTiers::default(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.width == 0 || self.height == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tiers.is_empty() {
            return Err(ModelError::InvalidConfig(
                "tile tier palette is empty".to_string(),
            ));
        }
        if self.initial_tiles > self.width * self.height {
            return Err(ModelError::InvalidConfig(format!(
                "{} initial tiles do not fit on a {}x{} board",
                self.initial_tiles, self.width, self.height
            )));
        }
        Ok(())
    }
}
