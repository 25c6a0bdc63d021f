use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Visual identity of a tile rank. The engine only cares about the position
/// of a tier in [`TileTiers`], never about its colours.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TileTier {
    pub background: [u8; 3],
    pub text: [u8; 3],
}

const DIM_GRAY: [u8; 3] = [105, 105, 105];
const WHITE_SMOKE: [u8; 3] = [245, 245, 245];

const fn tier(background: [u8; 3], text: [u8; 3]) -> TileTier {
    TileTier { background, text }
}

/// Palette from 2 up to 2048, plus one catch-all tier for everything above.
const CLASSIC: [TileTier; 12] = [
    tier([238, 228, 218], DIM_GRAY),
    tier([237, 224, 200], DIM_GRAY),
    tier([242, 177, 121], WHITE_SMOKE),
    tier([242, 177, 121], WHITE_SMOKE),
    tier([246, 124, 95], WHITE_SMOKE),
    tier([246, 124, 95], WHITE_SMOKE),
    tier([237, 207, 114], WHITE_SMOKE),
    tier([237, 207, 97], WHITE_SMOKE),
    tier([237, 200, 80], WHITE_SMOKE),
    tier([237, 197, 63], WHITE_SMOKE),
    tier([237, 194, 46], WHITE_SMOKE),
    tier([60, 58, 60], WHITE_SMOKE),
];

/// Ordered, immutable tier palette. Tier `i` corresponds to value `2^(i+1)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileTiers(Vec<TileTier>);

impl Default for TileTiers {
    fn default() -> Self {
        Self(CLASSIC.to_vec())
    }
}

impl TileTiers {
    pub fn new(tiers: Vec<TileTier>) -> Result<Self, ModelError> {
        if tiers.is_empty() {
            return Err(ModelError::InvalidConfig(
                "tile tier palette is empty".to_string(),
            ));
        }
        Ok(Self(tiers))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&TileTier> {
        self.0.get(index)
    }
    pub fn last_index(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
    /// Tier reached after one merge; stays on the last tier once there.
    pub fn next(&self, index: usize) -> usize {
        (index + 1).min(self.last_index())
    }
    /// Tier for a tile value, clamped to the palette.
    pub fn index_of(&self, value: u64) -> usize {
        let rank = value.max(2).trailing_zeros() as usize - 1;
        rank.min(self.last_index())
    }
    pub fn value_of(index: usize) -> u64 {
        2 << index
    }
}
