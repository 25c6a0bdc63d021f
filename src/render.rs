use std::fmt::Write;

use model::{Board, Game, GameObserver, GameState, TileId, TileTier};
use tracing::{debug, info, trace};

const EMPTY_BACKGROUND: [u8; 3] = [128, 128, 128];
const RESET: &str = "\u{1b}[0m";

/// Draws the field as text, optionally with 24-bit ANSI colours from the tier palette.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, game: &Game) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "score: {}   best: {}", game.score(), game.high_score());
        out.push_str(&self.render_board(game.board()));
        match game.state() {
            GameState::GameOver => {
                out.push_str("Game over! n - new game, q - quit\n");
            }
            GameState::NotStarted => {
                out.push_str("n - new game, q - quit\n");
            }
            GameState::Playing => {}
        }
        out
    }

    pub fn render_board(&self, board: &Board) -> String {
        let width = Self::tile_width(board.max_value());
        let border = format!(
            "+{}\n",
            format!("{}+", "-".repeat(width + 2)).repeat(board.width())
        );
        let mut out = border.clone();
        for y in 0..board.height() {
            out.push('|');
            for x in 0..board.width() {
                let tile = board.tile_at(x, y).ok().flatten();
                let text = tile.map_or_else(|| ".".to_string(), |t| t.value().to_string());
                let cell = format!(" {:>width$} ", text, width = width);
                match (self.color, tile) {
                    (true, Some(tile)) => {
                        let tier = board.tiers().get(tile.tier());
                        out.push_str(&Self::paint(&cell, tier));
                    }
                    (true, None) => out.push_str(&Self::paint(
                        &cell,
                        Some(&TileTier {
                            background: EMPTY_BACKGROUND,
                            text: EMPTY_BACKGROUND,
                        }),
                    )),
                    (false, _) => out.push_str(&cell),
                }
                out.push('|');
            }
            out.push('\n');
            out.push_str(&border);
        }
        out
    }

    fn tile_width(max_value: u64) -> usize {
        max_value.to_string().len().max(4)
    }

    fn paint(text: &str, tier: Option<&TileTier>) -> String {
        match tier {
            Some(TileTier { background, text: fg }) => format!(
                "\u{1b}[48;2;{};{};{}m\u{1b}[38;2;{};{};{}m{}{}",
                background[0], background[1], background[2], fg[0], fg[1], fg[2], text, RESET
            ),
            None => text.to_string(),
        }
    }
}

/// Reports game events through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_score_increased(&mut self, delta: u64, score: u64) {
        debug!(delta, score, "score increased");
    }
    fn on_tile_spawned(&mut self, tile: TileId, cell: (usize, usize), value: u64) {
        trace!(%tile, ?cell, value, "tile spawned");
    }
    fn on_tile_moved(&mut self, tile: TileId, from: (usize, usize), to: (usize, usize)) {
        trace!(%tile, ?from, ?to, "tile moved");
    }
    fn on_tile_merged(&mut self, source: TileId, dest: TileId, value: u64) {
        trace!(%source, %dest, value, "tiles merged");
    }
    fn on_game_over(&mut self) {
        info!("no moves left");
    }
}
