use std::collections::HashMap;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use model::Side;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Swipe(Side),
    NewGame,
    Quit,
}

lazy_static! {
    static ref KEY_BINDINGS: HashMap<&'static str, Command> = {
        let mut keys = HashMap::new();
        for (names, side) in [
            (["w", "up", "k"], Side::Up),
            (["s", "down", "j"], Side::Down),
            (["a", "left", "h"], Side::Left),
            (["d", "right", "l"], Side::Right),
        ] {
            for name in names {
                keys.insert(name, Command::Swipe(side));
            }
        }
        // arrow keys arrive as escape sequences when the terminal is in line mode
        keys.insert("\u{1b}[A", Command::Swipe(Side::Up));
        keys.insert("\u{1b}[B", Command::Swipe(Side::Down));
        keys.insert("\u{1b}[D", Command::Swipe(Side::Left));
        keys.insert("\u{1b}[C", Command::Swipe(Side::Right));
        keys.insert("n", Command::NewGame);
        keys.insert("new", Command::NewGame);
        keys.insert("r", Command::NewGame);
        keys.insert("q", Command::Quit);
        keys.insert("quit", Command::Quit);
        keys
    };
}

impl Command {
    /// Maps one line of input to a command; unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let key = line.trim();
        KEY_BINDINGS
            .get(key)
            .or_else(|| KEY_BINDINGS.get(key.to_ascii_lowercase().as_str()))
            .copied()
    }
}

/// Swipes that arrive while the previous move is still settling are dropped.
#[derive(Clone, Copy, Debug)]
pub struct SettleGuard {
    delay: Duration,
    busy_until: Option<Instant>,
}

impl SettleGuard {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            busy_until: None,
        }
    }

    pub fn is_waiting(&self, now: Instant) -> bool {
        self.busy_until.map_or(false, |until| now < until)
    }

    pub fn start(&mut self, now: Instant) {
        if !self.delay.is_zero() {
            self.busy_until = Some(now + self.delay);
        }
    }
}
