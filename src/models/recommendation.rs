use serde::Serialize;

use super::Game;

/// A scored candidate, borrowing its game from the catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Recommendation<'a> {
    pub game: &'a Game,
    pub score: f64,
}

impl<'a> Recommendation<'a> {
    pub fn new(game: &'a Game, score: f64) -> Self {
        Self { game, score }
    }
}
