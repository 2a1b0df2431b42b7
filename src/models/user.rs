use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GameId;

pub type UserId = u32;

/// Rating value; 0 means the user has not rated the game
pub type Rating = u8;

/// Sentinel for "no rating exists"
pub const UNRATED: Rating = 0;

/// Highest valid rating
pub const MAX_RATING: Rating = 5;

/// A user and their sparse rating vector
///
/// An absent game id and an explicit 0 rating mean the same thing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "ID", alias = "id")]
    pub id: UserId,
    #[serde(rename = "Ratings", alias = "ratings", default)]
    pub ratings: BTreeMap<GameId, Rating>,
}

impl User {
    pub fn new(id: UserId, ratings: BTreeMap<GameId, Rating>) -> Self {
        Self { id, ratings }
    }

    /// Rating for a game, `UNRATED` when absent
    pub fn rating(&self, game_id: GameId) -> Rating {
        self.ratings.get(&game_id).copied().unwrap_or(UNRATED)
    }

    pub fn has_rated(&self, game_id: GameId) -> bool {
        self.rating(game_id) != UNRATED
    }

    /// Genuine (nonzero) ratings in game id order
    pub fn rated_games(&self) -> impl Iterator<Item = (GameId, Rating)> + '_ {
        self.ratings
            .iter()
            .filter(|(_, rating)| **rating != UNRATED)
            .map(|(game_id, rating)| (*game_id, *rating))
    }

    /// Game ids whose rating falls outside `0..=MAX_RATING`
    pub fn invalid_ratings(&self) -> Vec<GameId> {
        self.ratings
            .iter()
            .filter(|(_, rating)| **rating > MAX_RATING)
            .map(|(game_id, _)| *game_id)
            .collect()
    }
}
