use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Characteristic, Data, Game, GameId},
};

/// Immutable snapshot of every loaded game
///
/// Games keep their load order; lookups by id go through an index so
/// ratings that reference games outside a loaded subset resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<Game>,
    index: HashMap<GameId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate game ids
    pub fn new(games: Vec<Game>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(games.len());
        for (position, game) in games.iter().enumerate() {
            if index.insert(game.id, position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "duplicate game id {}",
                    game.id
                )));
            }
        }

        Ok(Self { games, index })
    }

    pub fn game_by_id(&self, id: GameId) -> Option<&Game> {
        self.index.get(&id).map(|&position| &self.games[position])
    }

    /// Like `game_by_id` but with a `NotFound` error
    pub fn require(&self, id: GameId) -> AppResult<&Game> {
        self.game_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("game {}", id)))
    }

    pub fn all(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Resolves characteristic names to the exact values present in the catalog
    ///
    /// Every distinct `Data` with a matching name is included, so a name that
    /// appears with several descriptions yields several entries.
    pub fn favorable_from_names(
        &self,
        categories: &[String],
        mechanisms: &[String],
    ) -> Characteristic {
        let mut favorable = Characteristic::default();
        for game in &self.games {
            collect_named(
                &game.characteristic.categories,
                categories,
                &mut favorable.categories,
            );
            collect_named(
                &game.characteristic.mechanisms,
                mechanisms,
                &mut favorable.mechanisms,
            );
        }
        favorable
    }
}

fn collect_named(source: &[Data], names: &[String], out: &mut Vec<Data>) {
    for data in source {
        if names.iter().any(|name| *name == data.name) && !out.contains(data) {
            out.push(data.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: GameId, name: &str) -> Game {
        Game::new(id, name, Characteristic::default())
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![game(3, "Catan"), game(7, "Agricola")]).unwrap();
        assert_eq!(catalog.game_by_id(7).unwrap().name, "Agricola");
        assert!(catalog.game_by_id(4).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_require_unknown_is_not_found() {
        let catalog = Catalog::new(vec![game(0, "Catan")]).unwrap();
        let err = catalog.require(12).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![game(1, "Catan"), game(1, "Pandemic")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_favorable_from_names_keeps_every_description() {
        let war_a = Data::new("Wargame", "military");
        let war_b = Data::new("Wargame", "conflict");
        let dice = Data::new("Dice Rolling", "dice");
        let catalog = Catalog::new(vec![
            Game::new(0, "A", Characteristic::new(vec![war_a.clone()], vec![dice.clone()])),
            Game::new(1, "B", Characteristic::new(vec![war_b.clone(), war_a.clone()], vec![])),
        ])
        .unwrap();

        let favorable =
            catalog.favorable_from_names(&["Wargame".to_string()], &["Dice Rolling".to_string()]);
        assert_eq!(favorable.categories, vec![war_a, war_b]);
        assert_eq!(favorable.mechanisms, vec![dice]);
    }
}
