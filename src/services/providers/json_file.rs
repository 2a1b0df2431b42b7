use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize};

use super::SnapshotProvider;
use crate::{
    error::{AppError, AppResult},
    models::{Game, GameId, Rating, User, UserId, MAX_RATING},
};

/// Reads games and users from JSON files on disk
///
/// Game records carry no id of their own; ids are assigned from each
/// record's position in the file, starting at 0.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    games_path: PathBuf,
    users_path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(games_path: impl Into<PathBuf>, users_path: impl Into<PathBuf>) -> Self {
        Self {
            games_path: games_path.into(),
            users_path: users_path.into(),
        }
    }
}

/// User record as stored on disk
///
/// Ratings are read as wide signed integers so a single bad value drops
/// only that rating instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(rename = "ID", alias = "id")]
    id: UserId,
    #[serde(rename = "Ratings", alias = "ratings", default)]
    ratings: BTreeMap<GameId, i64>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let mut dropped = Vec::new();
        let ratings = record
            .ratings
            .into_iter()
            .filter_map(|(game_id, raw)| match Rating::try_from(raw) {
                Ok(rating) if rating <= MAX_RATING => Some((game_id, rating)),
                _ => {
                    dropped.push((game_id, raw));
                    None
                }
            })
            .collect();

        if !dropped.is_empty() {
            tracing::warn!(
                user_id = record.id,
                ratings = ?dropped,
                "Dropping out-of-range ratings"
            );
        }

        User::new(record.id, ratings)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(path.display().to_string())
        } else {
            AppError::Io(e)
        }
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse JSON");
        AppError::Json(e)
    })
}

#[async_trait::async_trait]
impl SnapshotProvider for JsonFileProvider {
    async fn load_games(&self) -> AppResult<Vec<Game>> {
        let mut games: Vec<Game> = read_json(&self.games_path).await?;
        for (position, game) in games.iter_mut().enumerate() {
            game.id = position as GameId;
        }

        tracing::debug!(path = %self.games_path.display(), count = games.len(), "Games read");
        Ok(games)
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        let records: Vec<UserRecord> = read_json(&self.users_path).await?;
        let users: Vec<User> = records.into_iter().map(User::from).collect();
        tracing::debug!(path = %self.users_path.display(), count = users.len(), "Users read");
        Ok(users)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
