//! Snapshot data sources
//!
//! Games and users are loaded once into immutable `Catalog` and `UserStore`
//! snapshots. Each provider only knows how to produce the raw records.

use crate::{
    error::AppResult,
    models::{Game, User},
    store::{Catalog, UserStore},
};

pub mod json_file;
pub mod synthetic;

pub use json_file::JsonFileProvider;
pub use synthetic::SyntheticUsersProvider;

/// Trait for game and rating data sources
#[async_trait::async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Every game, with unique ids already assigned
    async fn load_games(&self) -> AppResult<Vec<Game>>;

    /// Every user with their ratings
    async fn load_users(&self) -> AppResult<Vec<User>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// A loaded, read-only view of the whole population
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub users: UserStore,
}

/// Loads games and users from a provider into snapshots
pub async fn load_snapshot(provider: &dyn SnapshotProvider) -> AppResult<Snapshot> {
    let games = provider.load_games().await?;
    let catalog = Catalog::new(games)?;

    let users = UserStore::new(provider.load_users().await?);

    tracing::info!(
        provider = provider.name(),
        games = catalog.len(),
        users = users.len(),
        "Snapshot loaded"
    );

    Ok(Snapshot { catalog, users })
}
