use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::OnceCell;

use super::SnapshotProvider;
use crate::{
    error::{AppError, AppResult},
    models::{Game, GameId, User, UserId, MAX_RATING, UNRATED},
};

/// Generates random ratings for every game in `game_ids`
///
/// Each rating is drawn uniformly from `1..=MAX_RATING`; with probability
/// `unrated_ratio` the game is instead left at `UNRATED`.
pub fn generate_users<R: Rng + ?Sized>(
    rng: &mut R,
    user_count: usize,
    game_ids: &[GameId],
    unrated_ratio: f64,
) -> Vec<User> {
    let unrated_ratio = if unrated_ratio.is_nan() {
        0.0
    } else {
        unrated_ratio.clamp(0.0, 1.0)
    };

    (0..user_count)
        .map(|id| {
            let ratings: BTreeMap<GameId, u8> = game_ids
                .iter()
                .map(|&game_id| {
                    let rating = if rng.gen_bool(unrated_ratio) {
                        UNRATED
                    } else {
                        rng.gen_range(1..=MAX_RATING)
                    };
                    (game_id, rating)
                })
                .collect();
            User::new(id as UserId, ratings)
        })
        .collect()
}

/// Wraps another provider, replacing its users with seeded random ones
///
/// Game ids seen by `load_games` are remembered, so the inner provider's
/// games are only read once per snapshot.
pub struct SyntheticUsersProvider<P> {
    inner: P,
    user_count: usize,
    seed: u64,
    unrated_ratio: f64,
    game_ids: OnceCell<Vec<GameId>>,
}

impl<P: SnapshotProvider> SyntheticUsersProvider<P> {
    pub fn new(inner: P, user_count: usize, seed: u64) -> Self {
        Self {
            inner,
            user_count,
            seed,
            unrated_ratio: 0.5,
            game_ids: OnceCell::new(),
        }
    }

    pub fn with_unrated_ratio(mut self, unrated_ratio: f64) -> Self {
        self.unrated_ratio = unrated_ratio;
        self
    }
}

#[async_trait::async_trait]
impl<P: SnapshotProvider> SnapshotProvider for SyntheticUsersProvider<P> {
    async fn load_games(&self) -> AppResult<Vec<Game>> {
        let games = self.inner.load_games().await?;
        // Keep the first set of ids so repeated loads generate the same users
        self.game_ids
            .get_or_init(|| async { games.iter().map(|game| game.id).collect() })
            .await;
        Ok(games)
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        let game_ids = self
            .game_ids
            .get_or_try_init(|| async {
                let games = self.inner.load_games().await?;
                Ok::<_, AppError>(games.iter().map(|game| game.id).collect())
            })
            .await?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let users = generate_users(&mut rng, self.user_count, game_ids, self.unrated_ratio);

        tracing::info!(
            users = users.len(),
            games = game_ids.len(),
            seed = self.seed,
            "Generated synthetic ratings"
        );
        Ok(users)
    }

    fn name(&self) -> &'static str {
        "synthetic_users"
    }
}
