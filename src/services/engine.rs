use std::sync::Arc;

use tracing::Instrument;

use crate::{
    config::RecommenderConfig,
    error::{AppError, AppResult},
    models::{Characteristic, Game, GameId, Recommendation, UserId},
    services::{
        collaborative::{similarities_to, CollaborativeRecommender},
        content::ContentRecommender,
        providers::Snapshot,
    },
    store::{Catalog, UserStore},
    telemetry::RequestId,
};

/// Entry point for both recommenders over one shared snapshot
///
/// The snapshot is read-only; every call is a pure function of it and the
/// call's arguments.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    users: Arc<UserStore>,
    config: RecommenderConfig,
}

impl RecommendationEngine {
    pub fn new(snapshot: Snapshot, config: RecommenderConfig) -> Self {
        Self::from_parts(Arc::new(snapshot.catalog), Arc::new(snapshot.users), config)
    }

    pub fn from_parts(
        catalog: Arc<Catalog>,
        users: Arc<UserStore>,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            catalog,
            users,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    fn collaborative(&self) -> CollaborativeRecommender<'_> {
        CollaborativeRecommender::new(&self.catalog, &self.users, &self.config)
    }

    /// Games liked by the users most similar to `user_id`
    pub fn collaborative_recommend(&self, user_id: UserId) -> AppResult<Vec<Recommendation<'_>>> {
        RequestId::generate().span("collaborative").in_scope(|| -> AppResult<_> {
            let recommendations = self.collaborative().recommend(user_id)?;
            tracing::info!(
                user_id,
                count = recommendations.len(),
                "Collaborative recommendations generated"
            );
            Ok(recommendations)
        })
    }

    /// Same result as `collaborative_recommend`, with the similarity pass
    /// split across `workers` blocking tasks
    ///
    /// A worker that fails is logged and its users are left out of the
    /// neighborhood rather than failing the request.
    pub async fn collaborative_recommend_concurrent(
        &self,
        user_id: UserId,
        workers: usize,
    ) -> AppResult<Vec<Recommendation<'_>>> {
        let span = RequestId::generate().span("collaborative_concurrent");

        async move {
            let target = self
                .users
                .user_by_id(user_id)
                .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

            let total = self.users.len();
            let chunk_size = total.div_ceil(workers.max(1)).max(1);

            let mut tasks = Vec::new();
            for start in (0..total).step_by(chunk_size) {
                let users = Arc::clone(&self.users);
                let end = (start + chunk_size).min(total);
                let task = tokio::task::spawn_blocking(move || {
                    let Some(target) = users.user_by_id(user_id) else {
                        return Vec::new();
                    };
                    similarities_to(target, &users.all()[start..end])
                });
                tasks.push(task);
            }

            // Fan-in in chunk order keeps neighbor tie-breaking identical to the sequential path
            let mut similarities = Vec::with_capacity(total);
            let mut failed = 0usize;
            for task in tasks {
                match task.await {
                    Ok(chunk) => similarities.extend(chunk),
                    Err(e) => {
                        tracing::error!(error = %e, "Similarity worker failed");
                        failed += 1;
                    }
                }
            }

            if failed > 0 {
                tracing::warn!(
                    failed,
                    computed = similarities.len(),
                    "Partial similarity computation"
                );
            }

            let recommendations = self
                .collaborative()
                .recommend_from_similarities(target, similarities);

            tracing::info!(
                user_id,
                workers,
                count = recommendations.len(),
                "Collaborative recommendations generated"
            );
            Ok(recommendations)
        }
        .instrument(span)
        .await
    }

    /// Games sharing characteristics with `reference`
    pub fn content_recommend(
        &self,
        reference: &Game,
        weight: f64,
        favorable: &Characteristic,
    ) -> Vec<Recommendation<'_>> {
        RequestId::generate().span("content").in_scope(|| {
            let recommendations = ContentRecommender::new(&self.catalog, &self.config)
                .recommend(reference, weight, favorable);
            tracing::info!(
                game_id = reference.id,
                weight,
                count = recommendations.len(),
                "Content recommendations generated"
            );
            recommendations
        })
    }

    /// `content_recommend` for a reference game looked up in the catalog
    pub fn content_recommend_by_id(
        &self,
        game_id: GameId,
        weight: f64,
        favorable: &Characteristic,
    ) -> AppResult<Vec<Recommendation<'_>>> {
        let reference = self.catalog.require(game_id)?;
        Ok(self.content_recommend(reference, weight, favorable))
    }
}
