//! User-user collaborative filtering
//!
//! The target user is compared with every other user, the most similar
//! users form a neighborhood, and games a neighbor rated highly but the
//! target never rated become candidates scored by that neighbor's similarity.

use std::collections::HashMap;

use crate::{
    config::{MergePolicy, RecommenderConfig},
    error::{AppError, AppResult},
    models::{GameId, Recommendation, User, UserId},
    services::{
        neighbors::{select_neighbors, Neighbor},
        ranking::rank,
        similarity::cosine_similarity,
    },
    store::{Catalog, UserStore},
};

/// Similarity of `target` to each user in `others`, excluding the target itself
pub fn similarities_to(target: &User, others: &[User]) -> Vec<Neighbor> {
    others
        .iter()
        .filter(|other| other.id != target.id)
        .map(|other| Neighbor::new(other.id, cosine_similarity(&target.ratings, &other.ratings)))
        .collect()
}

pub struct CollaborativeRecommender<'a> {
    catalog: &'a Catalog,
    users: &'a UserStore,
    config: &'a RecommenderConfig,
}

impl<'a> CollaborativeRecommender<'a> {
    pub fn new(catalog: &'a Catalog, users: &'a UserStore, config: &'a RecommenderConfig) -> Self {
        Self {
            catalog,
            users,
            config,
        }
    }

    /// Ranked recommendations for a user
    pub fn recommend(&self, user_id: UserId) -> AppResult<Vec<Recommendation<'a>>> {
        let target = self
            .users
            .user_by_id(user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

        let similarities = similarities_to(target, self.users.all());
        Ok(self.recommend_from_similarities(target, similarities))
    }

    /// Neighbor selection, candidate generation and ranking over precomputed similarities
    pub fn recommend_from_similarities(
        &self,
        target: &User,
        similarities: Vec<Neighbor>,
    ) -> Vec<Recommendation<'a>> {
        let compared = similarities.len();
        let neighbors = select_neighbors(similarities, self.config.neighborhood_size);

        tracing::debug!(
            user_id = target.id,
            compared,
            neighbors = neighbors.len(),
            "Neighborhood selected"
        );

        let mut candidates = CandidateAccumulator::new(self.config.merge_policy);
        for neighbor in &neighbors {
            let Some(neighbor_user) = self.users.user_by_id(neighbor.user_id) else {
                tracing::warn!(user_id = neighbor.user_id, "Neighbor missing from user store");
                continue;
            };

            for (game_id, rating) in neighbor_user.rated_games() {
                if target.has_rated(game_id) || rating <= self.config.positive_rating_threshold {
                    continue;
                }

                match self.catalog.game_by_id(game_id) {
                    Some(game) => candidates.offer(Recommendation::new(game, neighbor.similarity)),
                    None => tracing::debug!(game_id, "Skipping rating for unknown game"),
                }
            }
        }

        rank(candidates.into_vec())
    }
}

/// Collects candidates, merging repeats of the same game per `MergePolicy`
struct CandidateAccumulator<'a> {
    policy: MergePolicy,
    candidates: Vec<Recommendation<'a>>,
    positions: HashMap<GameId, usize>,
}

impl<'a> CandidateAccumulator<'a> {
    fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            candidates: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn offer(&mut self, candidate: Recommendation<'a>) {
        if self.policy == MergePolicy::KeepAll {
            self.candidates.push(candidate);
            return;
        }

        match self.positions.get(&candidate.game.id) {
            Some(&position) => {
                let existing = &mut self.candidates[position];
                if candidate.score > existing.score {
                    existing.score = candidate.score;
                }
            }
            None => {
                self.positions
                    .insert(candidate.game.id, self.candidates.len());
                self.candidates.push(candidate);
            }
        }
    }

    fn into_vec(self) -> Vec<Recommendation<'a>> {
        self.candidates
    }
}
