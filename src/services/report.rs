use crate::{
    models::{Recommendation, User},
    store::Catalog,
};

const UNKNOWN_GAME: &str = "<unknown game>";

/// Logs a user's nonzero ratings by game name
pub fn log_user_ratings(user: &User, catalog: &Catalog) {
    tracing::info!(user_id = user.id, rated = user.rated_games().count(), "User ratings");
    for (game_id, rating) in user.rated_games() {
        let name = catalog
            .game_by_id(game_id)
            .map(|game| game.name.as_str())
            .unwrap_or(UNKNOWN_GAME);
        tracing::info!(game_id, rating, "  {}", name);
    }
}

/// Logs the first `limit` recommendations with their scores
pub fn log_recommendations(label: &str, recommendations: &[Recommendation<'_>], limit: usize) {
    tracing::info!(total = recommendations.len(), "{} recommendations", label);
    for (rank, recommendation) in recommendations.iter().take(limit).enumerate() {
        tracing::info!(
            rank = rank + 1,
            game_id = recommendation.game.id,
            score = recommendation.score,
            "  {}",
            recommendation.game.name
        );
    }
}

/// Recommendations as pretty JSON
pub fn to_json(recommendations: &[Recommendation<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(recommendations)
}
