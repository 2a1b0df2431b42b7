use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};

use boardgame_recommender::{
    services::{
        providers::{load_snapshot, JsonFileProvider, SnapshotProvider, SyntheticUsersProvider},
        report, RecommendationEngine,
    },
    telemetry, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing();

    let json = JsonFileProvider::new(&config.games_path, &config.users_path);
    let provider: Box<dyn SnapshotProvider> = match config.synthetic_users {
        Some(count) => Box::new(SyntheticUsersProvider::new(
            json,
            count,
            config.seed.unwrap_or_default(),
        )),
        None => Box::new(json),
    };

    let snapshot = load_snapshot(provider.as_ref())
        .await
        .context("Failed to load games and users")?;
    let engine = RecommendationEngine::new(snapshot, config.recommender());

    // Content-based: games close to the reference game
    let favorable = engine
        .catalog()
        .favorable_from_names(&config.favorable_categories, &config.favorable_mechanisms);
    let content = engine
        .content_recommend_by_id(config.reference_game_id, config.content_weight, &favorable)
        .context("Reference game not in catalog")?;
    report::log_recommendations("Content-based", &content, config.display_limit);

    // Collaborative: games liked by similar users
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let users = engine.users().all();
    let target_id = match config.target_user_id {
        Some(id) => id,
        None if !users.is_empty() => users[rng.gen_range(0..users.len())].id,
        None => {
            tracing::warn!("No users loaded, skipping collaborative recommendations");
            return Ok(());
        }
    };

    if let Some(target) = engine.users().user_by_id(target_id) {
        report::log_user_ratings(target, engine.catalog());
    }

    let collaborative = engine
        .collaborative_recommend_concurrent(target_id, config.similarity_workers)
        .await
        .with_context(|| format!("Failed to recommend for user {}", target_id))?;
    report::log_recommendations("Collaborative", &collaborative, config.display_limit);

    Ok(())
}
