use std::collections::BTreeMap;

use rand::{rngs::StdRng, SeedableRng};

use boardgame_recommender::{
    models::{Characteristic, Data, Game, GameId, Rating, User, UserId},
    services::{
        cosine_similarity,
        providers::{load_snapshot, synthetic::generate_users, JsonFileProvider, Snapshot},
        rank, select_neighbors, Neighbor, RecommendationEngine,
    },
    store::{Catalog, UserStore},
    MergePolicy, RecommenderConfig,
};

fn user(id: UserId, ratings: &[(GameId, Rating)]) -> User {
    User::new(id, ratings.iter().copied().collect::<BTreeMap<_, _>>())
}

fn plain_catalog(count: GameId) -> Catalog {
    Catalog::new(
        (0..count)
            .map(|id| Game::new(id, format!("Game {}", id), Characteristic::default()))
            .collect(),
    )
    .unwrap()
}

fn engine(catalog: Catalog, users: Vec<User>, config: RecommenderConfig) -> RecommendationEngine {
    RecommendationEngine::new(
        Snapshot {
            catalog,
            users: UserStore::new(users),
        },
        config,
    )
}

#[test]
fn test_identical_rating_vectors_are_fully_similar() {
    let ratings: BTreeMap<GameId, Rating> = BTreeMap::from([(1, 5), (2, 5), (3, 1)]);
    assert_eq!(cosine_similarity(&ratings, &ratings.clone()), 1.0);
}

#[test]
fn test_neighbor_recommends_unrated_game() {
    let target = user(0, &[(1, 0), (2, 5)]);
    let neighbor = user(1, &[(1, 5), (2, 5)]);
    let similarity = cosine_similarity(&target.ratings, &neighbor.ratings);

    let engine = engine(plain_catalog(3), vec![target, neighbor], RecommenderConfig::default());
    let recommendations = engine.collaborative_recommend(0).unwrap();

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].game.id, 1);
    assert_eq!(recommendations[0].score, similarity);
}

#[test]
fn test_small_population_does_not_panic() {
    let pair = engine(
        plain_catalog(2),
        vec![user(0, &[(0, 5)]), user(1, &[(0, 5), (1, 5)])],
        RecommenderConfig::default(),
    );
    assert_eq!(pair.collaborative_recommend(0).unwrap().len(), 1);

    let alone = engine(plain_catalog(2), vec![user(0, &[(0, 5)])], RecommenderConfig::default());
    assert!(alone.collaborative_recommend(0).unwrap().is_empty());
}

#[test]
fn test_collaborative_properties_on_synthetic_population() {
    let game_ids: Vec<GameId> = (0..20).collect();
    let users = generate_users(&mut StdRng::seed_from_u64(42), 200, &game_ids, 0.3);
    let target = users[23].clone();

    for merge_policy in [MergePolicy::MaxScore, MergePolicy::KeepAll] {
        let config = RecommenderConfig {
            merge_policy,
            ..RecommenderConfig::default()
        };
        let engine = engine(plain_catalog(20), users.clone(), config);
        let recommendations = engine.collaborative_recommend(23).unwrap();

        for recommendation in &recommendations {
            assert!(!target.has_rated(recommendation.game.id));
            assert!((0.0..=1.0).contains(&recommendation.score));
        }
        assert!(recommendations
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));

        if merge_policy == MergePolicy::MaxScore {
            let mut ids: Vec<GameId> = recommendations.iter().map(|r| r.game.id).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total);
        }
    }
}

#[test]
fn test_neighbor_selection_size() {
    for available in [0usize, 1, 24, 25, 26, 100] {
        let candidates = (0..available)
            .map(|id| Neighbor::new(id as UserId, 1.0 / (id as f64 + 1.0)))
            .collect();
        assert_eq!(select_neighbors(candidates, 25).len(), available.min(25));
    }
}

#[test]
fn test_content_scenario_threshold() {
    let a = Data::new("A", "a");
    let b = Data::new("B", "b");
    let c = Data::new("C", "c");
    let m = Data::new("M", "m");

    let reference = Game::new(
        0,
        "Reference",
        Characteristic::new(vec![a.clone(), b.clone(), c.clone()], vec![m.clone()]),
    );
    let categories_only = Game::new(
        1,
        "Categories only",
        Characteristic::new(vec![a.clone(), b.clone()], vec![]),
    );
    let with_mechanism = Game::new(
        2,
        "With mechanism",
        Characteristic::new(vec![a.clone(), b.clone()], vec![m]),
    );
    let catalog = Catalog::new(vec![reference.clone(), categories_only, with_mechanism]).unwrap();
    let engine = engine(catalog, Vec::new(), RecommenderConfig::default());
    let favorable = Characteristic::new(vec![b], vec![]);

    let recommendations = engine.content_recommend(&reference, 0.5, &favorable);

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].game.id, 2);
    assert_eq!(recommendations[0].score, 3.5);
    assert!(recommendations.iter().all(|r| r.game.id != reference.id));
}

#[test]
fn test_content_threshold_is_configurable() {
    let shared = Data::new("Strategy", "thinky");
    let reference = Game::new(0, "Reference", Characteristic::new(vec![shared.clone()], vec![]));
    let other = Game::new(1, "Other", Characteristic::new(vec![shared], vec![]));
    let catalog = Catalog::new(vec![reference.clone(), other]).unwrap();

    let strict = engine(catalog.clone(), Vec::new(), RecommenderConfig::default());
    assert!(strict
        .content_recommend(&reference, 0.0, &Characteristic::default())
        .is_empty());

    let lenient = engine(
        catalog,
        Vec::new(),
        RecommenderConfig {
            min_shared_characteristics: 1.0,
            ..RecommenderConfig::default()
        },
    );
    let recommendations = lenient.content_recommend(&reference, 0.0, &Characteristic::default());
    assert_eq!(recommendations.len(), 1);
    assert!(recommendations
        .iter()
        .all(|r| r.score >= lenient.config().min_shared_characteristics));
}

#[test]
fn test_rank_is_idempotent() {
    let games: Vec<Game> = (0..5)
        .map(|id| Game::new(id, format!("Game {}", id), Characteristic::default()))
        .collect();
    let scores = [0.3, 0.9, 0.3, 0.1, 0.9];
    let recommendations = games
        .iter()
        .zip(scores)
        .map(|(game, score)| boardgame_recommender::models::Recommendation::new(game, score))
        .collect();

    let ranked = rank(recommendations);
    let ids: Vec<GameId> = ranked.iter().map(|r| r.game.id).collect();
    assert_eq!(ids, vec![1, 4, 0, 2, 3]);
    assert_eq!(rank(ranked.clone()), ranked);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fan_out_matches_sequential() {
    let game_ids: Vec<GameId> = (0..15).collect();
    let users = generate_users(&mut StdRng::seed_from_u64(9), 120, &game_ids, 0.4);
    let engine = engine(plain_catalog(15), users, RecommenderConfig::default());

    let sequential = engine.collaborative_recommend(5).unwrap();
    let concurrent = engine.collaborative_recommend_concurrent(5, 4).await.unwrap();
    assert_eq!(concurrent, sequential);
}

#[tokio::test]
async fn test_bad_ratings_keep_the_rest_of_the_snapshot() {
    let dir = std::env::temp_dir();
    let games_path = dir.join(format!("bgr-games-{}.json", uuid::Uuid::new_v4()));
    let users_path = dir.join(format!("bgr-users-{}.json", uuid::Uuid::new_v4()));
    tokio::fs::write(&games_path, r#"[{"name": "Catan"}, {"name": "Azul"}]"#)
        .await
        .unwrap();
    tokio::fs::write(
        &users_path,
        r#"[{"ID": 0, "Ratings": {"0": 5}}, {"ID": 1, "Ratings": {"0": -1, "1": 300}}]"#,
    )
    .await
    .unwrap();

    let snapshot = load_snapshot(&JsonFileProvider::new(&games_path, &users_path))
        .await
        .unwrap();
    assert_eq!(snapshot.users.len(), 2);
    assert_eq!(snapshot.users.user_by_id(0).unwrap().rating(0), 5);
    assert!(snapshot.users.user_by_id(1).unwrap().ratings.is_empty());

    tokio::fs::remove_file(games_path).await.ok();
    tokio::fs::remove_file(users_path).await.ok();
}
