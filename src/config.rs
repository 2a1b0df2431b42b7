use serde::Deserialize;

/// How repeated candidates for the same game are combined in collaborative filtering
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// One recommendation per game, scored by the most similar neighbor that voted for it
    #[default]
    MaxScore,
    /// One recommendation per qualifying neighbor, duplicates included
    KeepAll,
}

/// Tunable cutoffs shared by both recommenders
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Number of most similar users that vote on candidates
    pub neighborhood_size: usize,
    /// A neighbor's rating must be strictly above this to count as a vote
    pub positive_rating_threshold: u8,
    /// Minimum overlap score for a content-based candidate to be kept
    pub min_shared_characteristics: f64,
    pub merge_policy: MergePolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: default_neighborhood_size(),
            positive_rating_threshold: default_positive_rating_threshold(),
            min_shared_characteristics: default_min_shared_characteristics(),
            merge_policy: MergePolicy::default(),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the board game JSON file
    #[serde(default = "default_games_path")]
    pub games_path: String,

    /// Path to the user ratings JSON file
    #[serde(default = "default_users_path")]
    pub users_path: String,

    #[serde(default = "default_neighborhood_size")]
    pub neighborhood_size: usize,

    #[serde(default = "default_positive_rating_threshold")]
    pub positive_rating_threshold: u8,

    #[serde(default = "default_min_shared_characteristics")]
    pub min_shared_characteristics: f64,

    #[serde(default)]
    pub merge_policy: MergePolicy,

    /// Worker tasks used to compute user similarities
    #[serde(default = "default_similarity_workers")]
    pub similarity_workers: usize,

    /// User to recommend for; a random one is picked when unset
    pub target_user_id: Option<u32>,

    /// Reference game for content-based recommendations
    #[serde(default)]
    pub reference_game_id: u32,

    /// Boost applied to favorable characteristic matches
    #[serde(default = "default_content_weight")]
    pub content_weight: f64,

    /// Favorable category names (comma separated)
    #[serde(default)]
    pub favorable_categories: Vec<String>,

    /// Favorable mechanism names (comma separated)
    #[serde(default)]
    pub favorable_mechanisms: Vec<String>,

    /// Generate this many synthetic users instead of reading `users_path`
    pub synthetic_users: Option<usize>,

    /// Seed for synthetic data and random target selection
    pub seed: Option<u64>,

    /// Number of recommendations printed per recommender
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_games_path() -> String {
    "data/test_game_data.json".to_string()
}

fn default_users_path() -> String {
    "data/test_user_data.json".to_string()
}

fn default_neighborhood_size() -> usize {
    25
}

fn default_positive_rating_threshold() -> u8 {
    3
}

fn default_min_shared_characteristics() -> f64 {
    3.0
}

fn default_similarity_workers() -> usize {
    4
}

fn default_content_weight() -> f64 {
    0.4
}

fn default_display_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Scoring cutoffs for the recommenders
    pub fn recommender(&self) -> RecommenderConfig {
        RecommenderConfig {
            neighborhood_size: self.neighborhood_size,
            positive_rating_threshold: self.positive_rating_threshold,
            min_shared_characteristics: self.min_shared_characteristics,
            merge_policy: self.merge_policy,
        }
    }
}
