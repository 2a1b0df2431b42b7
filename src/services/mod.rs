pub mod collaborative;
pub mod content;
pub mod engine;
pub mod neighbors;
pub mod providers;
pub mod ranking;
pub mod report;
pub mod similarity;

pub use collaborative::CollaborativeRecommender;
pub use content::ContentRecommender;
pub use engine::RecommendationEngine;
pub use neighbors::{select_neighbors, Neighbor};
pub use ranking::rank;
pub use similarity::cosine_similarity;
